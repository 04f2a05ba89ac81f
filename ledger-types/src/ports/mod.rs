//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod prompt;
mod record_store;
mod storage;

pub use prompt::{ChoiceStyle, ConfirmationPrompt, Prompt, PromptAction, PromptChoice};
pub use record_store::{RECORDS_KEY, RecordStore};
pub use storage::KeyValueStore;
