//! Confirmation prompt port.
//!
//! The only user-interrupt boundary: a title, a message and a list of
//! choices, answered asynchronously by whatever front end is attached.

use serde::{Deserialize, Serialize};

/// Visual style hint for a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceStyle {
    Default,
    Cancel,
    Destructive,
}

/// What picking a choice means to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptAction {
    Cancel,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptChoice {
    pub label: String,
    pub style: ChoiceStyle,
    pub action: PromptAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub title: String,
    pub message: String,
    pub choices: Vec<PromptChoice>,
}

impl Prompt {
    /// Cancel / Delete prompt shown before removing a record.
    pub fn delete_record() -> Self {
        Self {
            title: "Delete transaction".to_string(),
            message: "Are you sure you want to delete this transaction?".to_string(),
            choices: vec![
                PromptChoice {
                    label: "Cancel".to_string(),
                    style: ChoiceStyle::Cancel,
                    action: PromptAction::Cancel,
                },
                PromptChoice {
                    label: "Delete".to_string(),
                    style: ChoiceStyle::Destructive,
                    action: PromptAction::Confirm,
                },
            ],
        }
    }
}

/// Port trait for asking the user a yes/no style question.
#[async_trait::async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Shows `prompt` and returns the action of the picked choice, or `None`
    /// if the prompt was dismissed without a choice.
    async fn ask(&self, prompt: &Prompt) -> Option<PromptAction>;

    /// True only when the user explicitly picked a confirming choice.
    async fn confirm(&self, prompt: &Prompt) -> bool {
        self.ask(prompt).await == Some(PromptAction::Confirm)
    }
}

#[async_trait::async_trait]
impl<T: ConfirmationPrompt + ?Sized> ConfirmationPrompt for std::sync::Arc<T> {
    async fn ask(&self, prompt: &Prompt) -> Option<PromptAction> {
        (**self).ask(prompt).await
    }
}
