//! Screen navigation.

use serde::Serialize;

/// The three mutually exclusive screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Screen {
    #[default]
    Home,
    IncomeExpense,
    TransactionManager,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::IncomeExpense => "Income & Expense",
            Screen::TransactionManager => "Transaction Manager",
        }
    }
}

/// Tracks which screen is showing. Holds no data of its own.
#[derive(Debug, Default)]
pub struct Shell {
    current: Screen,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn open_income_expense(&mut self) -> Screen {
        self.current = Screen::IncomeExpense;
        self.current
    }

    pub fn open_transaction_manager(&mut self) -> Screen {
        self.current = Screen::TransactionManager;
        self.current
    }

    /// Returns to the home screen.
    pub fn back(&mut self) -> Screen {
        self.current = Screen::Home;
        self.current
    }
}
