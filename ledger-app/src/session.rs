//! Interactive terminal session: the home screen plus the income/expense
//! and transaction manager screens, driven by [`Shell`].

use std::sync::Arc;

use ledger_hex::{DeleteOutcome, IncomeExpenseViewer, Screen, Shell, TransactionManager};
use ledger_types::{MonthFilter, RecordForm, RecordStore, RecordType};
use tokio::io::AsyncBufRead;

use crate::terminal::{Console, render_record_list, render_report, report_order};

type Viewer<S, R> = IncomeExpenseViewer<S, Arc<Console<R>>>;

pub struct Session<R, S> {
    console: Arc<Console<R>>,
    store: S,
    default_period: MonthFilter,
    shell: Shell,
}

impl<R, S> Session<R, S>
where
    R: AsyncBufRead + Unpin + Send,
    S: RecordStore + Clone,
{
    pub fn new(console: Arc<Console<R>>, store: S, default_period: MonthFilter) -> Self {
        Self {
            console,
            store,
            default_period,
            shell: Shell::new(),
        }
    }

    /// Runs until the user quits or input ends.
    pub async fn run(&mut self) {
        loop {
            let keep_going = match self.shell.current() {
                Screen::Home => self.home().await,
                Screen::IncomeExpense => self.income_expense().await,
                Screen::TransactionManager => self.transaction_manager().await,
            };
            if !keep_going {
                break;
            }
        }
    }

    async fn home(&mut self) -> bool {
        println!("\n== {} ==", Screen::Home.title());
        println!(
            "[1] {}  [2] {}  [q] Quit",
            Screen::IncomeExpense.title(),
            Screen::TransactionManager.title()
        );

        let Some(choice) = self.console.read_line("> ").await else {
            return false;
        };
        match choice.as_str() {
            "1" => {
                self.shell.open_income_expense();
            }
            "2" => {
                self.shell.open_transaction_manager();
            }
            "q" | "quit" => return false,
            "" => {}
            other => println!("Unknown option: {other}"),
        }
        true
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Income & Expense
    // ─────────────────────────────────────────────────────────────────────────────

    async fn income_expense(&mut self) -> bool {
        // A fresh viewer on every entry, so changes made elsewhere show up.
        let mut viewer =
            IncomeExpenseViewer::open(self.store.clone(), self.console.clone(), self.default_period)
                .await;

        loop {
            let report = viewer.report();
            println!("\n== {} ==", Screen::IncomeExpense.title());
            print!("{}", render_report(&report, viewer.selected()));
            println!("Commands: period, select <n>, delete, back, quit");

            let Some(line) = self.console.read_line("> ").await else {
                return false;
            };
            let (command, arg) = split_command(&line);
            match command {
                "period" => {
                    if self.pick_period(&mut viewer).await.is_none() {
                        return false;
                    }
                }
                "select" => match nth(&report_order(&report), arg) {
                    Some(id) => viewer.toggle_selection(id),
                    None => println!("No transaction numbered {arg:?}"),
                },
                "delete" => {
                    if viewer.selected().is_none() {
                        println!("Select a transaction first");
                    } else {
                        print_outcome(viewer.delete_selected().await);
                    }
                }
                "back" => {
                    self.shell.back();
                    return true;
                }
                "q" | "quit" => return false,
                "" => {}
                other => println!("Unknown command: {other}"),
            }
        }
    }

    /// Walks the time picker. `None` means input ended.
    async fn pick_period(&self, viewer: &mut Viewer<S, R>) -> Option<()> {
        let pending = viewer.open_time_picker();
        println!(
            "Years: {}",
            ledger_hex::viewer::AVAILABLE_YEARS.map(|y| y.to_string()).join(" ")
        );

        let year = self
            .console
            .read_with_default("Year", &pending.year.to_string())
            .await?;
        let month = self
            .console
            .read_with_default("Month", &pending.month.to_string())
            .await?;

        let picked = match (year.parse::<i32>(), month.parse::<u32>()) {
            (Ok(year), Ok(month)) => viewer
                .pick_year(year)
                .and_then(|_| viewer.pick_month(month)),
            _ => {
                println!("Year and month must be numbers");
                viewer.cancel_time_picker();
                return Some(());
            }
        };
        let pending = match picked {
            Ok(pending) => pending,
            Err(e) => {
                println!("{e}");
                viewer.cancel_time_picker();
                return Some(());
            }
        };

        let answer = self
            .console
            .read_line(&format!("Show {}? [y/N] ", pending.label()))
            .await?;
        if answer.eq_ignore_ascii_case("y") {
            viewer.confirm_time_picker();
        } else {
            viewer.cancel_time_picker();
        }
        Some(())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transaction Manager
    // ─────────────────────────────────────────────────────────────────────────────

    async fn transaction_manager(&mut self) -> bool {
        let mut manager = TransactionManager::open(self.store.clone(), self.console.clone()).await;

        loop {
            let records = manager.list();
            println!("\n== {} ==", Screen::TransactionManager.title());
            print!("{}", render_record_list(&records));
            println!("Commands: add, edit <n>, delete <n>, back, quit");

            let Some(line) = self.console.read_line("> ").await else {
                return false;
            };
            let (command, arg) = split_command(&line);
            match command {
                "add" => {
                    let blank = RecordForm::new(chrono::Local::now().date_naive());
                    let Some(form) = self.fill_form(blank).await else {
                        return false;
                    };
                    match manager.create(form).await {
                        Ok(record) => println!("Saved #{}", record.id),
                        Err(e) => println!("{e}"),
                    }
                }
                "edit" => {
                    let Some(record) = nth(&records, arg) else {
                        println!("No transaction numbered {arg:?}");
                        continue;
                    };
                    let Some(form) = self.fill_form(RecordForm::from_record(record)).await else {
                        return false;
                    };
                    match manager.update(&record.id, form).await {
                        Ok(Some(record)) => println!("Saved #{}", record.id),
                        Ok(None) => println!("That transaction no longer exists"),
                        Err(e) => println!("{e}"),
                    }
                }
                "delete" => match nth(&records, arg) {
                    Some(record) => print_outcome(manager.delete(&record.id).await),
                    None => println!("No transaction numbered {arg:?}"),
                },
                "back" => {
                    self.shell.back();
                    return true;
                }
                "q" | "quit" => return false,
                "" => {}
                other => println!("Unknown command: {other}"),
            }
        }
    }

    /// Asks for each field, keeping the current value on empty input.
    async fn fill_form(&self, mut form: RecordForm) -> Option<RecordForm> {
        form.date = self.console.read_with_default("Date", &form.date).await?;

        let kind = self
            .console
            .read_with_default("Type (income/expense)", &form.record_type.to_string())
            .await?;
        match kind.parse::<RecordType>() {
            Ok(kind) => form.record_type = kind,
            Err(_) => println!("Keeping {}", form.record_type),
        }

        form.category = self
            .console
            .read_with_default("Category", &form.category)
            .await?;
        form.amount = self.console.read_with_default("Amount", &form.amount).await?;
        form.description = self
            .console
            .read_with_default("Description", &form.description)
            .await?;
        Some(form)
    }
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    }
}

/// 1-based lookup as shown on screen.
fn nth<'a, T>(items: &'a [T], arg: &str) -> Option<&'a T> {
    let n: usize = arg.parse().ok()?;
    items.get(n.checked_sub(1)?)
}

fn print_outcome(outcome: DeleteOutcome) {
    match outcome {
        DeleteOutcome::Deleted => println!("Deleted"),
        DeleteOutcome::Cancelled => println!("Kept"),
        DeleteOutcome::NotFound => println!("That transaction no longer exists"),
        DeleteOutcome::Failed => println!("Could not delete, see the log"),
    }
}
