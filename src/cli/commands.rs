//! Shell state and command handlers.

use dialoguer::{theme::ColorfulTheme, Input, Select};
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::{LedgerManager, SaveOutcome},
    errors::LedgerError,
    ledger::TransactionKind,
    storage::{LoadWarning, TextStorage},
};

use super::output;

/// How the shell receives its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    /// Line editor with completion; missing command arguments are prompted
    /// for.
    Interactive,
    /// Plain lines from stdin; missing arguments are errors.
    Script,
}

/// Whether the dispatch loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error("{0}")]
    Input(String),
}

const COMMANDS: &[(&str, &str)] = &[
    ("add", "add [Income|Expense] [CATEGORY] [AMOUNT] - record a transaction"),
    ("remove", "remove [ID] - delete the transaction at the given position"),
    ("list", "list - show all transactions with a summary"),
    ("help", "help - show this overview"),
    ("version", "version - print version information"),
    ("exit", "exit - save and leave the shell"),
];

/// Owns the ledger manager and configuration for one shell session.
pub struct ShellContext {
    manager: LedgerManager,
    config: Config,
    mode: CliMode,
    theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config = ConfigManager::new()?.load()?;
        let path = config.data_file_path();
        let (manager, warnings) = LedgerManager::open(Box::new(TextStorage::new(&path)));

        let unavailable = warnings
            .iter()
            .any(|warning| matches!(warning, LoadWarning::StoreUnavailable { .. }));
        for warning in &warnings {
            output::warning(warning);
        }
        if !unavailable {
            output::info(format!(
                "Transactions loaded successfully from {}.",
                path.display()
            ));
        }

        Ok(Self {
            manager,
            config,
            mode,
            theme: ColorfulTheme::default(),
        })
    }

    /// Command names offered to the line-editor completer.
    pub fn command_names() -> Vec<String> {
        COMMANDS.iter().map(|(name, _)| (*name).to_string()).collect()
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CliError> {
        match command {
            "add" => self.cmd_add(args)?,
            "remove" | "rm" => self.cmd_remove(args)?,
            "list" | "ls" => self.render_listing(),
            "help" => self.cmd_help(),
            "version" => self.cmd_version(),
            "exit" | "quit" => return Ok(LoopControl::Exit),
            other => self.suggest(other),
        }
        Ok(LoopControl::Continue)
    }

    /// Final save before the process goes away. A failure here is reported
    /// but no longer actionable.
    pub fn shutdown(&self) {
        if let Err(err) = self.manager.persist() {
            output::error(format!("Could not save transactions on exit: {err}"));
        }
        output::info("Program ended.");
    }

    fn cmd_add(&mut self, args: &[&str]) -> Result<(), CliError> {
        let (kind, category, amount) = match args {
            [] if self.mode == CliMode::Interactive => self.prompt_transaction()?,
            [kind, category, amount] => {
                let kind: TransactionKind = kind.parse()?;
                let amount: f64 = amount.parse().map_err(|_| {
                    CliError::Input(format!("amount must be a number, got `{amount}`"))
                })?;
                (kind, (*category).to_string(), amount)
            }
            _ => {
                return Err(CliError::Input(
                    "usage: add [Income|Expense] [CATEGORY] [AMOUNT]".into(),
                ))
            }
        };

        match self.manager.add(kind, &category, amount)? {
            SaveOutcome::Saved => output::success("Transaction added and saved successfully!"),
            SaveOutcome::Failed(err) => {
                output::warning(format!("Transaction added, but saving failed: {err}"));
            }
        }
        Ok(())
    }

    fn cmd_remove(&mut self, args: &[&str]) -> Result<(), CliError> {
        if self.manager.ledger().is_empty() {
            output::warning("Transaction list is empty!");
            return Ok(());
        }

        let position: usize = match args {
            [] if self.mode == CliMode::Interactive => {
                self.render_listing();
                Input::with_theme(&self.theme)
                    .with_prompt("Transaction id to remove")
                    .interact_text()?
            }
            [raw] => raw.parse().map_err(|_| {
                CliError::Input(format!("transaction id must be a number, got `{raw}`"))
            })?,
            _ => return Err(CliError::Input("usage: remove [ID]".into())),
        };

        match self.manager.remove(position) {
            Ok((_, SaveOutcome::Saved)) => {
                output::success("Transaction removed and changes saved successfully!");
            }
            Ok((_, SaveOutcome::Failed(err))) => {
                output::warning(format!("Transaction removed, but saving failed: {err}"));
            }
            Err(err @ (LedgerError::EmptyLedger | LedgerError::IndexOutOfRange { .. })) => {
                output::error(err);
            }
            Err(err) => return Err(err.into()),
        }
        Ok(())
    }

    fn render_listing(&self) {
        let Some(summary) = self.manager.summarize() else {
            output::warning("Transaction list is empty!");
            return;
        };

        let symbol = &self.config.currency_symbol;
        for (position, txn) in summary.entries.iter().enumerate() {
            output::line(format!("Transaction no: {}", position + 1));
            output::line(format!("Type: {}", txn.kind()));
            output::line(format!("Category: {}", txn.category()));
            output::line(format!("Amount: {}{}", symbol, txn.amount()));
            output::line("------------------");
        }
        output::section("Summary");
        output::line(format!("Total Income: {}{}", symbol, summary.total_income));
        output::line(format!("Total Expense: {}{}", symbol, summary.total_expense));
        output::line(format!("Net Balance: {}{}", symbol, summary.net()));
    }

    fn cmd_help(&self) {
        output::section("Available commands");
        for (_, description) in COMMANDS {
            output::line(format!("  {description}"));
        }
    }

    fn cmd_version(&self) {
        output::info(format!("tally_core {}", env!("CARGO_PKG_VERSION")));
    }

    fn suggest(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let mut suggestions: Vec<_> = COMMANDS
            .iter()
            .map(|(name, _)| (levenshtein(name, input), *name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{best}`?"));
            }
        }
    }

    fn prompt_transaction(&self) -> Result<(TransactionKind, String, f64), CliError> {
        let kinds = [TransactionKind::Income, TransactionKind::Expense];
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Transaction type")
            .items(&kinds)
            .default(0)
            .interact()?;

        let category: String = Input::with_theme(&self.theme)
            .with_prompt("Category")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("category must not be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let amount: f64 = Input::with_theme(&self.theme)
            .with_prompt("Amount")
            .validate_with(|value: &f64| -> Result<(), &str> {
                if *value > 0.0 {
                    Ok(())
                } else {
                    Err("amount must be greater than 0")
                }
            })
            .interact_text()?;

        Ok((kinds[choice], category, amount))
    }
}
