use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::{
    config::Config,
    errors::{BudgetError, CliError, Rejection},
    ledger::Budget,
};

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::CommandRegistry;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode, config: Config, budget: Budget) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config,
            budget,
            unsaved_changes: false,
            running: true,
        }
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        let marker = if self.unsaved_changes { "*" } else { "" };
        format!("budget [{:.2} left]{marker}> ", self.budget.balance())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_exit(self.theme(), self.unsaved_changes)
    }

    /// Prints recoverable command failures; persistence faults end the session.
    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(&message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Rejected(rejection) => {
                output::warning(rejection);
                Ok(())
            }
            CommandError::Dialoguer(err) => {
                output::error(err);
                Ok(())
            }
            err @ CommandError::Render(_) => {
                output::error(err);
                Ok(())
            }
            CommandError::Core(err) => Err(CliError::Core(err)),
        }
    }

    pub(crate) fn print_summary(&self) {
        let summary = self.budget.summary();
        output::section("Budget Summary");
        output::info(format!("Total Spent: {:.2}", summary.total_spent));
        output::info(format!("Remaining Budget: {:.2}", summary.remaining_budget));
        output::info("Transactions:");
        for transaction in summary.transactions {
            output::info(transaction);
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(&err.message);
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }
}

/// Parses a user-supplied amount that must be a positive, finite number.
pub(crate) fn parse_positive_amount(input: &str, what: &str) -> Result<f64, CommandError> {
    let amount = parse_number(input)?;
    if amount <= 0.0 {
        return Err(CommandError::InvalidArguments(format!(
            "{what} must be positive."
        )));
    }
    Ok(amount)
}

pub(crate) fn parse_number(input: &str) -> Result<f64, CommandError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "invalid amount `{}`. Please enter a valid number.",
                input.trim()
            ))
        })
}

pub(crate) fn parse_index(input: &str) -> Result<isize, CommandError> {
    input.trim().parse::<isize>().map_err(|_| {
        CommandError::InvalidArguments(format!(
            "invalid index `{}`. Please enter a valid index.",
            input.trim()
        ))
    })
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("could not render JSON: {0}")]
    Render(#[from] serde_json::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::InvalidArguments(message) => CliError::Input(message),
            other => CliError::Command(other.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(budget: Budget, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::new(CliMode::Script, Config::default(), budget);
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Transaction;

    #[test]
    fn scripted_session_tracks_balance() {
        let app = process_script(
            Budget::new(100.0),
            &[
                "add 60 food groceries",
                "add 50 food takeaway",
                "funds 20",
                "add 50 rent \"shared room\"",
                "remove 0",
            ],
        )
        .unwrap();

        assert_eq!(app.budget.monthly_limit(), 120.0);
        assert_eq!(app.budget.balance(), 70.0);
        assert_eq!(
            app.budget.transactions(),
            [Transaction::new(50.0, "rent", "shared room")]
        );
        assert!(app.unsaved_changes);
    }

    #[test]
    fn exit_stops_processing() {
        let app = process_script(Budget::new(10.0), &["QUIT", "add 5 misc ignored"]).unwrap();
        assert!(app.budget.is_empty());
    }

    #[test]
    fn bad_arguments_do_not_touch_state() {
        let app = process_script(
            Budget::new(10.0),
            &["add -3 misc refund", "add ten misc x", "remove x", "funds abc", "frobnicate"],
        )
        .unwrap();
        assert!(app.budget.is_empty());
        assert_eq!(app.budget.monthly_limit(), 10.0);
        assert!(!app.unsaved_changes);
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let mut app = ShellContext::new(CliMode::Script, Config::default(), Budget::new(1.0));
        assert_eq!(app.process_line("sumary").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn amount_parsing_rejects_non_finite_and_non_positive() {
        assert_eq!(parse_positive_amount(" 12.5 ", "Amount").unwrap(), 12.5);
        assert!(parse_positive_amount("0", "Amount").is_err());
        assert!(parse_positive_amount("inf", "Amount").is_err());
        assert!(parse_number("NaN").is_err());
        assert_eq!(parse_number("-4").unwrap(), -4.0);
        assert_eq!(parse_index("-1").unwrap(), -1);
    }

    #[test]
    fn overflowing_funds_are_reported_not_fatal() {
        let app = process_script(Budget::new(1e308), &["funds 1e308", "add 5 misc snack"]).unwrap();
        assert_eq!(app.budget.monthly_limit(), 1e308);
        assert_eq!(app.budget.len(), 1);
    }

    #[test]
    fn render_failures_keep_the_session_alive() {
        let app = ShellContext::new(CliMode::Script, Config::default(), Budget::new(1.0));
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(app.report_error(CommandError::Render(err)).is_ok());
    }

    #[test]
    fn prompt_marks_unsaved_changes() {
        let mut app = ShellContext::new(CliMode::Script, Config::default(), Budget::new(50.0));
        assert_eq!(app.prompt(), "budget [50.00 left]> ");
        app.process_line("add 12.5 misc snack").unwrap();
        assert_eq!(app.prompt(), "budget [37.50 left]*> ");
    }
}
