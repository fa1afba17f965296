use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Context as ReadlineContext, Editor, Helper,
};
use shell_words::split;

use crate::{config::Config, errors::CliError, ledger::Budget};

use super::core::{parse_positive_amount, CliMode, CommandError, LoopControl, ShellContext};
use super::io as cli_io;
use super::output;

pub const SCRIPT_MODE_ENV: &str = "BUDGET_TRACKER_CLI_SCRIPT";

const LIMIT_PROMPT: &str = "Enter your monthly budget limit";

/// Loads (or creates) the budget named by `config` and runs the command loop.
pub fn run_cli(config: Config) -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_MODE_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let loaded = Budget::load_from_file(config.data_file())?;
    if loaded.is_none() {
        output::info(format!(
            "No saved budget found at {}. Starting with a new budget.",
            config.data_file().display()
        ));
    }

    let context = match mode {
        CliMode::Interactive => {
            let budget = match loaded {
                Some(budget) => budget,
                None => prompt_new_budget()?,
            };
            let mut context = ShellContext::new(mode, config, budget);
            run_interactive(&mut context)?;
            context
        }
        CliMode::Script => {
            let stdin = io::stdin();
            let mut lines = stdin.lock().lines();
            let budget = match loaded {
                Some(budget) => budget,
                None => read_new_budget(&mut lines)?,
            };
            let mut context = ShellContext::new(mode, config, budget);
            run_script(&mut context, lines)?;
            context
        }
    };

    context.print_summary();
    Ok(())
}

fn prompt_new_budget() -> Result<Budget, CliError> {
    let theme = dialoguer::theme::ColorfulTheme::default();
    let limit = cli_io::prompt_parsed(&theme, LIMIT_PROMPT, |raw| {
        parse_positive_amount(raw, "Budget limit")
    })?;
    Ok(Budget::new(limit))
}

fn read_new_budget(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Budget, CliError> {
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_positive_amount(&line, "Budget limit") {
            Ok(limit) => return Ok(Budget::new(limit)),
            Err(err) => output::error(format!("Invalid input: {}", err)),
        }
    }
    Err(CliError::Input("no monthly budget limit supplied".into()))
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()
        .map_err(|err| CliError::Command(err.to_string()))?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    output::hint("Type `help` to see available commands.");

    loop {
        if !context.running {
            break;
        }
        let prompt = context.prompt();

        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => match context.confirm_exit() {
                Ok(true) => break,
                Ok(false) => {}
                Err(err) => context.report_error(err)?,
            },
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(CliError::Command(err.to_string())),
        }
    }

    Ok(())
}

fn run_script(
    context: &mut ShellContext,
    lines: impl Iterator<Item = io::Result<String>>,
) -> Result<(), CliError> {
    for line in lines {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names.into_iter().map(str::to_owned).collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, needle: &str) -> Vec<Pair> {
        let needle = needle.to_ascii_lowercase();
        self.commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix.len() - prefix.trim_start().len();

        // Only the command word itself is completed.
        if prefix[start..].contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        Ok((start, self.candidates(&prefix[start..])))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

#[derive(Debug)]
pub(crate) struct ParseError {
    pub(crate) message: String,
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}
