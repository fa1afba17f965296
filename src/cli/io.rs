use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use super::core::CommandError;
use super::output;

/// Asks before leaving the shell. Pending changes flip the default answer to "no".
pub fn confirm_exit(theme: &ColorfulTheme, unsaved_changes: bool) -> Result<bool, CommandError> {
    let prompt = if unsaved_changes {
        "Exit without saving changes?"
    } else {
        "Exit shell?"
    };
    let confirmed = Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(!unsaved_changes)
        .interact()?;
    Ok(confirmed)
}

/// Reads one answer, trimmed.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    let answer: String = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .interact_text()?;
    Ok(answer.trim().to_owned())
}

/// Re-asks until `parse` accepts the answer; argument errors are shown and retried,
/// anything else is returned.
pub fn prompt_parsed<T>(
    theme: &ColorfulTheme,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, CommandError>,
) -> Result<T, CommandError> {
    loop {
        let answer = prompt_text(theme, prompt)?;
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(CommandError::InvalidArguments(message)) => {
                output::error(format!("Invalid input: {}", message))
            }
            Err(err) => return Err(err),
        }
    }
}
