use dialoguer::theme::ColorfulTheme;

use crate::{config::Config, ledger::Budget};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config: Config,
    pub budget: Budget,
    pub unsaved_changes: bool,
    pub running: bool,
}
