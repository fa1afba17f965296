use crate::ledger::Transaction;

use super::core::{
    parse_index, parse_number, parse_positive_amount, CliMode, CommandError, CommandResult,
    ShellContext,
};
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};

pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "add",
        "Record a transaction against the monthly limit",
        "add <amount> <category> <description...>",
        cmd_add,
    ));
    registry.register(
        CommandEntry::new(
            "remove",
            "Remove a transaction by index (negative counts from the end)",
            "remove [index]",
            cmd_remove,
        )
        .with_aliases(&["rm"]),
    );
    registry.register(
        CommandEntry::new("list", "List recorded transactions", "list", cmd_list)
            .with_aliases(&["ls"]),
    );
    registry.register(CommandEntry::new(
        "funds",
        "Raise the monthly limit",
        "funds <amount>",
        cmd_funds,
    ));
    registry.register(CommandEntry::new(
        "summary",
        "Show total spent, remaining budget, and transactions",
        "summary [--json]",
        cmd_summary,
    ));
    registry.register(CommandEntry::new(
        "save",
        "Write the budget to the configured data file",
        "save",
        cmd_save,
    ));
    registry.register(CommandEntry::new(
        "config",
        "Show the resolved configuration",
        "config",
        cmd_config,
    ));
    registry.register(CommandEntry::new(
        "help",
        "List commands or show usage for one",
        "help [command]",
        cmd_help,
    ));
    registry.register(
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    );
}

fn usage_error(context: &ShellContext, command: &str) -> CommandError {
    let usage = context
        .registry
        .get(command)
        .map(|entry| entry.usage)
        .unwrap_or(command);
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [amount, category, description @ ..] = args else {
        return Err(usage_error(context, "add"));
    };
    if description.is_empty() {
        return Err(usage_error(context, "add"));
    }
    let amount = parse_positive_amount(amount, "Amount")?;
    let transaction = Transaction::new(amount, *category, description.join(" "));

    let added = context.budget.add_transaction(transaction)?;
    output::success(format!("Transaction added: {}", added));
    context.unsaved_changes = true;
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.budget.is_empty() {
        output::info("No transactions to remove.");
        return Ok(());
    }

    let raw = match args.first() {
        Some(raw) => raw.to_string(),
        None => {
            print_transactions(context, "Current transactions");
            if context.mode() == CliMode::Script {
                return Err(usage_error(context, "remove"));
            }
            cli_io::prompt_text(
                context.theme(),
                "Enter the index of the transaction to remove",
            )?
        }
    };
    let index = parse_index(&raw)?;

    let removed = context.budget.remove_transaction(index)?;
    output::success(format!("Transaction removed: {}", removed));
    context.unsaved_changes = true;
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.budget.is_empty() {
        output::info("No transactions recorded.");
    } else {
        print_transactions(context, "Transactions");
    }
    Ok(())
}

fn print_transactions(context: &ShellContext, title: &str) {
    output::section(title);
    for (idx, transaction) in context.budget.transactions().iter().enumerate() {
        output::info(format!("{}: {}", idx, transaction));
    }
}

fn cmd_funds(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [amount] = args else {
        return Err(usage_error(context, "funds"));
    };
    let amount = parse_number(amount)?;

    let limit = context.budget.add_funds(amount)?;
    output::success(format!(
        "Funds added: {:.2}. New budget limit: {:.2}",
        amount, limit
    ));
    context.unsaved_changes = true;
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => context.print_summary(),
        ["--json"] => {
            let json = serde_json::to_string_pretty(&context.budget.summary())?;
            println!("{json}");
        }
        _ => return Err(usage_error(context, "summary")),
    }
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let path = context.config.data_file().to_path_buf();
    context.budget.save_to_file(&path)?;
    context.unsaved_changes = false;
    output::success(format!("Data saved to {}", path.display()));
    Ok(())
}

fn cmd_config(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Configuration");
    output::info(format!("Data file:  {}", context.config.data_file.display()));
    output::info(format!("Log filter: {}", context.config.log_filter));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = context.registry.get(&name.to_lowercase()).ok_or_else(|| {
            CommandError::InvalidArguments(format!("no help for unknown command `{}`", name))
        })?;
        output::info(format!("{} - {}", entry.name, entry.description));
        output::info(format!("usage: {}", entry.usage));
        if !entry.aliases.is_empty() {
            output::info(format!("aliases: {}", entry.aliases.join(", ")));
        }
        return Ok(());
    }

    output::section("Commands");
    let width = context
        .registry
        .list()
        .iter()
        .map(|entry| entry.usage.len())
        .max()
        .unwrap_or(0);
    for entry in context.registry.list() {
        output::info(format!(
            "  {:<width$}  {}",
            entry.usage,
            entry.description,
            width = width
        ));
    }
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.confirm_exit()? {
        Err(CommandError::ExitRequested)
    } else {
        Ok(())
    }
}
