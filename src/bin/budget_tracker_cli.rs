use std::{env, path::PathBuf, process};

use budget_tracker::{cli, config::Config, init};

fn main() {
    let explicit = match env::args_os().nth(1) {
        Some(arg) if arg == "-h" || arg == "--help" => {
            print_usage();
            return;
        }
        other => other.map(PathBuf::from),
    };

    let config = Config::resolve(explicit);
    init(&config);

    if let Err(err) = cli::run_cli(config) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "Usage: budget_tracker_cli [FILE]\n\
         \n\
         Tracks spending against a monthly limit, persisted as JSON in FILE\n\
         (default: $BUDGET_TRACKER_FILE, then ./budget_data.json).\n\
         \n\
         Environment:\n  \
         BUDGET_TRACKER_FILE        data file when FILE is omitted\n  \
         BUDGET_TRACKER_LOG         tracing filter (RUST_LOG takes precedence)\n  \
         BUDGET_TRACKER_CLI_SCRIPT  read commands from stdin without prompts"
    );
}
