//! logbridge CLI entry point.

use clap::Parser;

use logbridge::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Emit {
            config,
            logger,
            level,
            message,
        } => logbridge::cli::commands::emit::execute(config, logger, level, message, cli.json),
        Commands::Check { config } => logbridge::cli::commands::check::execute(config, cli.json),
    };

    if let Err(err) = result {
        logbridge::cli::handle_error(err, cli.json);
    }
}
