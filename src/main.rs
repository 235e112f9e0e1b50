use clap::Parser;
use catalog::cli::commands::Cli;
use catalog::cli::handlers;
use catalog::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();

    let config = match handlers::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        None => {
            // No subcommand → launch TUI. Logs go to a file so they don't
            // tear the screen.
            let guard = logging::init_file_logging(&config_io::state_dir());
            if let Err(e) = catalog::tui::run(config) {
                tracing::error!("{}", e);
                // exit() skips destructors; flush the log writer first
                drop(guard);
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            logging::init_stderr_logging();
            if let Err(e) = handlers::dispatch(cli, config) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
