use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use werkit_core::*;

#[derive(Parser)]
#[command(name = "werkit")]
#[command(about = "Plan exercises, workouts and a weekly training schedule", long_about = None)]
struct Cli {
    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dry run - load saved data but never write changes back
    #[arg(long)]
    dry_run: bool,
}

/// Replies on stdout, failures on stderr
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, message: &str) {
        println!("{}", message);
    }

    fn report_error(&mut self, message: &str) {
        eprintln!("✗ {}", message);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    werkit_core::logging::init_with_level(&config.logging.level);

    let data_file = config.data_file(cli.data_dir.as_deref());
    let json_store = JsonStore::open(&data_file)?;
    tracing::info!("Using data file {:?}", json_store.path());

    if cli.dry_run {
        let mut store = MemoryStore {
            saved: Some(json_store.load()?),
            saves: 0,
        };
        run_repl(&mut store)
    } else {
        let mut store = json_store;
        run_repl(&mut store)
    }
}

fn run_repl<S: Store>(store: &mut S) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    let mut reporter = ConsoleReporter;
    let mut session = Session::start(store, &mut reporter)?;

    if interactive {
        println!("Welcome to WerkIt! Type 'help' to see what you can do.");
    }

    let prompt = || {
        if interactive {
            print!("> ");
            let _ = io::stdout().flush();
        }
    };

    session.run(io::stdin().lock(), prompt)
}
