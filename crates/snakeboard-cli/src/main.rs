// Draft board entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file; stdout carries the board)
// 2. Load config (path argument, or config/board.toml seeded from defaults/)
// 3. Open the state store, if persistence is enabled
// 4. Build the draft and recover a saved session
// 5. Read commands from stdin until quit or EOF

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use tracing::{error, info};

use snakeboard_cli::app::{App, Outcome};
use snakeboard_cli::command::{parse_command, ParseError, UserCommand};
use snakeboard_cli::storage;
use snakeboard_core::config;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Draft board starting up");

    // 2. Load config
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => config::load_config_from(&path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => config::load_config().context("failed to load configuration")?,
    };
    info!(
        "Config loaded: '{}', {} teams, {} players, {} rounds",
        config.application.title,
        config.teams.len(),
        config.players.len(),
        config.total_rounds()
    );

    // 3. Open the state store
    let store = storage::open_store(&config.storage).context("failed to open state store")?;
    if store.is_none() {
        info!("Persistence disabled, every session starts fresh");
    }

    // 4. Build the draft and recover
    let mut app = App::new(&config, store)?;
    match app.recover() {
        Ok(true) => info!("Draft state restored from previous session"),
        Ok(false) => info!("Starting fresh draft session"),
        Err(e) => {
            error!("Recovery failed: {:#}", e);
            return Err(e.context("recovery failed"));
        }
    }

    // 5. Command loop
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{}", app.title());
    if let Outcome::Show(text) = app.handle(UserCommand::ShowBoard) {
        println!("{text}");
    }
    println!("Type `help` for commands.");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match app.handle(cmd) {
            Outcome::Show(text) => println!("{text}"),
            Outcome::Rejected(reason) => println!("Not done: {reason}"),
            Outcome::Quit => break,
        }
    }

    info!("Draft board shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which shows the board).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("snakeboard.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("snakeboard=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
