//! Workout Timer CLI - work/rest countdowns in the terminal
//!
//! The main thread is the UI thread: it owns the pane, runs every timer
//! sink and reads typed commands. The countdown ticks on a separate
//! ticker thread.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use crossbeam_channel::{select, unbounded, Sender};

use workout_timer::cli::{Cli, Commands, Display, InputError, PaneCommand, RunArgs, TimerPane};
use workout_timer::config::TimerConfig;
use workout_timer::dispatch::ui_queue;
use workout_timer::timer::TickerRuntime;

type Input = Result<PaneCommand, InputError>;

/// Main entry point
fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli) {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Executes the CLI command.
fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            let config = load_config(cli.config.as_deref(), &args)?;
            run_pane(config)?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Loads the config file and applies command-line overrides.
fn load_config(path: Option<&Path>, args: &RunArgs) -> Result<TimerConfig> {
    let config = TimerConfig::load_or_default(path).context("Failed to load configuration")?;
    let config = args.apply_to(config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Runs the interactive pane until the user quits.
fn run_pane(config: TimerConfig) -> Result<()> {
    let mut ticker = TickerRuntime::start().context("Failed to start the countdown ticker")?;
    let (dispatcher, ui) = ui_queue();
    let (input_tx, input_rx) = unbounded::<Input>();

    spawn_stdin_reader(input_tx.clone())?;
    spawn_ctrl_c_watcher(&ticker, input_tx);

    Display::show_banner(&config);
    Display::show_help(config.adjust_step_seconds);

    let pane = TimerPane::new(config, ticker.handle(), dispatcher);

    loop {
        select! {
            recv(ui.receiver()) -> job => match job {
                Ok(job) => job(),
                Err(_) => break,
            },
            recv(input_rx) -> input => match input {
                Ok(Ok(command)) => {
                    if !pane.handle(command) {
                        break;
                    }
                }
                Ok(Err(e)) => Display::show_error(&e.to_string()),
                Err(_) => break,
            },
        }
    }

    pane.shutdown();
    ticker.shutdown();
    println!();
    tracing::info!("Timer closed");
    Ok(())
}

/// Reads typed commands on a helper thread; end of input quits.
fn spawn_stdin_reader(tx: Sender<Input>) -> Result<()> {
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line.parse()).is_err() {
                    return;
                }
            }
            let _ = tx.send(Ok(PaneCommand::Quit));
        })
        .context("Failed to spawn stdin reader")?;
    Ok(())
}

/// Turns Ctrl-C into a quit command for the UI loop.
fn spawn_ctrl_c_watcher(ticker: &TickerRuntime, tx: Sender<Input>) {
    ticker.handle().spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl-C received");
            let _ = tx.send(Ok(PaneCommand::Quit));
        }
    });
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
