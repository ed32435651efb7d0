use clap::{Parser, Subcommand};
use daybook::{commands, config, journal, tui};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Default Configuration Constants
/// Default log level when not specified
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file path (no logging to file)
const DEFAULT_LOG_FILE: &str = "/dev/null";

#[derive(Parser)]
#[command(name = "daybook")]
#[command(
    about = "Infinite scrolling calendar with journal entries",
    long_about = "Infinite scrolling calendar with journal entries\n\nIf no command is specified, the program starts in interactive mode."
)]
struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, global = true, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Log file path (default: /dev/null for no logging)
    #[arg(short = 'F', long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Journal JSON file (overrides journals_file from the config)
    #[arg(short = 'J', long, global = true)]
    journals: Option<String>,

    /// Treat this date as today, in YYYY-MM-DD or DD/MM/YYYY format
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a month grid with its journals
    Month {
        /// Any date in the month, YYYY-MM-DD or DD/MM/YYYY (optional, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List all journals
    Journals,
    /// Display current configuration
    Config,
}

fn init_logging(log_level: &str, log_file: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", log_file, e);
            return;
        }
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Handle the config command - display current configuration
fn handle_config_command() {
    let cfg = config::read();

    let (path_str, exists) = match config::get_config_path() {
        Some(path) => {
            let exists = path.exists();
            (path.display().to_string(), exists)
        }
        None => ("Unable to determine config path".to_string(), false),
    };

    println!("Configuration File: {} (Exists: {})", path_str, if exists { "yes" } else { "no" });
    println!();
    println!("Current Configuration:");
    println!("=====================");
    println!("log_level: {}", cfg.log_level);
    println!("log_file: {}", cfg.log_file);
    println!(
        "journals_file: {}",
        cfg.journals_file.as_deref().unwrap_or("(bundled sample)")
    );
    println!("week_starts_on: {}", cfg.week_starts_on);
    println!();
    println!("[calendar]");
    println!("row_height: {}", cfg.calendar.row_height);
    println!("buffer_rows: {}", cfg.calendar.buffer_rows);
    println!("buffer_days: {}", cfg.calendar.buffer_days);
    println!("edge_threshold: {}", cfg.calendar.edge_threshold);
    println!("throttle_ms: {}", cfg.calendar.throttle_ms);
    println!("jump_cooldown_ms: {}", cfg.calendar.jump_cooldown_ms);
    println!("initial_weeks: {}", cfg.calendar.initial_weeks);
    println!("lead_weeks: {}", cfg.calendar.lead_weeks);
    match cfg.calendar.max_days {
        Some(max) => println!("max_days: {}", max),
        None => println!("max_days: unlimited"),
    }
    println!();
    println!("[display]");
    println!("use_unicode: {}", cfg.display.use_unicode);
    println!("selection_fg: {:?}", cfg.display.selection_fg);
    println!("unfocused_selection_fg: {:?}{}",
        cfg.display.unfocused_selection_fg(),
        if cfg.display.unfocused_selection_fg.is_none() { " (auto: 50% darker)" } else { "" }
    );
    println!("today_fg: {:?}", cfg.display.today_fg);
    println!("journal_fg: {:?}", cfg.display.journal_fg);
    println!("header_fg: {:?}", cfg.display.header_fg);
    println!("error_fg: {:?}", cfg.display.error_fg);
}

/// Resolve log configuration from CLI args and config file
/// CLI arguments take precedence over config file
fn resolve_log_config<'a>(cli: &'a Cli, config: &'a config::Config) -> (&'a str, &'a str) {
    let log_level = if cli.log_level != DEFAULT_LOG_LEVEL {
        cli.log_level.as_str()
    } else {
        config.log_level.as_str()
    };

    let log_file = if cli.log_file != DEFAULT_LOG_FILE {
        cli.log_file.as_str()
    } else {
        config.log_file.as_str()
    };

    (log_level, log_file)
}

async fn run(cli: Cli, config: config::Config) -> anyhow::Result<()> {
    let real_today = chrono::Local::now().date_naive();
    let today = commands::parse_date_arg(cli.today.as_deref(), real_today)?;
    let journals_file = cli.journals.as_deref().or(config.journals_file.as_deref());
    let provider = journal::provider_for(journals_file);
    tracing::info!("MAIN: today is {}, journals from {}", today, provider.describe());

    match cli.command {
        None => {
            tui::run(config, today, provider).await?;
            Ok(())
        }
        Some(Commands::Config) => unreachable!("Config command should be handled before run"),
        Some(Commands::Month { date }) => {
            commands::month::run(provider.as_ref(), date, today, &config).await
        }
        Some(Commands::Journals) => {
            commands::journals::run(provider.as_ref(), &config.display).await
        }
    }
}

#[tokio::main]
async fn main() {
    let config = config::read();
    let cli = Cli::parse();

    // Resolve and initialize logging
    let (log_level, log_file) = resolve_log_config(&cli, &config);
    if log_file != DEFAULT_LOG_FILE {
        init_logging(log_level, log_file);
    }

    // Handle Config command separately (doesn't read journals)
    if let Some(Commands::Config) = cli.command {
        handle_config_command();
        return;
    }

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {:#}", e);
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}
