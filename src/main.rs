use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;
use weatherlog::config::LoggingConfig;
use weatherlog::{
    JsonFileStore, MetNoClient, ReportOutcome, WeatherLogApp, WeatherLogConfig, shell,
};

#[derive(Parser)]
#[command(
    name = "weatherlog",
    version,
    about = "Personal weather log with forecast reports",
    long_about = "Record daily temperatures to a local JSON log and view reports based on the MET Norway forecast API. Runs an interactive menu when no command is given."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Weather log file override
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Log a temperature reading for today
    Log {
        /// Temperature in Celsius
        #[arg(allow_hyphen_values = true)]
        temperature: String,
    },

    /// Print every logged reading
    History,

    /// Show a day, week or month report
    Report {
        #[command(subcommand)]
        period: ReportCommand,
    },

    /// Average, minimum and maximum temperature of the forecast
    Forecast {
        /// First day of the period (yyyy-MM-dd)
        #[arg(long, requires = "end")]
        start: Option<String>,

        /// Last day of the period (yyyy-MM-dd)
        #[arg(long, requires = "start")]
        end: Option<String>,
    },
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Temperature for one date
    Day {
        /// Date of the report (yyyy-MM-dd)
        date: String,
    },
    /// Weekly report
    Week,
    /// Monthly report
    Month,
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let default_level = if verbose { "debug" } else { logging.level.as_str() };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if logging.format == "compact" {
        builder.compact().init();
    } else {
        builder.pretty().init();
    }
}

fn load_config(cli: &Cli) -> Result<WeatherLogConfig> {
    let mut config = WeatherLogConfig::load_from_path(cli.config.clone())
        .with_context(|| "Failed to load configuration")?;
    if let Some(log_file) = &cli.log_file {
        config.storage.log_file = log_file.clone();
    }
    Ok(config)
}

fn report_exit(outcome: &ReportOutcome) -> ExitCode {
    println!("{outcome}");
    if outcome.is_rendered() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn execute(
    app: &WeatherLogApp<JsonFileStore, MetNoClient>,
    command: Command,
) -> weatherlog::Result<ExitCode> {
    match command {
        Command::Log { temperature } => {
            let entry = app.log_temperature(&temperature)?;
            println!("Weather data logged successfully: {entry}");
        }
        Command::History => {
            let entries = app.history()?;
            if entries.is_empty() {
                println!("No log data available.");
            }
            for entry in entries {
                println!("{entry}");
            }
        }
        Command::Report { period } => {
            let outcome = match period {
                ReportCommand::Day { date } => app.day_report(&date).await?,
                ReportCommand::Week => app.week_report(),
                ReportCommand::Month => app.month_report(),
            };
            return Ok(report_exit(&outcome));
        }
        Command::Forecast { start, end } => {
            let summary = app
                .forecast_summary(start.as_deref(), end.as_deref())
                .await?;
            println!("{summary}");
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging, cli.verbose);
    debug!(log_file = %config.storage.log_file.display(), "Configuration loaded");

    let client = match MetNoClient::new(&config.weather) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };
    let app = WeatherLogApp::new(JsonFileStore::new(&config.storage.log_file), client);

    match cli.command {
        None => {
            let stdin = io::stdin();
            match shell::run(&app, stdin.lock(), io::stdout()).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!("Terminal I/O failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Some(command) => match execute(&app, command).await {
            Ok(code) => code,
            Err(e) => {
                if e.is_fetch_failure() {
                    warn!("{}", e);
                } else {
                    error!("{}", e);
                }
                eprintln!("{}", e.user_message());
                ExitCode::FAILURE
            }
        },
    }
}
