use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use moocnotify::config::{Config, EmailConfig};
use moocnotify::daemon::{JobRunner, Scheduler};
use moocnotify::extract::DeadlineChecker;
use moocnotify::mooc::{MoocClient, MoocClientConfig};
use moocnotify::notify::{ConsoleTransport, DeliveryCoordinator, DeliveryOutcome, MailTransport, PendingQueue, SmtpMailer};

mod cli;

use cli::Cli;
use cli::commands::Commands;

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moocnotify")
        .join("logs")
}

/// Create the log directory and open the log file for appending
fn open_log_file(log_dir: &Path) -> Result<(PathBuf, fs::File)> {
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("moocnotify.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .context("Failed to open log file")?;
    Ok((log_file, file))
}

fn setup_logging(to_stderr: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    // Without RUST_LOG the config's log_level decides, via log::set_max_level
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(LevelFilter::Trace);
    }

    if to_stderr {
        builder.target(env_logger::Target::Stderr).init();
        return;
    }

    let log_dir = default_log_dir();
    match open_log_file(&log_dir) {
        Ok((log_file, file)) => {
            builder.target(env_logger::Target::Pipe(Box::new(file))).init();
            info!("Logging initialized, writing to: {}", log_file.display());
        }
        Err(e) => {
            builder.target(env_logger::Target::Stderr).init();
            warn!(
                "Cannot log to {} ({}: {}), logging to stderr",
                log_dir.display(),
                e,
                e.root_cause()
            );
        }
    }
}

fn apply_log_level(config: &Config) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    let level = config
        .log_level
        .as_deref()
        .and_then(|l| LevelFilter::from_str(l).ok())
        .unwrap_or(LevelFilter::Info);
    log::set_max_level(level);
}

fn email_is_sendable(email: &EmailConfig) -> bool {
    email.enabled && !email.recipients.is_empty()
}

fn build_transport(config: &Config) -> Result<Arc<dyn MailTransport>> {
    if email_is_sendable(&config.email) {
        let mailer = SmtpMailer::new(&config.smtp).context("Failed to set up SMTP transport")?;
        Ok(Arc::new(mailer))
    } else {
        // The coordinator skips delivery in this case
        Ok(Arc::new(ConsoleTransport))
    }
}

fn build_checker(config: &Config) -> Result<DeadlineChecker> {
    let client = MoocClient::new(MoocClientConfig::from(&config.mooc)).context("Failed to create MOOC client")?;
    Ok(DeadlineChecker::new(
        Arc::new(client),
        config.mooc.term_ids.clone(),
        config.mooc.reminder_hours.clone(),
    ))
}

fn build_runner(config: &Config) -> Result<JobRunner> {
    let coordinator = DeliveryCoordinator::new(
        Arc::new(PendingQueue::new()),
        build_transport(config)?,
        config.email.clone(),
    );
    Ok(JobRunner::new(build_checker(config)?, coordinator))
}

/// User-facing summary of a one-off check; its queue dies with the process
fn outcome_message(outcome: &DeliveryOutcome) -> String {
    match outcome {
        DeliveryOutcome::Delivered { recipients, reminders } => format!(
            "{} {} reminder(s) to {} recipient(s)",
            "Sent:".green(),
            reminders,
            recipients
        ),
        DeliveryOutcome::Requeued { reminders } => format!(
            "{} delivery failed, {} reminder(s) not sent (see log)",
            "Failed:".red(),
            reminders
        ),
        DeliveryOutcome::NothingToSend => "No homework needs a reminder right now".cyan().to_string(),
        DeliveryOutcome::Disabled => "Email notifications are disabled".yellow().to_string(),
        DeliveryOutcome::NoRecipients => "No recipients configured (email.recipients)".yellow().to_string(),
    }
}

async fn handle_run_command(config: &Config) -> Result<()> {
    info!("Starting scheduler");
    println!("{}", "Starting moocnotify scheduler (Ctrl-C to stop)...".cyan());

    let scheduler = Scheduler::new(Arc::new(build_runner(config)?), config.schedule.clone());
    scheduler
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Shutdown requested");
        })
        .await;

    println!("{}", "Scheduler stopped".cyan());
    Ok(())
}

async fn handle_check_command(dry_run: bool, json: bool, config: &Config) -> Result<()> {
    let now = chrono::Local::now();

    if !dry_run {
        let outcome = build_runner(config)?.run_once(now).await;
        println!("{}", outcome_message(&outcome));
        return Ok(());
    }

    let fresh = build_checker(config)?.check(now).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&fresh).context("Failed to serialize reminders")?);
        return Ok(());
    }

    // Render exactly what would be sent, without touching SMTP
    let mut email = config.email.clone();
    email.enabled = true;
    if email.recipients.is_empty() {
        email.recipients = vec!["<no recipients configured>".to_string()];
    }
    let coordinator = DeliveryCoordinator::new(Arc::new(PendingQueue::new()), Arc::new(ConsoleTransport), email);
    if coordinator.send_reminders(&fresh).await == DeliveryOutcome::NothingToSend {
        println!("{}", "No homework needs a reminder right now".cyan());
    }
    Ok(())
}

fn handle_config_command(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(&config.redacted()).context("Failed to serialize config")?;
    print!("{}", yaml);
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Run => handle_run_command(config).await,
        Commands::Check { dry_run, json } => handle_check_command(*dry_run, *json, config).await,
        Commands::Config => handle_config_command(config),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging first
    setup_logging(cli.log_stderr);

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_log_level(&config);
    config.validate().context("Invalid configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
