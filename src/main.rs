//! Main entry point for the chore-rota binary
//!
//! Loads the preference sheet, works out who is around this week, plans the
//! period and writes the history, the misery chart and the announcement.

use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chore_rota::adapters::{
    ConsolePrompter, FileHistoryStore, FileOutputWriter, FilePreferenceSource,
    HtmlNotificationRenderer, HttpPreferenceSource, ScriptedPrompter, SvgChartRenderer,
};
use chore_rota::application::{
    PlanPeriodCommand, PlanPeriodError, PlanPeriodHandler, PublishError, PublishPeriodCommand,
    PublishPeriodHandler, ResolveRosterError, ResolveRosterHandler,
};
use chore_rota::config::{
    AppConfig, ConfigError, PreferenceLocation, ValidationError as ConfigValidationError,
};
use chore_rota::domain::foundation::ItemId;
use chore_rota::domain::preferences::CostMetric;
use chore_rota::domain::rotation::CycleBaselineBuilder;
use chore_rota::logging::{self, LoggingError};
use chore_rota::ports::{PreferenceSource, SituationPrompter, SourceError};

/// Weekly chore rotation with preference-respecting swaps
#[derive(Parser)]
#[command(name = "chore-rota")]
#[command(about = "Assigns this week's chores and lets housemates trade for ones they prefer")]
pub struct Args {
    /// Date to plan for (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Comma-separated housemates away this week; skips the interactive prompt
    #[arg(long, value_delimiter = ',')]
    pub absent: Option<Vec<String>>,

    /// Comma-separated chores to skip this week; skips the interactive prompt
    #[arg(long, value_delimiter = ',')]
    pub skip: Option<Vec<String>>,

    /// Read preferences from a local tab-separated file instead of the configured source
    #[arg(long)]
    pub preferences_file: Option<PathBuf>,

    /// History file, overrides configuration
    #[arg(long)]
    pub history_file: Option<PathBuf>,

    /// Log filter directive (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Plan and publish without writing the history
    #[arg(long)]
    pub dry_run: bool,
}

/// Errors that end a run
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("Could not load preferences: {0}")]
    Source(#[from] SourceError),

    #[error("Could not settle who is here: {0}")]
    Roster(#[from] ResolveRosterError),

    #[error("Planning failed: {0}")]
    Plan(#[from] PlanPeriodError),

    #[error("Publishing failed: {0}")]
    Publish(#[from] PublishError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "Run failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), RunError> {
    let config = resolve_config(&args)?;
    logging::init_tracing(&config.logging)?;

    // Preferences
    let source = preference_source(&config)?;
    tracing::info!(source = %source.describe(), "Loading preferences");
    let model = source.load_model(&config.preferences.placeholder).await?;

    // Who and what this week
    let mut prompter = prompter(&args);
    let active = ResolveRosterHandler::new().handle(&model, prompter.as_mut())?;
    println!("\n");

    // Plan
    let calendar = config.rotation.calendar()?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let period = calendar.period_info(today);
    tracing::info!(
        %today,
        period = period.period_index,
        cycle = period.cycle_index,
        week = period.week_number(),
        "Planning period"
    );

    let placeholder = ItemId::new(config.preferences.placeholder.as_str())
        .map_err(|_| ConfigValidationError::EmptyPlaceholder)?;
    let builder = CycleBaselineBuilder::new(placeholder, config.rotation.weekly_rotating_items()?);
    let history_store = Arc::new(FileHistoryStore::new(&config.history.path));

    let plan = PlanPeriodHandler::new(history_store, builder)
        .handle(
            &model,
            PlanPeriodCommand {
                active,
                period,
                dry_run: args.dry_run,
            },
        )
        .await?;

    println!("Here's the initial condition");
    print!("{}", plan.initial);
    println!("Here's the final condition");
    print!("{}", plan.final_assignment);
    if let Ok(average) = CostMetric::average_cost(&model, &plan.final_assignment) {
        println!("Average misery: {:.3}", average);
    }

    // Publish
    let publisher = PublishPeriodHandler::new(
        Arc::new(SvgChartRenderer::new()),
        Arc::new(HtmlNotificationRenderer::new(
            config.preferences.editable_link(),
            config.output.sign_off.clone(),
        )),
        Arc::new(FileOutputWriter::new()),
    );
    let published = publisher
        .handle(
            &model,
            PublishPeriodCommand {
                plan,
                chart_path: config.output.chart_path.clone(),
                notification_path: config.output.notification_path.clone(),
            },
        )
        .await?;

    println!(
        "Wrote {} and {}",
        published.notification_path.display(),
        published.chart_path.display()
    );
    Ok(())
}

/// Configuration from the environment, with command line overrides applied
fn resolve_config(args: &Args) -> Result<AppConfig, RunError> {
    let mut config = AppConfig::load()?;

    if let Some(path) = &args.preferences_file {
        config.preferences.path = Some(path.clone());
    }
    if let Some(path) = &args.history_file {
        config.history.path = path.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    config.validate()?;
    Ok(config)
}

fn preference_source(config: &AppConfig) -> Result<Box<dyn PreferenceSource>, RunError> {
    match config.preferences.location() {
        Some(PreferenceLocation::File(path)) => Ok(Box::new(FilePreferenceSource::new(path))),
        Some(PreferenceLocation::Url(url)) => Ok(Box::new(HttpPreferenceSource::new(url)?)),
        None => Err(ConfigValidationError::MissingRequired(
            "preferences.url or preferences.path",
        )
        .into()),
    }
}

/// Answers from the command line when given, otherwise ask on the terminal
fn prompter(args: &Args) -> Box<dyn SituationPrompter> {
    if args.absent.is_some() || args.skip.is_some() {
        Box::new(ScriptedPrompter::once(
            args.absent.clone().unwrap_or_default(),
            args.skip.clone().unwrap_or_default(),
        ))
    } else {
        Box::new(ConsolePrompter::stdio())
    }
}
