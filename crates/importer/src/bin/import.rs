use clap::{Parser, Subcommand, ValueEnum};
use importer::{BatchValidator, HackathonSource, JsonFileSource, Seeder, ValidationReport};
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use storage::{
    dto::hackathon::HackathonFilterQuery,
    services::{CategoryMode, apply_filters},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hackmap-import")]
#[command(about = "HackMap hackathon data importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a raw JSON file and report rejected records
    Validate { file: PathBuf },
    /// Normalize and filter a raw JSON file, printing the result
    Preview {
        file: PathBuf,

        /// Comma separated category names
        #[arg(long)]
        categories: Option<String>,

        /// Comma separated continent names
        #[arg(long)]
        continents: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        weeks_ahead: Option<u32>,

        #[arg(long, value_enum)]
        category_mode: Option<ModeArg>,
    },
    /// Validate a raw JSON file and insert it into the database
    Seed {
        file: PathBuf,

        #[arg(long)]
        validate_only: bool,

        /// Abort when any record is rejected instead of skipping it
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Type,
    Tags,
}

impl From<ModeArg> for CategoryMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Type => CategoryMode::Type,
            ModeArg::Tags => CategoryMode::Tags,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "hackmap_import={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let today = chrono::Utc::now().date_naive();

    match cli.command {
        Commands::Validate { file } => {
            let report = load_and_validate(file, today).await?;
            report.ensure_valid()?;
            tracing::info!("✓ Validation successful!");
        }
        Commands::Preview {
            file,
            categories,
            continents,
            location,
            weeks_ahead,
            category_mode,
        } => {
            let query = HackathonFilterQuery {
                categories,
                continents,
                location,
                weeks_ahead,
                category_mode: category_mode.map(CategoryMode::from),
            };
            query.validate()?;

            let report = load_and_validate(file, today).await?;
            let hackathons = report.hackathons();
            let filter = query.to_filter_state();
            let visible = apply_filters(&hackathons, &filter, today);

            tracing::info!(
                "{} of {} hackathon(s) match the filter",
                visible.len(),
                hackathons.len()
            );
            println!("{}", serde_json::to_string_pretty(&visible)?);
        }
        Commands::Seed {
            file,
            validate_only,
            strict,
        } => {
            let report = load_and_validate(file, today).await?;
            if strict {
                report.ensure_valid()?;
            } else if !report.errors.is_empty() {
                tracing::warn!("Skipping {} rejected record(s)", report.errors.len());
            }
            tracing::info!("✓ Validation successful!");

            if validate_only {
                return Ok(());
            }

            let database_url = cli
                .database_url
                .ok_or("DATABASE_URL must be set to seed the database")?;

            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            let count = Seeder::new(&pool).seed(&report).await?;
            tracing::info!("✓ Seeded {} hackathon(s)", count);
        }
    }

    Ok(())
}

async fn load_and_validate(
    file: PathBuf,
    today: chrono::NaiveDate,
) -> Result<ValidationReport, Box<dyn std::error::Error>> {
    let source = JsonFileSource::new(file);
    tracing::info!("Loading raw hackathons from: {}", source.name());

    let values = source.load().await?;
    let report = BatchValidator::validate(values, today);

    report.log_warnings();
    report.log_errors();
    tracing::info!(
        "{} of {} record(s) accepted",
        report.records.len(),
        report.total
    );

    Ok(report)
}
