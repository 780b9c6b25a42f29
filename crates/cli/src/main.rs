//! Operational CLI for the medtrack store: schema version, migration
//! history, apply/revert, reset, and seeding.

mod alert;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use medtrack_core::alert::{Alert, AlertPresenter, Choice};
use medtrack_db::{schema, seed, DbPool, MIGRATOR};
use tracing_subscriber::EnvFilter;

use crate::alert::ConsolePresenter;

#[derive(Parser, Debug)]
#[command(name = "medtrack", about = "Equipment-maintenance store operations")]
struct Cli {
    /// Emit machine-readable JSON where applicable
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the current schema version and pending migration count
    Status,
    /// Show applied migration history
    History,
    /// Apply pending migrations
    Migrate,
    /// Revert the most recently applied migration
    Revert,
    /// Drop everything, re-apply migrations, and seed demo data
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Seed demo data into an empty, migrated database
    Seed {
        /// Clear existing data before seeding
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set (see .env)")?;
    let pool = medtrack_db::create_pool(&database_url)
        .await
        .context("failed to connect to the database")?;

    let presenter = ConsolePresenter;
    match cli.command {
        Commands::Status => status(&pool, cli.json).await,
        Commands::History => history(&pool, cli.json).await,
        Commands::Migrate => migrate(&pool, &presenter).await,
        Commands::Revert => revert(&pool, &presenter).await,
        Commands::Reset { yes } => reset(&pool, yes, &presenter).await,
        Commands::Seed { force } => run_seed(&pool, force, &presenter).await,
    }
}

async fn status(pool: &DbPool, json: bool) -> Result<()> {
    let current = schema::current_version(pool).await?;
    let latest = schema::latest_embedded_version();
    let pending = schema::pending_versions(pool).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "current_version": current,
                "latest_version": latest,
                "pending": pending.len(),
            })
        );
        return Ok(());
    }

    match current {
        Some(version) => println!("current version: {version}"),
        None => println!("current version: none (fresh database)"),
    }
    if let Some(latest) = latest {
        println!("latest embedded: {latest}");
    }
    println!("pending migrations: {}", pending.len());
    Ok(())
}

async fn history(pool: &DbPool, json: bool) -> Result<()> {
    let applied = schema::history(pool).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&applied)?);
        return Ok(());
    }

    if applied.is_empty() {
        println!("no migrations applied");
        return Ok(());
    }
    for migration in applied {
        let marker = if migration.success { "ok" } else { "FAILED" };
        println!(
            "{}  {}  [{}]  {}",
            migration.version, migration.description, marker, migration.installed_on
        );
    }
    Ok(())
}

async fn migrate(pool: &DbPool, presenter: &dyn AlertPresenter) -> Result<()> {
    let pending = schema::pending_versions(pool).await?;
    if pending.is_empty() {
        presenter.show(&Alert::info("Schema already up to date", None));
        return Ok(());
    }
    MIGRATOR.run(pool).await.context("migration failed")?;
    presenter.show(&Alert::success(
        "Migrations applied",
        Some(format!("{} migration(s)", pending.len())),
    ));
    Ok(())
}

async fn revert(pool: &DbPool, presenter: &dyn AlertPresenter) -> Result<()> {
    let applied = schema::history(pool).await?;
    let Some(last) = applied.last() else {
        presenter.show(&Alert::info("Nothing to revert", None));
        return Ok(());
    };

    // Undo down to the version before the last applied one.
    let target = applied
        .iter()
        .rev()
        .nth(1)
        .map(|m| m.version)
        .unwrap_or(0);
    MIGRATOR
        .undo(pool, target)
        .await
        .context("revert failed")?;
    presenter.show(&Alert::success(
        "Migration reverted",
        Some(format!("{} ({})", last.version, last.description)),
    ));
    Ok(())
}

async fn reset(pool: &DbPool, yes: bool, presenter: &dyn AlertPresenter) -> Result<()> {
    if !yes {
        let choice = presenter.confirm(&Alert::confirm(
            "Reset database",
            Some("This drops all data, re-applies migrations, and reseeds.".to_string()),
        ));
        if choice == Choice::Cancelled {
            presenter.show(&Alert::info("Reset cancelled", None));
            return Ok(());
        }
    }

    sqlx::query("DROP SCHEMA public CASCADE")
        .execute(pool)
        .await
        .context("failed to drop schema")?;
    sqlx::query("CREATE SCHEMA public")
        .execute(pool)
        .await
        .context("failed to recreate schema")?;
    MIGRATOR.run(pool).await.context("migration failed")?;

    match seed::run(pool, true).await {
        Ok(summary) => {
            presenter.show(&Alert::success(
                "Database reset",
                Some(format!(
                    "{} departments, {} users, {} equipment seeded",
                    summary.departments, summary.users, summary.equipment
                )),
            ));
            Ok(())
        }
        Err(err) => {
            presenter.show(&Alert::from(&err));
            bail!("seed failed: {err}");
        }
    }
}

async fn run_seed(pool: &DbPool, force: bool, presenter: &dyn AlertPresenter) -> Result<()> {
    match seed::run(pool, force).await {
        Ok(summary) => {
            presenter.show(&Alert::success(
                "Seed complete",
                Some(format!(
                    "{} departments, {} users, {} equipment, {} tickets",
                    summary.departments, summary.users, summary.equipment, summary.tickets
                )),
            ));
            Ok(())
        }
        Err(err) => {
            presenter.show(&Alert::from(&err));
            bail!("seed failed: {err}");
        }
    }
}
