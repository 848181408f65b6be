use anyhow::Result;
use clap::{Parser, Subcommand};
use dedup_migrate_core::{Dialect, Direction, MigrationConfig};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dedup-migrate")]
#[command(
    about = "Deduplicate join tables and add unique constraints (revision dded3119c1fe)",
    long_about = None
)]
struct Cli {
    /// PostgreSQL URL, SQLite path or `sqlite:` URL
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Target engine; inferred from the URL scheme when omitted
    #[arg(long, env = "DEDUP_MIGRATE_DIALECT", global = true)]
    dialect: Option<Dialect>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove duplicate rows, then add the unique constraints and index
    Upgrade,
    /// Drop the unique constraints and index (removed rows are not restored)
    Downgrade,
    /// Print the SQL script without connecting
    Sql {
        #[arg(short, long, default_value = "up")]
        direction: Direction,
    },
    /// Print revision metadata as JSON
    Info,
}

impl Cli {
    fn config(&self) -> Result<MigrationConfig> {
        Ok(MigrationConfig::resolve(self.database_url.clone(), self.dialect)?)
    }

    fn offline_dialect(&self) -> Result<Dialect> {
        self.dialect
            .or_else(|| self.database_url.as_deref().map(Dialect::from_database_url))
            .ok_or_else(|| anyhow::anyhow!("--dialect or DATABASE_URL is required to render SQL"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(filter).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Upgrade => commands::migrate::upgrade(&cli.config()?).await?,
        Commands::Downgrade => commands::migrate::downgrade(&cli.config()?).await?,
        Commands::Sql { direction } => commands::sql::run(cli.offline_dialect()?, *direction),
        Commands::Info => commands::info::run()?,
    }

    Ok(())
}
