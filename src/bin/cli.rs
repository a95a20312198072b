use advocate_directory::{
    cli::{
        db::{db_generate, db_list, db_migrate, db_revert},
        seed::seed_advocates,
    },
    client::api::AdvocateClient,
    core::{db::connect_pool, telemetry::init_file_logging},
    settings::get_config,
    tui,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database related command
    Db(DbArgs),
    /// Browse advocates in the terminal
    Browse(BrowseArgs),
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    command: DbCommands,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Generate new migration file
    Generate { migration_name: String },
    /// List all migration
    List,
    /// Run all pending migration
    Migrate,
    /// Revert latest migration
    Revert,
    /// Insert generated advocates
    Seed {
        #[arg(short, long, default_value_t = 50)]
        count: u32,
    },
}

#[derive(Debug, Args)]
struct BrowseArgs {
    /// Base URL of the advocate service
    #[arg(long, env = "ADVOCATES_ENDPOINT", default_value = "http://localhost:8000")]
    endpoint: String,
    /// Path prefix the listing is mounted under
    #[arg(long, env = "ADVOCATES_PREFIX", default_value = "/api")]
    prefix: String,
    #[arg(long, default_value_t = 10)]
    page_size: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // clap reads ADVOCATES_* from the environment, so .env must be loaded first
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Db(db_args) => match &db_args.command {
            DbCommands::Generate { migration_name } => {
                println!("generate migration: {migration_name:?}");
                db_generate(migration_name).await?;
            }
            DbCommands::List => {
                println!("list migration");
                let config = get_config()?;
                db_list(&config).await?;
            }
            DbCommands::Migrate => {
                println!("run all pending migration");
                let config = get_config()?;
                db_migrate(&config).await?;
            }
            DbCommands::Revert => {
                println!("revert latest migration");
                let config = get_config()?;
                db_revert(&config).await?;
            }
            DbCommands::Seed { count } => {
                println!("seed {count} advocates");
                let config = get_config()?;
                let pool = connect_pool(&config).await?;
                let inserted = seed_advocates(&pool, *count).await?;
                println!("inserted {inserted} advocates");
            }
        },
        Commands::Browse(args) => {
            let config = get_config()?;
            // the terminal belongs to the table, so logs go to a file
            let _guard = init_file_logging(&config, "browse.log")?;
            let client = AdvocateClient::new(&args.endpoint, &args.prefix)?;
            tui::run(client, args.page_size).await?;
        }
    }
    Ok(())
}
