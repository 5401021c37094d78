use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use researchdesk_cli::commands;
use researchdesk_config::{NavigationConfig, StoreBackend, StoreConfig};
use researchdesk_db::connect_store;
use researchdesk_observability::init_cli_logging;
use researchdesk_permissions::{PermissionSession, PermissionStore, TableOrigin};

#[derive(Parser)]
#[command(name = "researchdesk-cli")]
#[command(about = "ResearchDesk CLI - Navigation permission administration", long_about = None)]
struct Cli {
    /// Store backend; overrides PERMISSION_STORE
    #[arg(long, global = true)]
    store: Option<StoreBackend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the table, seeding the store with defaults when it is empty
    Seed,
    /// Replace the whole table with the generated defaults
    Reset {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Show the resolved access for one job title and navigation item
    Check {
        job_title: String,
        navigation_item: String,
    },
    /// Show the navigation menu a job title sees
    Menu { job_title: String },
    /// Set the access level (hide, view, edit) for one pair
    Set {
        job_title: String,
        navigation_item: String,
        access_level: String,
    },
    /// Write the current table to a JSON file
    Export { path: PathBuf },
    /// Replace the stored table with a JSON file
    Import { path: PathBuf },
}

async fn open_session(store: Arc<dyn PermissionStore>) -> PermissionSession {
    PermissionSession::start(store, &NavigationConfig::from_env()).await
}

fn describe_origin(origin: TableOrigin) -> String {
    match origin {
        TableOrigin::Store { records } => format!("loaded {} records from the store", records),
        TableOrigin::Defaults { seeded: true } => "store was empty, seeded defaults".to_string(),
        TableOrigin::Defaults { seeded: false } => {
            "store unavailable, using defaults in memory only".to_string()
        }
        TableOrigin::Local => "local changes".to_string(),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut store_config = StoreConfig::from_env();
    if let Some(backend) = cli.store {
        store_config = store_config.with_backend(backend);
    }
    let store = connect_store(&store_config).await?;

    match cli.command {
        Commands::Seed => {
            let session = open_session(store).await;
            println!("✅ {} ({})", describe_origin(session.origin()), session.backend());
            session.close().await;
        }
        Commands::Reset { yes } => {
            let confirmed = yes
                || Confirm::new()
                    .with_prompt("Replace every navigation permission with the defaults?")
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("Aborted.");
                return Ok(());
            }

            let session = open_session(store).await;
            let count = commands::reset(&session).await?;
            println!("✅ Reset {} navigation permissions to defaults", count);
            session.close().await;
        }
        Commands::Check {
            job_title,
            navigation_item,
        } => {
            let session = open_session(store).await;
            let decision = commands::check(&session, &job_title, &navigation_item);
            println!("{}", commands::format_decision(&decision));
            session.close().await;
        }
        Commands::Menu { job_title } => {
            let session = open_session(store).await;
            let entries = commands::menu(&session, &job_title);
            println!("Menu for {} ({} sections):", job_title, entries.len());
            println!("{}", commands::format_menu(&entries));
            session.close().await;
        }
        Commands::Set {
            job_title,
            navigation_item,
            access_level,
        } => {
            let session = open_session(store).await;
            let decision =
                commands::set(&session, &job_title, &navigation_item, &access_level).await?;
            println!("✅ {}", commands::format_decision(&decision));
            session.close().await;
        }
        Commands::Export { path } => {
            let session = open_session(store).await;
            let count = commands::export(&session, &path).await?;
            println!("✅ Exported {} records to {}", count, path.display());
            session.close().await;
        }
        Commands::Import { path } => {
            let session = open_session(store).await;
            let count = commands::import(&session, &path).await?;
            println!("✅ Imported {} records from {}", count, path.display());
            session.close().await;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_cli_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}
