mod config;
mod crm;
mod storage;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::crm::{CrmDependencies, Person, PersonService};

/// recordstore - persist person records in a pluggable backing store
#[derive(Parser, Debug)]
#[command(name = "recordstore")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a person record
    Add {
        /// Identity; a random one is generated when omitted
        #[arg(long)]
        id: Option<Uuid>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        /// Birth date as YYYY-MM-DD
        #[arg(long)]
        birth_date: Option<NaiveDate>,
    },
    /// Fetch a person record by identity
    Get { id: Uuid },
    /// Delete a person record by identity
    Delete { id: Uuid },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recordstore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::settings_from_env()?;
    let repository = storage::create_repository(&settings).await?;
    let service = PersonService::new(repository, CrmDependencies::new(reqwest::Client::new()));

    match cli.command {
        Command::Add {
            id,
            first_name,
            last_name,
            email,
            phone_number,
            birth_date,
        } => {
            let person = Person {
                id: id.unwrap_or_else(Uuid::new_v4),
                first_name,
                last_name,
                email,
                phone_number,
                birth_date,
            };
            service.add_person(&person).await?;
            println!("{}", person.id);
        }
        Command::Get { id } => match service.get_person_or_default(id).await? {
            Some(person) => println!("{}", serde_json::to_string_pretty(&person)?),
            None => println!("not found"),
        },
        Command::Delete { id } => {
            service.delete_person(id).await?;
        }
    }

    Ok(())
}
