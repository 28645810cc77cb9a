//! Forchetta Application CLI

use std::{path::PathBuf, process, time::Duration};

use clap::{Args, Parser, Subcommand};
use forchetta_app::{
    context::AppContext,
    domain::meals::{MealsService, data::MealInput, records::COMMON_RESTAURANT_ID},
    settings::{AppSettings, StoreSettings},
};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "forchetta-app", about = "Forchetta CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Meals(MealsCommand),
}

#[derive(Debug, Args)]
struct MealsCommand {
    #[command(subcommand)]
    command: MealsSubcommand,
}

#[derive(Debug, Subcommand)]
enum MealsSubcommand {
    /// Load shared common dishes from a JSON array
    SeedCommon(SeedCommonArgs),
}

#[derive(Debug, Args)]
struct SeedCommonArgs {
    /// JSON file holding an array of dishes
    #[arg(long)]
    file: PathBuf,

    /// PostgreSQL connection string; the JSON-file store is used when omitted
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Directory of the JSON-file store
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Seconds to wait for PostgreSQL before falling back to the file store
    #[arg(long, env = "DATABASE_CONNECT_TIMEOUT_SECONDS", default_value_t = 5)]
    connect_timeout: u64,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Meals(MealsCommand {
            command: MealsSubcommand::SeedCommon(args),
        }) => seed_common(args).await,
    }
}

async fn seed_common(args: SeedCommonArgs) -> Result<(), String> {
    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.file.display()))?;

    let Value::Array(dishes) = serde_json::from_str::<Value>(&raw)
        .map_err(|error| format!("failed to parse {}: {error}", args.file.display()))?
    else {
        return Err("expected a JSON array of dishes".to_string());
    };

    let settings = AppSettings {
        store: StoreSettings {
            database_url: args.database_url,
            connect_timeout: Duration::from_secs(args.connect_timeout),
            data_dir: args.data_dir,
            ..StoreSettings::default()
        },
        ..AppSettings::default()
    };

    let context = AppContext::connect(&settings)
        .await
        .map_err(|error| format!("failed to open store: {error}"))?;

    println!("store: {}", context.backend.as_str());

    for (index, dish) in dishes.iter().enumerate() {
        let mut input = MealInput::from_json(dish)
            .map_err(|error| format!("dish #{index}: {error}"))?;

        input.restaurant_id = Some(COMMON_RESTAURANT_ID.to_string());
        input.idmeals = None;

        let meal = context
            .meals
            .create_meal(input)
            .await
            .map_err(|error| format!("dish #{index}: {error}"))?;

        println!("{}\t{}\t{}", meal.idmeals, meal.nome, meal.prezzo);
    }

    Ok(())
}
