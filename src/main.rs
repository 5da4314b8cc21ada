use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use training_readiness::{
  classify, db, ActivityService, AppConfig, SqliteStore, StravaClient, SystemClock,
  TrainingLoadSnapshot,
};

#[derive(Parser)]
#[command(name = "training-readiness", version, about = "Training readiness and cached activity data")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Classify readiness from training-load metrics
  Classify {
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    ctl: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    atl: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    tsb: f64,
  },
  /// Show recent activities, served from cache when fresh
  Activities {
    /// Owner identity the cache entry belongs to
    #[arg(long)]
    owner: String,
    /// Strava access token (defaults to STRAVA_ACCESS_TOKEN)
    #[arg(long)]
    token: Option<String>,
  },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Command::Classify { ctl, atl, tsb } => {
      let classification = classify(&TrainingLoadSnapshot::new(ctl, atl, tsb));
      println!("{}", serde_json::to_string_pretty(&classification)?);
    }
    Command::Activities { owner, token } => {
      let config = AppConfig::from_env()?;
      let access_token = config.access_token(token)?;

      let pool = db::initialize_db(&config.database_url).await?;
      let service = ActivityService::new(
        SqliteStore::new(pool.clone()),
        StravaClient::new(&config.strava_api_base, config.strava_per_page),
        SystemClock,
      );

      let feed = service.recent_activities(&owner, &access_token).await?;
      println!("{}", serde_json::to_string_pretty(&feed)?);

      pool.close().await;
    }
  }

  Ok(())
}
