use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

use panchang_scraper::application::{
    ApiHandler, ApiResponse, AstroService, DailyRequest, Endpoint, HoroscopeRequest, ResponseCache,
};
use panchang_scraper::infrastructure::{init_logging_with_config, AppConfig, ConfigManager, HttpClient};

#[derive(Parser)]
#[command(name = "panchang-scraper")]
#[command(version, about = "Extract panchang, choghadiya, rahu-kaal and horoscope data as JSON")]
struct Cli {
    /// Configuration file (JSON or TOML); defaults to the user config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write JSON here instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Day panchang
    Panchang(DailyArgs),
    /// Choghadiya muhurta windows
    Choghadiya(DailyArgs),
    /// Rahu-kaal timing
    RahuKaal(DailyArgs),
    /// Daily horoscope for one sign
    Horoscope(HoroscopeArgs),
    /// Write the default configuration to a file
    ConfigInit {
        /// Target path; defaults to the user config dir
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Args)]
struct DailyArgs {
    /// Date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<String>,

    /// Language: en or hi
    #[arg(long)]
    lang: Option<String>,

    /// Extract from a saved HTML file instead of fetching
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct HoroscopeArgs {
    /// Zodiac sign, e.g. aries
    #[arg(long)]
    sign: Option<String>,

    /// yesterday, today or tomorrow
    #[arg(long)]
    day: Option<String>,

    #[command(flatten)]
    daily: DailyArgs,
}

impl DailyArgs {
    fn query(&self) -> HashMap<String, String> {
        let mut query = HashMap::new();
        if let Some(date) = &self.date {
            query.insert("date".to_string(), date.clone());
        }
        if let Some(lang) = &self.lang {
            query.insert("lang".to_string(), lang.clone());
        }
        query
    }
}

impl HoroscopeArgs {
    fn query(&self) -> HashMap<String, String> {
        let mut query = self.daily.query();
        if let Some(sign) = &self.sign {
            query.insert("sign".to_string(), sign.clone());
        }
        if let Some(day) = &self.day {
            query.insert("day".to_string(), day.clone());
        }
        query
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_logging_with_config(config.logging.clone())?;

    if let Command::ConfigInit { path } = &cli.command {
        let manager = match path {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new()?,
        };
        manager.save_config(&AppConfig::default()).await?;
        println!("{}", manager.config_path().display());
        return Ok(());
    }

    let service = AstroService::from_config(&config)?;
    let cache = ResponseCache::from_config(&config.cache);
    let json = match &cli.command {
        Command::Panchang(args) => run_daily(service, cache, Endpoint::Panchang, args).await?,
        Command::Choghadiya(args) => run_daily(service, cache, Endpoint::Choghadiya, args).await?,
        Command::RahuKaal(args) => run_daily(service, cache, Endpoint::RahuKaal, args).await?,
        Command::Horoscope(args) => run_horoscope(service, cache, args).await?,
        Command::ConfigInit { .. } => return Ok(()),
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn run_daily(
    service: AstroService<HttpClient>,
    cache: Option<ResponseCache>,
    endpoint: Endpoint,
    args: &DailyArgs,
) -> Result<String> {
    let Some(file) = &args.file else {
        let handler = ApiHandler::new(service, cache);
        return respond(handler.handle(endpoint, &args.query()).await);
    };

    let markup = std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let request = DailyRequest::from_query(&args.query())?;
    match endpoint {
        Endpoint::Panchang => pretty(&service.panchang_from_markup(&request, &markup, None)?),
        Endpoint::Choghadiya => pretty(&service.choghadiya_from_markup(&request, &markup, None)?),
        Endpoint::RahuKaal => pretty(&service.rahu_kaal_from_markup(&request, &markup, None)?),
        Endpoint::Horoscope => bail!("horoscope takes its own arguments"),
    }
}

async fn run_horoscope(
    service: AstroService<HttpClient>,
    cache: Option<ResponseCache>,
    args: &HoroscopeArgs,
) -> Result<String> {
    let Some(file) = &args.daily.file else {
        let handler = ApiHandler::new(service, cache);
        return respond(handler.handle(Endpoint::Horoscope, &args.query()).await);
    };

    let markup = std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let request = HoroscopeRequest::from_query(&args.query())?;
    pretty(&service.horoscope_from_markup(&request, &markup, None)?)
}

/// Pretty-print a response body; non-2xx becomes an error carrying the body
fn respond(response: ApiResponse) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(&response.body).context("Response body is not JSON")?;
    let json = serde_json::to_string_pretty(&value)?;
    if response.is_success() {
        Ok(json)
    } else {
        bail!("request failed with status {}: {}", response.status, json)
    }
}

fn pretty<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
