use crate::error::AppError;
use crate::models::rates::RateConfiguration;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

/// Common HTTP server settings, loadable from `configuration.*` files or
/// `APP`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl CommonConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub common: CommonConfig,
    pub sheet: SheetConfig,
    pub google: GoogleConfig,
    pub rates: RateConfiguration,
}

/// Spreadsheet-backed system of record (Apps Script web endpoint).
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub endpoint_url: String,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Empty key means no Gemini access; the service falls back to the
    /// mock text provider.
    pub api_key: String,
    pub text_model: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = CommonConfig::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let administrative: Decimal = parse_rate(&get_env(
            "ADMINISTRATIVE_FEE_PCT",
            Some("2.7"),
            is_prod,
        )?)?;
        let commission: Decimal = parse_rate(&get_env("COMMISSION_FEE_PCT", Some("5.0"), is_prod)?)?;

        // Negative or malformed rates are a startup failure, not something
        // the calculator should ever see.
        let rates = RateConfiguration::new(administrative, commission)
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        Ok(AppConfig {
            common,
            sheet: SheetConfig {
                endpoint_url: get_env("SHEET_ENDPOINT_URL", None, is_prod)?,
            },
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", Some(""), is_prod)?,
                text_model: get_env("GENAI_TEXT_MODEL", Some("gemini-2.5-flash"), is_prod)?,
            },
            rates,
        })
    }
}

fn parse_rate(raw: &str) -> Result<Decimal, AppError> {
    raw.parse::<Decimal>().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("invalid percentage rate '{}': {}", raw, e))
    })
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
