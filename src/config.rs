/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、Auth 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub db_reset: bool,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // Identity-provider settings. All of domain/issuer/audience/algorithm are
    // required; the process must fail to start rather than fall back.
    pub auth_domain: String,
    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_algorithm: Algorithm,
    pub auth_leeway_seconds: u64,

    pub jwks_timeout: Duration,
    pub jwks_min_refresh_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        // Opt-in parity with the original deployment, which recreated the
        // schema on every boot. Off by default.
        let db_reset = std::env::var("DB_RESET")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_domain =
            std::env::var("AUTH_DOMAIN").map_err(|_| ConfigError::Missing("AUTH_DOMAIN"))?;

        let auth_issuer =
            std::env::var("AUTH_ISSUER").map_err(|_| ConfigError::Missing("AUTH_ISSUER"))?;

        let auth_audience =
            std::env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;

        let auth_algorithm = std::env::var("AUTH_ALGORITHM")
            .map_err(|_| ConfigError::Missing("AUTH_ALGORITHM"))?
            .parse::<Algorithm>()
            .map_err(|_| ConfigError::Invalid("AUTH_ALGORITHM"))?;

        // Key material comes from the provider's JWKS document as RSA
        // components, so only the RSA family is accepted here.
        if !matches!(
            auth_algorithm,
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512
        ) {
            return Err(ConfigError::Invalid("AUTH_ALGORITHM"));
        }

        let auth_leeway_seconds = std::env::var("AUTH_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let jwks_timeout = std::env::var("JWKS_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        let jwks_min_refresh_interval = std::env::var("JWKS_MIN_REFRESH_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            addr,
            database_url,
            db_reset,
            app_env,
            cors_allowed_origins,
            auth_domain,
            auth_issuer,
            auth_audience,
            auth_algorithm,
            auth_leeway_seconds,
            jwks_timeout,
            jwks_min_refresh_interval,
        })
    }

    /// JWKS endpoint published by the identity provider.
    pub fn jwks_url(&self) -> String {
        format!(
            "https://{}/.well-known/jwks.json",
            self.auth_domain.trim_end_matches('/')
        )
    }
}
