use crate::feed::FeedSettings;
use dotenv::dotenv;
use std::env;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "un segreto meno bello";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub wwwroot: String,
    pub lookback_secs: i64,
    pub lookahead_secs: i64,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://coursefeed.db".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let wwwroot = env::var("WWWROOT")
            .unwrap_or_else(|_| "http://localhost".to_string())
            .trim_end_matches('/')
            .to_string();

        let lookback_secs = Self::horizon_from_env("FEED_LOOKBACK_SECS")?;
        let lookahead_secs = Self::horizon_from_env("FEED_LOOKAHEAD_SECS")?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            database_url,
            jwt_secret,
            server_host,
            server_port,
            max_connections,
            wwwroot,
            lookback_secs,
            lookahead_secs,
            app_env,
        })
    }

    /// Orizzonte della finestra temporale del feed, in secondi (default ~6 mesi)
    fn horizon_from_env(key: &str) -> Result<i64, String> {
        let raw = env::var(key).unwrap_or_else(|_| FeedSettings::DEFAULT_HORIZON_SECS.to_string());
        match raw.parse::<i64>() {
            Ok(secs) if secs >= 0 => Ok(secs),
            _ => Err(format!("Invalid {key}: must be a non-negative number of seconds")),
        }
    }

    /// Impostazioni del feed derivate dalla configurazione
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            wwwroot: self.wwwroot.clone(),
            lookback_secs: self.lookback_secs,
            lookahead_secs: self.lookahead_secs,
        }
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Server configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server Address: {}:{}", self.server_host, self.server_port);
        info!("   Database: {}", Self::mask_url(&self.database_url));
        info!("   Max DB Connections: {}", self.max_connections);
        info!("   Site root: {}", self.wwwroot);
        info!(
            "   Feed window: -{}s / +{}s",
            self.lookback_secs, self.lookahead_secs
        );
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("   JWT Secret: USING DEFAULT (INSECURE!)");
        } else {
            info!("   JWT Secret: custom secret configured");
        }
    }

    /// Maschera le credenziali nell'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        url.to_string()
    }
}
