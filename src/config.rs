use std::env;

pub const DEFAULT_SCRIPT_CDN: &str = "https://cdn.jsdelivr.net";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub script_cdn: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(10);
        let script_cdn = env::var("CSP_SCRIPT_CDN")
            .ok()
            .map(|cdn| cdn.trim().trim_end_matches('/').to_string())
            .filter(|cdn| !cdn.is_empty())
            .unwrap_or_else(|| DEFAULT_SCRIPT_CDN.to_string());
        Ok(Self {
            port,
            database_url,
            host,
            max_connections,
            script_cdn,
        })
    }

    /// Value of the `Content-Security-Policy` header sent with every response.
    pub fn content_security_policy(&self) -> String {
        content_security_policy(&self.script_cdn)
    }
}

pub fn content_security_policy(script_cdn: &str) -> String {
    format!("script-src 'self' {script_cdn}")
}
