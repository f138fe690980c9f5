use anyhow::{Context, Result};
use std::env;

use crate::auth::adapter::outgoing::jwt::JwtConfig;

/// Loads `.env.{RUST_ENV}` when present, falling back to `.env`.
pub fn load_env_files() -> String {
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    let env_file = format!(".env.{}", rust_env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    rust_env
}

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone)]
pub enum SmtpConfig {
    /// Local catcher such as Mailpit, no TLS and no credentials.
    Local { host: String, port: u16 },
    Relay {
        server: String,
        username: String,
        password: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rust_env: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub app_base_url: String,
    pub email_from: String,
    pub pool: PoolConfig,
    pub smtp: SmtpConfig,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env(rust_env: String) -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("PORT", 8080u16)?;
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let app_base_url =
            env::var("APP_BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let email_from = env::var("EMAIL_FROM").context("EMAIL_FROM is not set")?;

        let pool = PoolConfig {
            max_connections: parse_var("DB_MAX_CONNECTIONS", 50u32)?,
            min_connections: parse_var("DB_MIN_CONNECTIONS", 10u32)?,
        };

        let smtp = if rust_env == "test" {
            SmtpConfig::Local {
                host: env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
                port: parse_var("SMTP_PORT", 1025u16)?,
            }
        } else {
            SmtpConfig::Relay {
                server: env::var("SMTP_SERVER").context("SMTP_SERVER is not set")?,
                username: env::var("SMTP_USERNAME").context("SMTP_USERNAME is not set")?,
                password: env::var("SMTP_PASSWORD").context("SMTP_PASSWORD is not set")?,
            }
        };

        let jwt = JwtConfig::from_env()?;

        Ok(Self {
            rust_env,
            host,
            port,
            database_url,
            app_base_url,
            email_from,
            pool,
            smtp,
            jwt,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub(crate) fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid {} value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_uses_default_when_missing() {
        let value: u16 = parse_var("COURIER_TEST_UNSET_PORT", 4242).unwrap();
        assert_eq!(value, 4242);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        env::set_var("COURIER_TEST_BAD_PORT", "not-a-port");
        let result: Result<u16> = parse_var("COURIER_TEST_BAD_PORT", 1);
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("COURIER_TEST_BAD_PORT"));
    }
}
