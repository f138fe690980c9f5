use anyhow::{bail, Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64,  // seconds
    pub refresh_token_expiry: i64, // seconds
}

impl JwtConfig {
    fn parse_expiry(key: &str, default: &str) -> Result<i64> {
        let raw = env::var(key).unwrap_or_else(|_| default.to_string());
        raw.parse::<i64>()
            .with_context(|| format!("Invalid {} value: {}", key, raw))
    }

    /// Access tokens live for days so couriers in the field are not signed out mid-route.
    pub fn from_env() -> Result<Self> {
        let secret_key = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        // HS256 requires at least 32 bytes
        if secret_key.len() < 32 {
            bail!("JWT_SECRET must be at least 32 characters long for HS256 algorithm");
        }

        let access_token_expiry = Self::parse_expiry("JWT_ACCESS_EXPIRY", "259200")?;
        let refresh_token_expiry = Self::parse_expiry("JWT_REFRESH_EXPIRY", "2592000")?;

        Self::validate_expiry(access_token_expiry, refresh_token_expiry)?;

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "courier-backend".to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
            refresh_token_expiry,
        })
    }

    fn validate_expiry(access: i64, refresh: i64) -> Result<()> {
        if access <= 0 {
            bail!("JWT_ACCESS_EXPIRY must be a positive number of seconds");
        }
        if refresh <= access {
            bail!("JWT_REFRESH_EXPIRY must be greater than JWT_ACCESS_EXPIRY");
        }
        Ok(())
    }
}
