use std::env;

use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: String,
    /// Origin the wallet frontend is served from.
    pub allowed_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3001".to_string());
        let allowed_origin =
            env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

        if !allowed_origin.starts_with("http") {
            return Err(AppError::Config(
                "ALLOWED_ORIGIN must be an absolute http(s) origin".to_string(),
            ));
        }

        Ok(Self {
            bind_address,
            allowed_origin,
        })
    }
}
