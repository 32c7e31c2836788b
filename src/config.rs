//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct.

use std::fmt;

use serde::Deserialize;

use crate::gate::{ExemptPaths, GateConfig, ReferenceCredential};

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `GATE_PRINCIPAL` (optional): accepted principal, defaults to `admin`
/// - `GATE_SECRET` (optional): accepted secret, defaults to `Admin@123$`
/// - `GATE_EXEMPT_PATHS` (optional): comma-separated path substrings that skip
///   the credential check, defaults to `swagger,favicon`
#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_principal")]
    pub gate_principal: String,

    #[serde(default = "default_secret")]
    pub gate_secret: String,

    #[serde(default = "default_exempt_paths")]
    pub gate_exempt_paths: Vec<String>,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_principal() -> String {
    "admin".to_string()
}

fn default_secret() -> String {
    "Admin@123$".to_string()
}

fn default_exempt_paths() -> Vec<String> {
    vec!["swagger".to_string(), "favicon".to_string()]
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into its expected type (e.g. a non-numeric `SERVER_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are converted: gate_secret -> GATE_SECRET
        envy::from_env::<Config>()
    }

    /// Build the immutable credential gate configuration.
    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            credential: ReferenceCredential::new(&self.gate_principal, &self.gate_secret),
            exempt_paths: ExemptPaths::new(&self.gate_exempt_paths),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_port", &self.server_port)
            .field("gate_principal", &self.gate_principal)
            .field("gate_secret", &"[REDACTED]")
            .field("gate_exempt_paths", &self.gate_exempt_paths)
            .finish()
    }
}
