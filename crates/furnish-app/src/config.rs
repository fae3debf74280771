//! Demo application configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the demo binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the catalog database.
    pub database_name: String,

    /// Price-range query bounds used by the scripted run.
    pub price_lower: Option<f64>,
    pub price_upper: Option<f64>,

    /// Tracing filter (e.g., "timber_idb=debug,furnish=info").
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_name: "couches-n-things".to_string(),
            price_lower: Some(50.0),
            price_upper: Some(300.0),
            log_filter: None,
        }
    }
}
