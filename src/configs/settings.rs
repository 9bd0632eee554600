use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub migration_path: Option<String>,
    pub clean_start: bool,
    pub url: String,
}

/// Slot directory candidates for over-the-air firmware images, probed in
/// order; the first writable one wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firmware {
    pub slot_dirs: Vec<String>,
}

/// Wall-clock offset used for every window computation. The dashboard fleet
/// runs in a single region, so one configured offset covers all call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub utc_offset_hours: i8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub database: Database,
    pub firmware: Firmware,
    pub stats: Stats,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Environment::default().separator("_"))
            .build()?
            .try_deserialize()
    }
}
