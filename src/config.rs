use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// Attendance store; attendance endpoints report "not configured" without it
    pub database_url: Option<String>,
    pub roster_path: PathBuf,
    pub log_dir: String,

    // Rate limiting
    pub rate_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            roster_path: env::var("ROSTER_PATH")
                .unwrap_or_else(|_| "data/Pot Keterlambatan.xlsx".to_string())
                .into(),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),

            rate_per_min: env::var("RATE_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .expect("RATE_PER_MIN must be a positive integer"),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}
