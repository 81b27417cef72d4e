#[derive(Clone)]
pub struct Config {
    pub alerts_base: String,
    pub cycle_base: String,
    pub listen_addr: String,
    pub poll_interval_ms: u64,
    pub map_width: f64,
    pub map_height: f64,
    pub map_padding: f64,
    pub text_dir: String,
    pub machine_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            alerts_base: std::env::var("ALERTS_BASE").unwrap_or_else(|_| "http://127.0.0.1:5001".to_string()),
            cycle_base: std::env::var("CYCLE_BASE").unwrap_or_else(|_| "http://127.0.0.1:5002".to_string()),
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            poll_interval_ms: std::env::var("POLL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(1000),
            map_width: std::env::var("MAP_WIDTH").ok().and_then(|v| v.parse().ok()).unwrap_or(600.0),
            map_height: std::env::var("MAP_HEIGHT").ok().and_then(|v| v.parse().ok()).unwrap_or(400.0),
            map_padding: std::env::var("MAP_PADDING").ok().and_then(|v| v.parse().ok()).unwrap_or(40.0),
            text_dir: std::env::var("TEXT_DIR").unwrap_or_else(|_| "text_files".to_string()),
            machine_filter: std::env::var("MACHINE_FILTER").unwrap_or_else(|_| "CNC".to_string()),
        }
    }
}
