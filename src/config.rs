use actix_web::cookie::Key;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub bind_addr: String,
    pub api_timeout_secs: u64,
    pub session_key: Option<String>,
}

impl AppConfig {
    /// Load from the process environment (and `.env`, if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let api_base_url = std::env::var("MAHSOULE_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let bind_addr = std::env::var("MAHSOULE_BIND")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let api_timeout_secs = match std::env::var("MAHSOULE_API_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("MAHSOULE_API_TIMEOUT_SECS={raw:?} is not a number, using {DEFAULT_TIMEOUT_SECS}");
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            api_base_url,
            bind_addr,
            api_timeout_secs,
            session_key: std::env::var("SESSION_KEY").ok(),
        }
    }

    /// Cookie signing key. Falls back to a random key (sessions lost on restart).
    pub fn cookie_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            bind_addr: DEFAULT_BIND.to_string(),
            api_timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_key: None,
        }
    }
}
