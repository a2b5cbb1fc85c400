use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenWeather API key; weather lookups by location are disabled without it
    #[serde(default)]
    pub openweather_api_key: Option<String>,

    /// OpenWeather API base URL
    #[serde(default = "default_openweather_api_url")]
    pub openweather_api_url: String,

    /// Seed for outfit sampling. Unset means entropy-seeded.
    #[serde(default)]
    pub outfit_rng_seed: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_openweather_api_url() -> String {
    "https://api.openweathermap.org".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
