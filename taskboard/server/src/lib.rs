pub mod config {
    use serde::Deserialize;

    #[derive(Deserialize, Debug, Clone)]
    pub struct Config {
        /// Base URL of the upstream dashboard API.
        pub backend_url: String,
        #[serde(default = "default_port")]
        pub port: u16,
        #[serde(default = "default_request_timeout_secs")]
        pub request_timeout_secs: u64,
        #[serde(default = "default_search_debounce_ms")]
        pub search_debounce_ms: u64,
    }

    impl Config {
        /// Loads configuration from environment variables.
        pub fn from_env() -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(config::Environment::default())
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_secs() -> u64 {
        10
    }

    fn default_search_debounce_ms() -> u64 {
        500
    }
}

pub mod admin;
pub mod aggregate;
pub mod backend;
pub mod employee;
pub mod manager;
pub mod model;
pub mod search;
pub mod teamlead;
pub mod view;
pub mod web;
