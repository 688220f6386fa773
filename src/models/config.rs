use serde::Deserialize;

/// Configuration options for the hive management server.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path or URL of the SQLite database.
    pub database_url: String,
    /// Interface the HTTP server binds to.
    #[serde(default = "default_address")]
    pub address: String,
    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}
