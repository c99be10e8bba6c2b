use clap::{ArgAction, Parser};

/// Runtime settings, read from flags or the environment (a `.env` file
/// is loaded first when present).
#[derive(Parser, Debug, Clone)]
#[command(name = "hamburgueria", about = "Ordering backend for the burger house")]
pub struct Config {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://hamburgueria.db?mode=rwc")]
    pub database_url: String,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Insert the starter menu when the products table is empty.
    #[arg(long, env = "SEED_CATALOG", default_value_t = true, action = ArgAction::Set)]
    pub seed_catalog: bool,

    #[arg(
        long,
        env = "CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173,http://localhost:5174,http://localhost:3000"
    )]
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "hamburgueria",
            "--database-url",
            "sqlite::memory:",
            "--host",
            "127.0.0.1",
            "--port",
            "9001",
            "--seed-catalog",
            "false",
            "--cors-origins",
            "http://a.test,http://b.test",
        ])
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_address(), "127.0.0.1:9001");
        assert!(!config.seed_catalog);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }
}
