use config::ConfigError;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub polka: PolkaSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Only `"dev"` may reset the database
    pub platform: String,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

/// JWT authentication settings
#[derive(serde::Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_expiry: i64, // seconds, for tokens minted from a refresh token
}

/// Billing webhook settings
#[derive(serde::Deserialize, Clone)]
pub struct PolkaSettings {
    pub api_key: String,
}

/// Load settings from `configuration.yaml` (optional) and `APP_` environment variables
///
/// Nested keys use a double underscore, e.g. `APP_JWT__SECRET`.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 8080_i64)?
        .set_default("application.platform", "prod")?
        .set_default("database.path", "database.json")?
        .set_default("jwt.access_token_expiry", 3600_i64)?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_address() {
        let app = ApplicationSettings {
            host: "0.0.0.0".to_string(),
            port: 8000,
            platform: "dev".to_string(),
        };

        assert_eq!(app.address(), "0.0.0.0:8000");
        assert!(app.is_dev());
    }

    #[test]
    fn test_non_dev_platform() {
        let app = ApplicationSettings {
            host: "127.0.0.1".to_string(),
            port: 8080,
            platform: "prod".to_string(),
        };

        assert!(!app.is_dev());
    }
}
