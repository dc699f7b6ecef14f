use chrono::Duration;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};
use serde::Deserialize;

/// Runtime settings. Defaults are layered under `COHORT__*` environment
/// variables, e.g. `COHORT__SERVER__PORT=8080` or `COHORT__AUTH__JWT_SECRET=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub mail: MailSettings,
    pub booking: BookingSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Without a URL the server runs on the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    pub smtp_host: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingSettings {
    pub invoice_due_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub filter: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::layered(
            Config::builder().add_source(
                Environment::with_prefix("COHORT")
                    .prefix_separator("__")
                    .separator("__"),
            ),
        )
    }

    fn layered(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.max_connections", 5)?
            .set_default("mail.from", "Cohort Ecosystem <no-reply@cohort.local>")?
            .set_default("booking.invoice_due_days", 7)?
            .set_default("log.filter", "info")?
            .build()?
            .try_deserialize()?;

        if settings.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message("auth.jwt_secret must not be empty".to_string()));
        }
        Ok(settings)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn invoice_due_in(&self) -> Duration {
        Duration::days(i64::from(self.booking.invoice_due_days))
    }
}

impl MailSettings {
    pub fn is_configured(&self) -> bool {
        self.smtp_host.as_deref().is_some_and(|h| !h.trim().is_empty())
    }
}
