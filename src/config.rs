//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Document Store ===
    /// MongoDB connection string.
    pub mongo_url: String,

    /// Database name.
    pub db_name: String,

    // === HTTP Server ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Comma-separated list of allowed CORS origins, or `*` for all.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,

    // === Mail Relay (optional as a group) ===
    /// SMTP relay hostname.
    #[serde(default)]
    pub smtp_host: Option<String>,

    /// SMTP relay port.
    #[serde(default)]
    pub smtp_port: Option<u16>,

    /// SMTP username, also used as the sender mailbox.
    #[serde(default)]
    pub smtp_user: Option<String>,

    /// SMTP password.
    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Mailbox that receives contact notifications (defaults to the SMTP user).
    #[serde(default)]
    pub contact_recipient: Option<String>,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

/// Complete SMTP relay settings, present only when every credential is set.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay hostname.
    pub host: String,
    /// Relay port (STARTTLS).
    pub port: u16,
    /// Username and sender mailbox.
    pub user: String,
    /// Password.
    pub password: String,
    /// Mailbox notified about contact submissions.
    pub recipient: String,
}

fn default_port() -> u16 {
    8001
}

fn default_cors_origins() -> String {
    "*".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.mongo_url.is_empty() {
            return Err("MONGO_URL is required".to_string());
        }

        if !self.mongo_url.starts_with("mongodb://") && !self.mongo_url.starts_with("mongodb+srv://") {
            return Err("MONGO_URL must start with mongodb:// or mongodb+srv://".to_string());
        }

        if self.db_name.is_empty() {
            return Err("DB_NAME is required".to_string());
        }

        Ok(())
    }

    /// Parse the CORS origin allow-list.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Complete SMTP settings, or `None` when any credential is missing.
    pub fn smtp(&self) -> Option<SmtpConfig> {
        let host = self.smtp_host.clone()?;
        let port = self.smtp_port?;
        let user = self.smtp_user.clone()?;
        let password = self.smtp_password.clone()?;
        let recipient = self.contact_recipient.clone().unwrap_or_else(|| user.clone());

        Some(SmtpConfig {
            host,
            port,
            user,
            password,
            recipient,
        })
    }

    /// Check whether some but not all SMTP credentials are set.
    pub fn smtp_partially_configured(&self) -> bool {
        let present = [
            self.smtp_host.is_some(),
            self.smtp_port.is_some(),
            self.smtp_user.is_some(),
            self.smtp_password.is_some(),
        ];
        present.iter().any(|p| *p) && !present.iter().all(|p| *p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            mongo_url: "mongodb://localhost:27017".to_string(),
            db_name: "portfolio".to_string(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_password: None,
            contact_recipient: None,
            rust_log: default_log_level(),
            verbose: false,
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_port(), 8001);
        assert_eq!(default_cors_origins(), "*");
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_rejects_empty_mongo_url() {
        let config = Config {
            mongo_url: "".to_string(),
            ..base_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_mongo_scheme() {
        let config = Config {
            mongo_url: "postgres://localhost/db".to_string(),
            ..base_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_db_name() {
        let config = Config {
            db_name: "".to_string(),
            ..base_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_srv_scheme() {
        let config = Config {
            mongo_url: "mongodb+srv://cluster.example.net".to_string(),
            ..base_config()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn allowed_origins_splits_and_trims() {
        let config = Config {
            cors_origins: "https://a.example, https://b.example ,".to_string(),
            ..base_config()
        };

        assert_eq!(
            config.allowed_origins(),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn allowed_origins_defaults_to_wildcard() {
        let config = base_config();
        assert_eq!(config.allowed_origins(), vec!["*".to_string()]);
    }

    #[test]
    fn smtp_requires_all_credentials() {
        let mut config = base_config();
        assert!(config.smtp().is_none());
        assert!(!config.smtp_partially_configured());

        config.smtp_host = Some("smtp.example.net".to_string());
        config.smtp_port = Some(587);
        assert!(config.smtp().is_none());
        assert!(config.smtp_partially_configured());

        config.smtp_user = Some("mailer@example.net".to_string());
        config.smtp_password = Some("hunter2".to_string());
        let smtp = config.smtp().expect("complete credentials");
        assert_eq!(smtp.host, "smtp.example.net");
        assert_eq!(smtp.port, 587);
        assert!(!config.smtp_partially_configured());
    }

    #[test]
    fn smtp_recipient_defaults_to_user() {
        let mut config = base_config();
        config.smtp_host = Some("smtp.example.net".to_string());
        config.smtp_port = Some(587);
        config.smtp_user = Some("mailer@example.net".to_string());
        config.smtp_password = Some("hunter2".to_string());

        let smtp = config.smtp().unwrap();
        assert_eq!(smtp.recipient, "mailer@example.net");

        config.contact_recipient = Some("owner@example.net".to_string());
        let smtp = config.smtp().unwrap();
        assert_eq!(smtp.recipient, "owner@example.net");
    }
}
