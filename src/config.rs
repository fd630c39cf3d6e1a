use anyhow::{bail, Context};
use chrono::FixedOffset;

use crate::display::{DateFormat, DisplaySettings, Language};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub driver_password: String,
    pub display: DisplaySettings,
}

impl ServerConfig {
    /// Reads settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not found")?;
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let driver_password =
            lookup("DRIVER_PASSWORD").unwrap_or_else(|| "driver123".to_string());
        if driver_password.is_empty() {
            bail!("DRIVER_PASSWORD must not be empty");
        }

        let language = match lookup("DISPLAY_LANGUAGE") {
            Some(s) => s.parse::<Language>().context("DISPLAY_LANGUAGE")?,
            None => Language::ZhTw,
        };
        let date_format = match lookup("DISPLAY_DATE_FORMAT") {
            Some(s) => s.parse::<DateFormat>().context("DISPLAY_DATE_FORMAT")?,
            None => DateFormat::MonthDayYear,
        };
        let offset_minutes = match lookup("DISPLAY_UTC_OFFSET_MINUTES") {
            Some(s) => s
                .trim()
                .parse::<i32>()
                .context("DISPLAY_UTC_OFFSET_MINUTES must be an integer")?,
            None => 8 * 60,
        };
        let offset = FixedOffset::east_opt(offset_minutes * 60)
            .context("DISPLAY_UTC_OFFSET_MINUTES out of range")?;

        Ok(Self {
            database_url,
            bind_addr,
            driver_password,
            display: DisplaySettings {
                language,
                date_format,
                offset,
            },
        })
    }
}
