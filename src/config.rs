use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_TRANSCRIPT_TTL_HOURS: u64 = 48;
pub const DEFAULT_REMINDER_WINDOW_HOURS: i64 = 24;
pub const DEFAULT_SWEEP_CRON: &str = "0 1 0 * * *";

/// How the grader treats a submission whose answer-set count differs from the
/// quiz's question count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPolicy {
    /// Reject with a validation error.
    #[default]
    Strict,
    /// Grade the overlapping prefix only.
    Truncate,
}

impl FromStr for SubmissionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SubmissionPolicy::Strict),
            "truncate" => Ok(SubmissionPolicy::Truncate),
            other => Err(format!("unknown submission policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub redis_url: String,
    pub jwt_secret: String,
    pub transcript_ttl_hours: u64,
    pub reminder_window_hours: i64,
    pub sweep_cron: String,
    pub submission_policy: SubmissionPolicy,
    pub export_dir: Option<PathBuf>,
    pub json_logs: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            redis_url: get_env("REDIS_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            transcript_ttl_hours: get_env_parse_or(
                "TRANSCRIPT_TTL_HOURS",
                DEFAULT_TRANSCRIPT_TTL_HOURS,
            )?,
            reminder_window_hours: get_env_parse_or(
                "REMINDER_WINDOW_HOURS",
                DEFAULT_REMINDER_WINDOW_HOURS,
            )?,
            sweep_cron: env::var("SWEEP_CRON").unwrap_or_else(|_| DEFAULT_SWEEP_CRON.to_string()),
            submission_policy: get_env_parse_or("SUBMISSION_POLICY", SubmissionPolicy::Strict)?,
            export_dir: env::var("EXPORT_DIR").ok().map(PathBuf::from),
            json_logs: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    pub fn transcript_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.transcript_ttl_hours * 3600)
    }

    pub fn reminder_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.reminder_window_hours)
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
