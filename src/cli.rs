// Command-line and environment configuration, plus logging setup.
// Every option can come from an `AGENDA_*` environment variable.

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use secrecy::SecretString;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Parser)]
#[command(name = "agenda", version, about = "Contacts address book")]
pub struct Args {
    /// Base URL of the contacts service
    #[arg(long, env = "AGENDA_API_URL", default_value = DEFAULT_API_URL, value_parser = parse_url)]
    pub api_url: String,

    /// Base URL of the identity provider
    #[arg(long, env = "AGENDA_AUTH_URL", default_value = DEFAULT_AUTH_URL, value_parser = parse_url)]
    pub auth_url: String,

    /// Identity provider project API key
    #[arg(long, env = "AGENDA_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Log level: error, warn, info, debug, trace (or 0-4)
    #[arg(long, env = "AGENDA_LOG_LEVEL", value_parser = parse_level)]
    pub log_level: Option<Level>,

    /// Raise verbosity, repeatable
    #[arg(short, long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

/// Resolved runtime configuration.
#[derive(Debug)]
pub struct Config {
    pub api_url: String,
    pub auth_url: String,
    pub api_key: SecretString,
    pub log_level: Level,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let log_level = args.log_level.unwrap_or(match args.verbose {
            0 => Level::ERROR,
            1 => Level::WARN,
            2 => Level::INFO,
            3 => Level::DEBUG,
            _ => Level::TRACE,
        });
        Config {
            api_url: args.api_url,
            auth_url: args.auth_url,
            api_key: SecretString::from(args.api_key),
            log_level,
        }
    }
}

fn parse_url(value: &str) -> std::result::Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(value.trim_end_matches('/').to_string()),
        other => Err(format!("unsupported scheme '{other}', use http or https")),
    }
}

fn parse_level(value: &str) -> std::result::Result<Level, String> {
    match value.to_lowercase().as_str() {
        "0" | "error" => Ok(Level::ERROR),
        "1" | "warn" => Ok(Level::WARN),
        "2" | "info" => Ok(Level::INFO),
        "3" | "debug" => Ok(Level::DEBUG),
        "4" | "trace" => Ok(Level::TRACE),
        _ => Err("invalid log level".to_string()),
    }
}

/// Install the global subscriber. Logs go to stderr so they never mix with
/// the prompts; `RUST_LOG` overrides the configured level.
pub fn init_logging(level: Level) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

/// Parse arguments and set up logging.
pub fn start() -> Result<Config> {
    let config = Config::from(Args::parse());
    init_logging(config.log_level)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_and_flags() {
        temp_env::with_vars_unset(
            ["AGENDA_API_URL", "AGENDA_AUTH_URL", "AGENDA_LOG_LEVEL"],
            || {
                let args = Args::try_parse_from(["agenda", "--api-key", "k", "-vv"]).unwrap();
                let config = Config::from(args);
                assert_eq!(config.api_url, DEFAULT_API_URL);
                assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
                assert_eq!(config.api_key.expose_secret(), "k");
                assert_eq!(config.log_level, Level::INFO);
            },
        );
    }

    #[test]
    fn reads_environment() {
        temp_env::with_vars(
            [
                ("AGENDA_API_URL", Some("http://10.0.2.2:3000/")),
                ("AGENDA_AUTH_URL", Some("http://localhost:9099/identitytoolkit/v1")),
                ("AGENDA_API_KEY", Some("project-key")),
                ("AGENDA_LOG_LEVEL", Some("debug")),
            ],
            || {
                let config = Config::from(Args::try_parse_from(["agenda"]).unwrap());
                assert_eq!(config.api_url, "http://10.0.2.2:3000");
                assert_eq!(config.auth_url, "http://localhost:9099/identitytoolkit/v1");
                assert_eq!(config.api_key.expose_secret(), "project-key");
                assert_eq!(config.log_level, Level::DEBUG);
            },
        );
    }

    #[test]
    fn api_key_is_required() {
        temp_env::with_var_unset("AGENDA_API_KEY", || {
            assert!(Args::try_parse_from(["agenda"]).is_err());
        });
    }

    #[test]
    fn rejects_bad_urls_and_levels() {
        assert!(parse_url("ftp://example.com").is_err());
        assert!(parse_url("not a url").is_err());
        assert!(parse_level("loud").is_err());
        assert_eq!(parse_level("WARN"), Ok(Level::WARN));
    }
}
