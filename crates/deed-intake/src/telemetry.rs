use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "invalid log level/filter '{value}': unable to build EnvFilter")
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Install the process-wide tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise a plain configured level is
/// scoped to the intake crates on top of a `warn` baseline for
/// dependencies; a configured value containing filter directives is
/// passed through as-is.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = default_directives(&config.log_level);
            EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
                value: directives.clone(),
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

fn default_directives(log_level: &str) -> String {
    if log_level.contains(['=', ',']) {
        return log_level.to_string();
    }
    format!("warn,deed_intake={log_level},deed_intake_cli={log_level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_level_is_scoped_to_the_intake_crates() {
        assert_eq!(
            default_directives("debug"),
            "warn,deed_intake=debug,deed_intake_cli=debug"
        );
    }

    #[test]
    fn explicit_directives_pass_through_unchanged() {
        assert_eq!(
            default_directives("info,csv=trace"),
            "info,csv=trace"
        );
    }
}
