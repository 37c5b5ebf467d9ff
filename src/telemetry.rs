//! Tracing setup shared by the server and the quiz client.
//!
//! LOG_LEVEL overrides the filter, either a bare level ("debug") or full directives
//! ("info,questions=debug,math_tutor=debug,tower_http=info,axum=info").
//! LOG_FORMAT=json switches to one JSON object per event; anything else is human readable.
//! Output goes to stderr so the quiz client's stdout stays clean.

use tracing_subscriber::EnvFilter;

pub const SERVER_FILTER: &str = "info,questions=debug,math_tutor=debug,tower_http=info,axum=info";
pub const CLIENT_FILTER: &str = "warn";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global subscriber. `default_filter` applies when LOG_LEVEL is unset or invalid.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(default_filter));
    let format = LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    // The json and pretty builders are different types, so each branch installs its own.
    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    if let Err(e) = installed {
        eprintln!("tracing subscriber already installed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse(Some("json")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some(" JSON ")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(None), LogFormat::Pretty);
    }
}
