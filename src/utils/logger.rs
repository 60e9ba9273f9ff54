use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub fn is_known_level(level: &str) -> bool {
    LOG_LEVELS.iter().any(|known| known.eq_ignore_ascii_case(level))
}

/// Our crate at `level`; dependencies stay at info unless we go below it.
fn filter_directive(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" => format!("firm_scraper={},info", level),
        _ if is_known_level(&level) => format!("firm_scraper={}", level),
        _ => format!("firm_scraper={}", DEFAULT_LOG_LEVEL),
    }
}

/// RUST_LOG wins over the configured level when set.
pub fn init_logger(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .init(),
    }
}
