//! Logging setup for the command line binary.

use tracing::{warn, Level};

/// Install the global fmt subscriber. Unknown level names fall back to `info`.
pub fn init(level: &str) {
    let parsed = parse_level(level);
    tracing_subscriber::fmt()
        .with_max_level(parsed.unwrap_or(Level::INFO))
        .with_target(false)
        .init();

    if parsed.is_none() {
        warn!("Unknown log level {:?}, using info", level);
    }
}

fn parse_level(level: &str) -> Option<Level> {
    level.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_level_names() {
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("WARN"), Some(Level::WARN));
        assert_eq!(parse_level(" trace "), Some(Level::TRACE));
    }

    #[test]
    fn unknown_level_is_reported_as_none() {
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(parse_level(""), None);
    }
}
