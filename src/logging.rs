//! Logger setup for the demo binaries (std only).

use crate::config::LogLevel;

/// Install a stderr logger at `level`.
///
/// # Errors
///
/// Fails if a logger is already installed.
pub fn init(level: LogLevel) -> Result<(), log::SetLoggerError> {
    simple_logger::SimpleLogger::new()
        .with_level(level.to_level_filter())
        .init()
}

/// Log the crate name and version.
pub fn show_info() {
    log::info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}
