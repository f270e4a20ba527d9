//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable.
///
/// # Example
/// ```
/// rubble::core::logging::init();
/// log::info!("painter ready");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
}

/// Like [`init`], but does not panic when a logger is already installed.
///
/// Embedders and test harnesses that set up logging more than once should
/// prefer this.
pub fn try_init() -> std::result::Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).try_init()
}
