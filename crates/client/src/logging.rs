//! Cross-platform logging.
//!
//! The `log_*!` macros dispatch to the appropriate backend:
//! - Web: `web_sys::console`
//! - Desktop: the `tracing` crate

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[cfg(target_arch = "wasm32")]
pub fn emit(level: LogLevel, msg: &str) {
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&msg.into()),
        LogLevel::Info => web_sys::console::log_1(&msg.into()),
        LogLevel::Warn => web_sys::console::warn_1(&msg.into()),
        LogLevel::Error => web_sys::console::error_1(&msg.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn emit(level: LogLevel, msg: &str) {
    match level {
        LogLevel::Debug => tracing::debug!("{}", msg),
        LogLevel::Info => tracing::info!("{}", msg),
        LogLevel::Warn => tracing::warn!("{}", msg),
        LogLevel::Error => tracing::error!("{}", msg),
    }
}

/// Install the `tracing` subscriber, honouring `RUST_LOG` when set.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Log an info message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Info, &format!($($arg)*))
    };
}

/// Log an error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Error, &format!($($arg)*))
    };
}

/// Log a warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Warn, &format!($($arg)*))
    };
}

/// Log a debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::LogLevel::Debug, &format!($($arg)*))
    };
}
