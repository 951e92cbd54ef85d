//! log macro's for engine logging

/// Writes a debug! message to the app::engine logger
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::engine", $($arg)+)
    };
}

/// Writes an info! message to the app::engine logger
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::engine", $($arg)+)
    };
}

/// Writes an warn! message to the app::engine logger
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::engine", $($arg)+)
    };
}

/// Writes an error! message to the app::engine logger
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::engine", $($arg)+)
    };
}
