//! Logging helpers.

/// Logs at debug level through the `log` facade, but only when the given
/// options have `debug` switched on.
macro_rules! debug_log {
    ($options:expr, $($arg:tt)+) => {
        if $options.debug {
            log::debug!($($arg)+);
        }
    };
}
