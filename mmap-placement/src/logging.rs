//! Logging support for mmap-placement
//!
//! Thin wrappers over the `log` facade. With the `log` feature disabled the
//! arguments are still type-checked but nothing is emitted.

/// Trace-level logging
macro_rules! mm_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
        #[cfg(not(feature = "log"))]
        { let _ = format_args!($($arg)*); };
    }}
}

/// Debug-level logging
macro_rules! mm_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
        #[cfg(not(feature = "log"))]
        { let _ = format_args!($($arg)*); };
    }}
}

/// Warn-level logging
macro_rules! mm_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::warn!($($arg)*);
        #[cfg(not(feature = "log"))]
        { let _ = format_args!($($arg)*); };
    }}
}
