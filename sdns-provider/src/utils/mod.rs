//! Utility modules.

/// Log sanitization utilities to prevent key exposure.
pub mod log_sanitizer;
