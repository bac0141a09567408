//! Application identity from Cargo.toml.
//!
//! Single source of truth for the app name, version, and vendor used across the codebase.

/// Application name (from Cargo.toml `package.name`).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Application version (from Cargo.toml `package.version`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Vendor / organization, used for the platform project directories.
pub const VENDOR: &str = "helpai";

/// Display title, shown in the TUI header and sent upstream as `X-Title`.
pub const TITLE: &str = "Chat App";
