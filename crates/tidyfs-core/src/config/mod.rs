//! Configuration management for tidyfs.
//!
//! Engine preferences ([`settings::Settings`]) are stored as a TOML file
//! under the configuration root and loaded when an engine is opened.

pub mod settings;
