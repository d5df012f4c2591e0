//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a fileshelf.toml, and if present we load
//! settings from there. This provides the event-loop poll interval and the
//! hidden-file preference.

use facet::Facet;
use std::fs;

#[derive(Facet, Clone)]
/// User preferences loaded from fileshelf.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 250)]
    /// Milliseconds between input polls; also bounds how long an external
    /// filesystem change waits before reconciliation.
    pub poll_interval_ms: u64,
    #[facet(default = false)]
    /// Include dotfiles in listings and reconciliation.
    pub show_hidden: bool,
}

impl Config {
    #[must_use]
    /// Load configuration from fileshelf.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("fileshelf.toml") {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }
}
