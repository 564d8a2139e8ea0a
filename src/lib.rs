//! resenha-rs: a dynamic review-site server backed by a spreadsheet JSON API
//!
//! This crate serves the "Direito em Cena" review site: every page request
//! fetches the post rows fresh from the upstream JSON API and renders the
//! listing or detail HTML server-side. Nothing is persisted or cached.

pub mod commands;
pub mod config;
pub mod content;
pub mod pages;
pub mod render;
pub mod server;
pub mod source;

use anyhow::Result;
use std::path::Path;

/// The main site application
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new Site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }
}
