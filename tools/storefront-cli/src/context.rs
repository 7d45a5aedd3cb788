//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::{Cache, FileStore};
use storefront_commerce::catalog::StaticCatalog;
use storefront_commerce::{CartStore, ThemeStore};

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Where the config was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory holding persisted state.
    pub data_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    ///
    /// `data_dir` overrides the configured storage directory.
    pub fn load(config_path: Option<&str>, data_dir: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (StorefrontConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        let data_dir = match (data_dir, &config.storage.data_dir) {
            (Some(dir), _) => resolve(&cwd, Path::new(dir)),
            (None, Some(dir)) => resolve(&cwd, dir),
            (None, None) => default_data_dir(),
        };

        tracing::debug!(data_dir = %data_dir.display(), "context loaded");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            data_dir,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match StorefrontConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %e, "skipping config")
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Open the persistent key-value storage.
    pub fn cache(&self) -> Result<Cache> {
        let store = FileStore::open(&self.data_dir).with_context(|| {
            format!("Failed to open data directory: {}", self.data_dir.display())
        })?;
        Ok(Cache::new(store))
    }

    /// Open the cart store over persistent storage.
    pub fn cart_store(&self) -> Result<CartStore> {
        Ok(CartStore::open(self.cache()?, self.config.cart_store_config()))
    }

    /// Open the theme preference over persistent storage.
    pub fn theme_store(&self) -> Result<ThemeStore> {
        Ok(ThemeStore::open(self.cache()?))
    }

    /// The product catalog.
    pub fn catalog(&self) -> StaticCatalog {
        StaticCatalog::demo().with_latency(self.config.catalog_latency())
    }
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the platform-specific data directory.
fn default_data_dir() -> PathBuf {
    let base = if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    };
    base.join("storefront")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("storefront.toml"),
            "[cart]\nnotification_secs = 7\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.cart.notification_secs, 7);
        assert_eq!(path, dir.path().join("storefront.toml"));
    }

    #[test]
    fn test_resolve_relative() {
        let cwd = Path::new("/work");
        assert_eq!(resolve(cwd, Path::new("data")), PathBuf::from("/work/data"));
        assert_eq!(resolve(cwd, Path::new("/abs")), PathBuf::from("/abs"));
    }
}
