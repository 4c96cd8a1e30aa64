//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use devmobile_cache::Cache;
use devmobile_commerce::catalog::Catalog;
use devmobile_commerce::repository::CacheCartRepository;
use devmobile_commerce::CartEngine;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Catalog shipped with the binary.
const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// The cart as the CLI uses it: persisted in a directory of JSON files.
pub type Cart = CartEngine<CacheCartRepository>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            // Try to find config in current directory or parent directories
            None => match Self::find_config(&cwd)? {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        if let Some(path) = &config_path {
            tracing::info!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Result<Option<(CliConfig, PathBuf)>> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    let config = CliConfig::load(&config_path)?;
                    return Ok(Some((config, config_path)));
                }
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Directory the cart is stored in.
    pub fn storage_dir(&self) -> PathBuf {
        match &self.config.storage.dir {
            Some(dir) => self.resolve_path(dir),
            None => dirs_path().join("devmobile"),
        }
    }

    /// Open the persisted cart with the configured promotions and currency.
    pub fn open_cart(&self) -> Result<Cart> {
        let dir = self.storage_dir();
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "opened cart storage");

        Ok(CartEngine::with_config(
            CacheCartRepository::new(cache),
            self.config.promo_table()?,
            self.config.pricing_policy()?,
        ))
    }

    /// Load the configured catalog, or the bundled one.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
                Catalog::from_json(&json)
                    .with_context(|| format!("Failed to parse catalog: {}", path.display()))
            }
            None => Catalog::from_json(BUNDLED_CATALOG).context("Bundled catalog is invalid"),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, config: CliConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join(".devmobile.toml"),
            "[display]\ncurrency = \"GBP\"\n",
        )
        .unwrap();

        let (config, path) = Context::find_config(&nested).unwrap().unwrap();
        assert_eq!(config.display.currency, "GBP");
        assert_eq!(path, root.path().join(".devmobile.toml"));
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), CliConfig::default());
        let catalog = ctx.load_catalog().unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_open_cart_persists_to_storage_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.dir = Some("store".to_string());
        let ctx = context_in(dir.path(), config);

        let catalog = ctx.load_catalog().unwrap();
        let product = &catalog.products()[0];
        let mut cart = ctx.open_cart().unwrap();
        cart.add(product.to_line_item(devmobile_commerce::Currency::EUR, &[]).unwrap(), 2);

        let reopened = ctx.open_cart().unwrap();
        assert_eq!(reopened.item_count(), 2);
        assert!(dir.path().join("store").join("dev-mobile-cart.json").exists());
    }
}
