//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cart::catalog::ImageResolver;
use storefront_cart::snapshot::CartSnapshot;
use storefront_cart::CartStore;
use tracing::debug;

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Snapshot file for this session.
    pub session_path: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, session: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_in(cwd, config_path, session, output)
    }

    /// Load context as if run from `cwd`.
    ///
    /// A `--session` flag is relative to `cwd`; the configured session path is
    /// relative to the directory holding the config file.
    fn load_in(
        cwd: PathBuf,
        config_path: Option<&str>,
        session: Option<&str>,
        output: Output,
    ) -> Result<Self> {
        let (config, config_dir) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            let config = CliConfig::load(&path.to_string_lossy())?;
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
            (config, dir)
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        let session_path = match session {
            Some(path) => resolve(&cwd, path),
            None => resolve(&config_dir, &config.session.path),
        };
        debug!(
            config_dir = %config_dir.display(),
            session = %session_path.display(),
            "context loaded"
        );

        Ok(Self {
            config,
            output,
            cwd,
            session_path,
        })
    }

    /// Find config file in directory tree, with the directory it was found in.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let config_names = ["cart.toml", ".cart.toml", "cart.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, current));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Open the session's cart, restoring the snapshot if there is one.
    pub fn open_store(&self) -> Result<CartStore> {
        let mut store = CartStore::from_config(&self.config.store);

        if !self.session_path.exists() {
            debug!(path = %self.session_path.display(), "no session file, starting empty");
            return Ok(store);
        }

        let content = std::fs::read_to_string(&self.session_path).with_context(|| {
            format!("Failed to read session file: {}", self.session_path.display())
        })?;
        let snapshot = CartSnapshot::from_json(&content).with_context(|| {
            format!("Failed to parse session file: {}", self.session_path.display())
        })?;
        store.restore(snapshot).with_context(|| {
            format!("Session file is corrupt: {}", self.session_path.display())
        })?;

        Ok(store)
    }

    /// Save the session's cart.
    pub fn save_store(&self, store: &CartStore) -> Result<()> {
        if let Some(parent) = self.session_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = store.snapshot().to_json()?;
        std::fs::write(&self.session_path, json).with_context(|| {
            format!("Failed to write session file: {}", self.session_path.display())
        })
    }

    /// Image resolver for the configured storage.
    pub fn images(&self) -> ImageResolver {
        ImageResolver::new(&self.config.store)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cart::cart::NewCartItem;
    use storefront_cart::{Currency, Money};

    fn context_in(dir: &Path) -> Context {
        Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
            session_path: dir.join(".cart").join("session.json"),
        }
    }

    #[test]
    fn test_missing_session_is_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        assert!(ctx.open_store().unwrap().is_empty());
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        let mut store = ctx.open_store().unwrap();
        let item = NewCartItem::new(3, "Jarra", Money::new(1500, Currency::BOB), "");
        store.add_to_cart(item.clone()).unwrap();
        store.add_to_cart(item).unwrap();
        ctx.save_store(&store).unwrap();

        let reopened = ctx.open_store().unwrap();
        assert_eq!(reopened.total_items(), 2);
        assert_eq!(reopened.total().amount_cents, 3000);
    }

    #[test]
    fn test_corrupt_session_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        std::fs::create_dir_all(ctx.session_path.parent().unwrap()).unwrap();
        std::fs::write(&ctx.session_path, "not json").unwrap();

        assert!(ctx.open_store().is_err());
    }

    #[test]
    fn test_session_follows_found_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("cart.toml"),
            "[session]\npath = \"state/session.json\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = Context::load_in(nested.clone(), None, None, Output::new(false, true)).unwrap();
        assert_eq!(ctx.session_path, dir.path().join("state").join("session.json"));
        assert_eq!(ctx.cwd, nested);
    }

    #[test]
    fn test_session_flag_is_relative_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cart.toml"), "[session]\npath = \"s.json\"\n").unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = Context::load_in(
            nested.clone(),
            None,
            Some("mine.json"),
            Output::new(false, true),
        )
        .unwrap();
        assert_eq!(ctx.session_path, nested.join("mine.json"));
    }

    #[test]
    fn test_explicit_config_anchors_session() {
        let dir = tempfile::tempdir().unwrap();
        let conf_dir = dir.path().join("conf");
        std::fs::create_dir_all(&conf_dir).unwrap();
        std::fs::write(conf_dir.join("shop.toml"), "[session]\npath = \"s.json\"\n").unwrap();

        let ctx = Context::load_in(
            dir.path().to_path_buf(),
            Some("conf/shop.toml"),
            None,
            Output::new(false, true),
        )
        .unwrap();
        assert_eq!(ctx.session_path, conf_dir.join("s.json"));
    }

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/work");
        assert_eq!(resolve(cwd, "a.json"), PathBuf::from("/work/a.json"));
        assert_eq!(resolve(cwd, "/tmp/a.json"), PathBuf::from("/tmp/a.json"));
    }
}
