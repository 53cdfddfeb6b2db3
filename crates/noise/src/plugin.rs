//! Dynamic backend discovery
//!
//! Out-of-tree backends ship as shared libraries named
//! `hasty_noise_<anything>` (with the platform `lib` prefix where usual) that
//! export a registration function:
//!
//! ```rust,ignore
//! #[no_mangle]
//! pub fn hasty_noise_register(registry: &mut hasty_noise::BackendRegistry) {
//!     registry.register(hasty_noise::SimdLevel::Avx512.index(), my_entry());
//! }
//! ```
//!
//! The function uses the Rust ABI, so plugins must be built with the same
//! compiler and `hasty-noise` version as the host.

use crate::error::PluginError;
use crate::registry::BackendRegistry;
use libloading::Library;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Exported symbol every plugin must provide
pub const PLUGIN_ENTRY_SYMBOL: &[u8] = b"hasty_noise_register";

/// File name prefix of plugin libraries
pub const PLUGIN_PREFIX: &str = "hasty_noise_";

type RegisterFn = fn(&mut BackendRegistry);

fn is_plugin_file(path: &Path) -> bool {
    let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
        return false;
    };
    let extension_matches = path.extension() == Some(OsStr::new(std::env::consts::DLL_EXTENSION));
    let stem = stem.strip_prefix("lib").unwrap_or(stem);
    extension_matches && stem.starts_with(PLUGIN_PREFIX)
}

impl BackendRegistry {
    /// Load every plugin library in `dir` and let it register backends
    ///
    /// Libraries that fail to load or lack [`PLUGIN_ENTRY_SYMBOL`] are logged
    /// and skipped. Loaded libraries stay mapped for the rest of the process,
    /// since engines may hold their entry points. Returns how many libraries
    /// registered.
    ///
    /// # Errors
    ///
    /// [`PluginError::NotADirectory`] when `dir` is not a directory and
    /// [`PluginError::Io`] when it cannot be listed.
    pub fn load_plugins(&mut self, dir: impl AsRef<Path>) -> Result<usize, PluginError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(PluginError::NotADirectory(dir.to_path_buf()));
        }
        let read_dir = fs::read_dir(dir).map_err(|source| PluginError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut loaded = 0;
        for dir_entry in read_dir {
            let path = match dir_entry {
                Ok(dir_entry) => dir_entry.path(),
                Err(err) => {
                    log::warn!("skipping unreadable entry in {}: {err}", dir.display());
                    continue;
                }
            };
            if !path.is_file() || !is_plugin_file(&path) {
                continue;
            }

            // SAFETY: loading runs the library's initializers; plugin
            // directories are trusted configuration
            let library = match unsafe { Library::new(&path) } {
                Ok(library) => library,
                Err(err) => {
                    log::warn!("failed to load plugin {}: {err}", path.display());
                    continue;
                }
            };

            // SAFETY: the symbol type is the documented plugin contract
            let register = match unsafe { library.get::<RegisterFn>(PLUGIN_ENTRY_SYMBOL) } {
                Ok(symbol) => *symbol,
                Err(err) => {
                    log::warn!("plugin {} has no registration entry: {err}", path.display());
                    continue;
                }
            };

            register(self);
            std::mem::forget(library);
            log::info!("loaded noise backend plugin {}", path.display());
            loaded += 1;
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_file_names() {
        let ext = std::env::consts::DLL_EXTENSION;
        assert!(is_plugin_file(Path::new(&format!("hasty_noise_avx512.{ext}"))));
        assert!(is_plugin_file(Path::new(&format!("/opt/libhasty_noise_neon.{ext}"))));
        assert!(!is_plugin_file(Path::new(&format!("other_avx512.{ext}"))));
        assert!(!is_plugin_file(Path::new("hasty_noise_avx512.txt")));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let mut registry = BackendRegistry::new();
        let err = registry.load_plugins("/definitely/not/here").unwrap_err();
        assert!(matches!(err, PluginError::NotADirectory(_)));
    }

    #[test]
    fn test_non_plugins_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.txt"), "not a library").unwrap();
        fs::write(
            dir.path().join(format!("hasty_noise_broken.{}", std::env::consts::DLL_EXTENSION)),
            "not a library either",
        )
        .unwrap();

        let mut registry = BackendRegistry::new();
        assert_eq!(registry.load_plugins(dir.path()).unwrap(), 0);
        assert!(registry.is_supported(0));
    }
}
