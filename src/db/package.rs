use crate::error::{FincaError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const PACKAGE_EXTENSION: &str = "dat";

/// Saves and loads whole object graphs as named `.dat` files under a base
/// directory. Every failure surfaces as [`FincaError::Persistence`].
#[derive(Debug, Clone)]
pub struct PackageStore {
    base: PathBuf,
}

impl PackageStore {
    pub fn open(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        std::fs::create_dir_all(&base).map_err(|e| {
            FincaError::persistence(format!("cannot create {}: {}", base.display(), e))
        })?;
        debug!(base = %base.display(), "Package store opened");
        Ok(Self { base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base.join(format!("{}.{}", name, PACKAGE_EXTENSION))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    pub fn save<T: Serialize>(&self, value: &T, name: &str) -> Result<PathBuf> {
        let path = self.path_for(name);
        let bytes =
            serde_json::to_vec_pretty(value).map_err(|e| FincaError::persistence(e.to_string()))?;
        std::fs::write(&path, bytes).map_err(|e| FincaError::persistence(e.to_string()))?;
        info!(path = %path.display(), "Package saved");
        Ok(path)
    }

    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.path_for(name);
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FincaError::persistence(format!(
                "file {}.{} does not exist",
                name, PACKAGE_EXTENSION
            )),
            _ => FincaError::persistence(e.to_string()),
        })?;
        let value =
            serde_json::from_slice(&bytes).map_err(|e| FincaError::persistence(e.to_string()))?;
        debug!(path = %path.display(), "Package loaded");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{CropFactory, CropParams};
    use crate::models::{ForestRegistry, Plantation};

    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(tag: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "fincaops-{}-{}",
                tag,
                std::process::id()
            ));
            let _ = std::fs::remove_dir_all(&path);
            Self(path)
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn sample_registry() -> ForestRegistry {
        let mut plantation = Plantation::new("Test Farm", 50.0, 100.0).unwrap();
        for kind in ["pino", "olivo", "lechuga", "zanahoria"] {
            plantation
                .add_crop(CropFactory::create(kind, &CropParams::new()).unwrap())
                .unwrap();
        }
        plantation.water_all(10.0).unwrap();

        let mut registry = ForestRegistry::new();
        registry.add(plantation);
        registry
    }

    #[test]
    fn open_creates_base_directory() {
        let dir = ScratchDir::new("open");
        let store = PackageStore::open(dir.0.join("nested")).unwrap();
        assert!(store.base().is_dir());
    }

    #[test]
    fn registry_survives_save_and_load() {
        let dir = ScratchDir::new("roundtrip");
        let store = PackageStore::open(&dir.0).unwrap();
        let registry = sample_registry();

        let path = store.save(&registry, "registry_test").unwrap();
        assert_eq!(path, dir.0.join("registry_test.dat"));
        assert!(store.exists("registry_test"));

        let loaded: ForestRegistry = store.load("registry_test").unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn missing_file_is_persistence_error() {
        let dir = ScratchDir::new("missing");
        let store = PackageStore::open(&dir.0).unwrap();
        let err = store.load::<ForestRegistry>("nope").unwrap_err();
        assert!(matches!(err, FincaError::Persistence(_)));
        assert!(err.to_string().contains("nope.dat does not exist"));
    }

    #[test]
    fn corrupt_file_is_persistence_error() {
        let dir = ScratchDir::new("corrupt");
        let store = PackageStore::open(&dir.0).unwrap();
        std::fs::write(store.path_for("broken"), b"not json").unwrap();
        assert!(matches!(
            store.load::<ForestRegistry>("broken"),
            Err(FincaError::Persistence(Some(_)))
        ));
    }
}
