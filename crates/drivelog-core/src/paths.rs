//! Standard paths used by drivelog

use std::path::{Path, PathBuf};

/// Standard drivelog paths
#[derive(Debug, Clone)]
pub struct Paths {
    /// Data directory (~/.local/share/drivelog)
    pub data: PathBuf,
    /// Config directory (~/.config/drivelog)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("drivelog");

        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("drivelog");

        Self { data, config }
    }

    /// Keep data and config together under a single directory
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            data: root.clone(),
            config: root,
        }
    }

    /// SQLite database holding users and daily logs
    pub fn database(&self) -> PathBuf {
        self.data.join("drivelog.db")
    }

    /// Cost configuration file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.json")
    }

    /// Active CLI session
    pub fn session_file(&self) -> PathBuf {
        self.data.join("session.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_root() {
        let paths = Paths::with_root("/tmp/drivelog-test");
        assert_eq!(paths.database(), PathBuf::from("/tmp/drivelog-test/drivelog.db"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/drivelog-test/config.json"));
        assert_eq!(paths.session_file(), PathBuf::from("/tmp/drivelog-test/session.json"));
    }

    #[test]
    fn test_default_paths_are_namespaced() {
        let paths = Paths::new();
        assert!(paths.data.ends_with("drivelog"));
        assert!(paths.config.ends_with("drivelog"));
    }
}
