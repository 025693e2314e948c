use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Location of the optional user config, respecting XDG_CONFIG_HOME.
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"));
    config_dir.join("listkit").join("config.toml")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Load the user config. A missing file is the default config; an unparsable
/// file is reported once on stderr and treated as default.
pub fn load_config() -> Config {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Config {
    let Ok(content) = fs::read_to_string(path) else {
        return Config::default();
    };
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("warning: ignoring bad config at {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Work out the data directory for this invocation:
/// `--data-dir` flag, then config file, then the XDG data home.
pub fn resolve_data_dir(flag: Option<&Path>, config: &Config) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }
    default_data_dir()
}

fn default_data_dir() -> PathBuf {
    let data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"));
    data_home.join("listkit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flag_beats_config() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        let dir = resolve_data_dir(Some(Path::new("/from/flag")), &config);
        assert_eq!(dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_config_beats_default() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };
        assert_eq!(resolve_data_dir(None, &config), PathBuf::from("/from/config"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_from(&tmp.path().join("nope.toml"));
        assert!(config.data_dir.is_none());
        assert!(!config.import.auto_confirm);
    }

    #[test]
    fn test_load_config_parses_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "data_dir = \"/srv/lists\"\n\n[import]\nauto_confirm = true\n",
        )
        .unwrap();
        let config = load_config_from(&path);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/lists")));
        assert!(config.import.auto_confirm);
    }

    #[test]
    fn test_load_config_garbage_is_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is [ not toml").unwrap();
        let config = load_config_from(&path);
        assert!(config.data_dir.is_none());
    }
}
