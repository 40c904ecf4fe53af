// src/infra/paths.rs — Path management
//
// All paths respect the DISTILL_HOME environment variable for isolation.
// When DISTILL_HOME is set, config and data live under that directory.
// When unset, config uses ~/.distill/ and data uses the platform data dir.

use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::OnceLock;

static PROJECT_DIRS: OnceLock<ProjectDirs> = OnceLock::new();

fn project_dirs() -> &'static ProjectDirs {
    PROJECT_DIRS.get_or_init(|| {
        ProjectDirs::from("", "", "distill").expect("Could not determine home directory")
    })
}

/// Returns the DISTILL_HOME override, if set.
fn distill_home() -> Option<PathBuf> {
    std::env::var_os("DISTILL_HOME").map(PathBuf::from)
}

/// Configuration directory: $DISTILL_HOME/ or ~/.distill/
pub fn config_dir() -> PathBuf {
    if let Some(home) = distill_home() {
        return home;
    }
    dirs_home().join(".distill")
}

/// Data directory: $DISTILL_HOME/data/ or the platform-local data dir
pub fn data_dir() -> PathBuf {
    if let Some(home) = distill_home() {
        return home.join("data");
    }
    project_dirs().data_local_dir().to_path_buf()
}

/// Home directory
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .expect("Could not determine home directory")
        .home_dir()
        .to_path_buf()
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Persisted memory snapshot path
pub fn memory_file_path() -> PathBuf {
    data_dir().join("memory.json")
}

/// Ensure the required directories exist
pub fn ensure_dirs() -> anyhow::Result<()> {
    for dir in [config_dir(), data_dir()] {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
