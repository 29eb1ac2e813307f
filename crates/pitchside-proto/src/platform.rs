use std::path::{Path, PathBuf};

const APP_DIR: &str = "pitchside";

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/pitchside/ (XDG standard)
    // instead of macOS Application Support for consistency
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}

/// Resolve a player command to an executable path.
///
/// Absolute or relative paths are returned as-is when they exist; bare names
/// are searched on PATH (with `.exe` appended on Windows).
pub fn find_player_binary(command: &str) -> Option<PathBuf> {
    let direct = Path::new(command);
    if direct.components().count() > 1 {
        return direct.exists().then(|| direct.to_path_buf());
    }

    #[cfg(unix)]
    let names = [command.to_string()];
    #[cfg(windows)]
    let names = [format!("{}.exe", command), command.to_string()];

    find_on_path(&names)
}

fn find_on_path(names: &[String]) -> Option<PathBuf> {
    let path = std::env::var("PATH").ok()?;
    #[cfg(unix)]
    let sep = ":";
    #[cfg(windows)]
    let sep = ";";
    for dir in path.split(sep) {
        for name in names {
            let p = PathBuf::from(dir).join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }
    None
}
