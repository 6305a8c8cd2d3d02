//! Filesystem helpers for the lab working directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Name of the folder holding settings and log files
pub const LAB_FOLDER_NAME: &str = ".macrolab";

/// Resolve the base directory and the lab folder inside it.
///
/// A lab folder in the current working directory wins; otherwise the folder
/// lives in the user's home directory and is created on first use.
fn get_lab_dir(folder_name: &str) -> (PathBuf, PathBuf) {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let lab_path = cwd.join(folder_name);

    if lab_path.exists() {
        return (cwd, lab_path);
    }

    let home_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let lab_path = home_path.join(folder_name);

    if !lab_path.exists() {
        let _ = fs::create_dir_all(&lab_path);
    }

    (home_path, lab_path)
}

/// Lab folder
pub static LAB_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    let (_, lab_dir) = get_lab_dir(LAB_FOLDER_NAME);
    lab_dir
});

/// Get path for a file inside the lab folder
pub fn get_file_path(filename: &str) -> PathBuf {
    LAB_DIR.join(filename)
}

/// Get path for a sub folder of the lab folder, creating it if needed
pub fn get_folder_path(folder_name: &str) -> PathBuf {
    let folder_path = LAB_DIR.join(folder_name);
    if !folder_path.exists() {
        let _ = fs::create_dir_all(&folder_path);
    }
    folder_path
}

/// Lowercased extension of a path, if any
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_path() {
        let path = get_file_path("macro_lab_setting.json");
        assert!(path.ends_with("macro_lab_setting.json"));
        assert!(path.starts_with(&*LAB_DIR));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("out.PNG")), Some("png".to_string()));
        assert_eq!(extension_of(Path::new("charts/inpc.svg")), Some("svg".to_string()));
        assert_eq!(extension_of(Path::new("no_extension")), None);
    }
}
