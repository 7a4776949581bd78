use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Create a directory (and parents) if needed, returning it
pub fn ensure_directory(path: &Path) -> Result<PathBuf> {
    fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}

/// Check that files can be created in `dir`
///
/// Writes and removes a probe file; a missing directory counts as no access.
pub fn check_permissions(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }
    let probe = dir.join(".fiji-automator-write-test.tmp");
    match fs::File::create(&probe) {
        Ok(_) => fs::remove_file(&probe).is_ok(),
        Err(_) => false,
    }
}

/// Translate a shell-style glob (`*`, `?`) into an anchored, case-insensitive regex
pub fn glob_to_regex(pattern: &str) -> Option<Regex> {
    let mut re = String::from("(?i)^");
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re).ok()
}

/// Files directly inside `dir` whose names match `pattern`, sorted
pub fn find_files(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let Some(re) = glob_to_regex(pattern) else {
        return Vec::new();
    };
    let mut found: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| re.is_match(&e.file_name().to_string_lossy()))
        .map(|e| e.into_path())
        .collect();
    found.sort();
    found
}

pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path)?;
    Ok(())
}

/// Paths as ImageJ macros expect them (forward slashes on every platform)
pub trait MacroPath {
    fn to_macro_path(&self) -> String;
}

impl MacroPath for Path {
    fn to_macro_path(&self) -> String {
        self.to_string_lossy().replace('\\', "/")
    }
}

impl MacroPath for str {
    fn to_macro_path(&self) -> String {
        self.replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_directory_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b");
        assert!(!target.exists());
        assert_eq!(ensure_directory(&target).unwrap(), target);
        assert!(target.is_dir());
    }

    #[test]
    fn permissions_on_writable_and_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_permissions(dir.path()));
        assert!(!check_permissions(&dir.path().join("nonexistent")));
        // Probe file must not be left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn macro_path_uses_forward_slashes() {
        assert_eq!(
            r"C:\Users\test\file.txt".to_macro_path(),
            "C:/Users/test/file.txt"
        );
        assert_eq!(Path::new("/data/in.tif").to_macro_path(), "/data/in.tif");
    }

    #[test]
    fn find_files_matches_glob() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["test1.txt", "test2.txt", "other.log"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("sub.txt")).unwrap();

        assert_eq!(find_files(dir.path(), "*.txt").len(), 2);
        assert_eq!(find_files(dir.path(), "*").len(), 3);
        assert_eq!(find_files(dir.path(), "test?.TXT").len(), 2);
        assert!(find_files(&dir.path().join("missing"), "*").is_empty());
    }

    #[test]
    fn glob_escapes_regex_metacharacters() {
        let re = glob_to_regex("*thunder(storm)*.jar").unwrap();
        assert!(re.is_match("my-thunder(storm)-1.3.jar"));
        assert!(!re.is_match("thunderstorm.jar"));
    }

    #[test]
    fn remove_existing_then_missing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("dest.txt");
        fs::write(&dest, "test content").unwrap();

        remove_file(&dest).unwrap();
        assert!(!dest.exists());
        assert!(remove_file(&dest).is_err());
    }
}
