//! Path utilities

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Check whether the final dot-separated component of the file name equals `ext`
pub fn has_extension<P: AsRef<Path>>(path: P, ext: &str) -> bool {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| name.rsplit('.').next() == Some(ext))
}

/// Insert `.new` before the extension, or append `.new` when the name has a different extension.
///
/// `a/b.localization` with `ext = ".localization"` becomes `a/b.new.localization`;
/// `a/b.bin` becomes `a/b.bin.new`.
pub fn with_new_suffix<P: AsRef<Path>>(path: P, ext: &str) -> PathBuf {
    let path = path.as_ref();
    let Some(name) = path.file_name() else {
        return with_appended(path, ".new");
    };
    let new_name = match name.to_str().and_then(|n| n.strip_suffix(ext)) {
        Some(stem) => OsString::from(format!("{stem}.new{ext}")),
        None => {
            let mut name = name.to_os_string();
            name.push(".new");
            name
        }
    };
    path.with_file_name(new_name)
}

/// Append a suffix to the whole file name (`x.localization` -> `x.localization.json`)
pub fn with_appended<P: AsRef<Path>>(path: P, suffix: &str) -> PathBuf {
    let mut name = path.as_ref().as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension("dir/a.localization", "localization"));
        assert!(has_extension("a.b.json", "json"));
        assert!(!has_extension("a.localization.json", "localization"));
        assert!(!has_extension("noext", "json"));
    }

    #[test]
    fn test_with_new_suffix() {
        assert_eq!(
            with_new_suffix("dir/a.localization", ".localization"),
            PathBuf::from("dir/a.new.localization")
        );
        assert_eq!(with_new_suffix("a.json", ".json"), PathBuf::from("a.new.json"));
        assert_eq!(with_new_suffix("a.bin", ".json"), PathBuf::from("a.bin.new"));
    }

    #[cfg(unix)]
    #[test]
    fn test_with_new_suffix_keeps_non_utf8_dirs() {
        use std::os::unix::ffi::OsStrExt;

        let dir = Path::new(std::ffi::OsStr::from_bytes(b"caf\xE9"));
        assert_eq!(
            with_new_suffix(dir.join("a.localization"), ".localization"),
            dir.join("a.new.localization")
        );
        assert_eq!(with_new_suffix(dir.join("a.bin"), ".json"), dir.join("a.bin.new"));
    }

    #[test]
    fn test_with_appended() {
        assert_eq!(
            with_appended("a.localization", ".json"),
            PathBuf::from("a.localization.json")
        );
    }
}
