//! Directory path helpers used by `path` and `cat` configuration

use super::error::ConfigError;
use chrono::{DateTime, Local};
use std::path::{Component, Path, PathBuf};

/// Join `segment` under `dir` and normalize the result lexically
///
/// `.` components are dropped and `..` pops the previous component. Nothing
/// is looked up on disk.
///
/// ```
/// use rust_chain_logger::core::path::join;
///
/// assert_eq!(join("/logs", "app/user"), "/logs/app/user");
/// assert_eq!(join("/logs/", "./app/../user"), "/logs/user");
/// ```
pub fn join(dir: &str, segment: &str) -> String {
    let segment = segment.trim_start_matches(['/', '\\']);
    normalize(Path::new(dir).join(segment))
}

/// Lexically normalize a path into its string form
pub fn normalize(path: impl AsRef<Path>) -> String {
    let mut normalized = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => {
                    normalized.push("..");
                }
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized.to_string_lossy().into_owned()
}

/// Check that `path` can serve as an output directory
///
/// The directory does not need to exist yet; it is created on first write.
/// The path itself and its nearest existing ancestor must be directories,
/// so a path below a regular file is rejected.
pub fn validate_dir(path: &str) -> Result<(), ConfigError> {
    if path.trim().is_empty() {
        return Err(ConfigError::invalid_path(path, "path is empty"));
    }
    if path.contains('\0') {
        return Err(ConfigError::invalid_path(path, "path contains a NUL byte"));
    }
    let candidate = Path::new(path);
    if candidate.exists() && !candidate.is_dir() {
        return Err(ConfigError::invalid_path(path, "path exists and is not a directory"));
    }
    let blocked = candidate
        .ancestors()
        .skip(1)
        .find(|ancestor| ancestor.exists())
        .filter(|ancestor| !ancestor.is_dir());
    if let Some(ancestor) = blocked {
        return Err(ConfigError::invalid_path(
            path,
            format!("'{}' is not a directory", ancestor.display()),
        ));
    }
    Ok(())
}

/// Expand a file-name pattern such as `{Y-m-d}.log` for the given time
///
/// Text inside braces is a date layout where `Y`, `m`, `d`, `H`, `i` and `s`
/// stand for year, month, day, hour, minute and second. Other characters in
/// the braces are copied as-is; text outside braces is literal.
pub fn render_file_name(pattern: &str, now: &DateTime<Local>) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let layout = &rest[start + 1..start + len];
        out.push_str(&now.format(&to_strftime(layout)).to_string());
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}

fn to_strftime(layout: &str) -> String {
    let mut pattern = String::with_capacity(layout.len() * 2);
    for ch in layout.chars() {
        match ch {
            'Y' => pattern.push_str("%Y"),
            'm' => pattern.push_str("%m"),
            'd' => pattern.push_str("%d"),
            'H' => pattern.push_str("%H"),
            'i' => pattern.push_str("%M"),
            's' => pattern.push_str("%S"),
            '%' => pattern.push_str("%%"),
            other => pattern.push(other),
        }
    }
    pattern
}
