//! Lexical path arithmetic for rewritten references.
//!
//! Nothing here touches the filesystem: targets of rewritten links usually do
//! not exist yet (companion documents are written after the bodies that link
//! to them are rendered).

use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` components.
///
/// `..` directly under the root is dropped, matching how absolute paths
/// behave on every platform. Leading `..` on relative paths is preserved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str())
            }
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
        }
    }
    normalized
}

/// Compute the path from directory `from_dir` to `to`, joined with `/`.
///
/// Both paths must be absolute and share the same root (and drive prefix on
/// Windows); otherwise there is no relative path and `None` is returned.
/// Returns `"."` when both resolve to the same location.
pub fn relative_path(from_dir: &Path, to: &Path) -> Option<String> {
    if !from_dir.is_absolute() || !to.is_absolute() {
        return None;
    }

    let from = normalize_path(from_dir);
    let to = normalize_path(to);
    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();

    if anchor(&from_parts) != anchor(&to_parts) {
        return None;
    }

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = Vec::new();
    for _ in common..from_parts.len() {
        segments.push("..".to_string());
    }
    for component in &to_parts[common..] {
        segments.push(component.as_os_str().to_string_lossy().into_owned());
    }

    if segments.is_empty() {
        Some(".".to_string())
    } else {
        Some(segments.join("/"))
    }
}

/// Prefix and root components of an absolute path.
fn anchor<'a>(parts: &'a [Component<'a>]) -> &'a [Component<'a>] {
    let len = parts
        .iter()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .count();
    &parts[..len]
}

/// Whether a reference is already expressed relative to its containing document.
pub fn is_output_relative(reference: &str) -> bool {
    reference == "."
        || reference == ".."
        || reference.starts_with("./")
        || reference.starts_with("../")
}

/// Mark a computed relative path as explicitly output-relative.
///
/// Paths that descend from the output directory get a `./` prefix so later
/// passes (and later runs) never mistake them for repository-relative paths.
pub fn mark_output_relative(relative: String) -> String {
    if is_output_relative(&relative) {
        relative
    } else {
        format!("./{}", relative)
    }
}

/// Render a path with forward slashes regardless of host separator.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
