//! Lexical path handling for data roots.
//!
//! Nothing in here touches the filesystem. Paths are normalized purely by
//! looking at their components:
//! - Duplicate and trailing separators collapse
//! - `.` elements disappear
//! - `..` eats the element before it, and stops at the root of a rooted path
//! - A rooted segment joined onto a base stays under that base

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path.
///
/// `/custom//dir/` -> `/custom/dir`, `a/./b/../c` -> `a/c`, `/..` -> `/`.
/// An empty result becomes `.` (or the root, for rooted input).
pub fn clean(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let rooted = path.has_root();

    let mut cleaned = PathBuf::new();
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component),
            Component::CurDir => {}
            Component::ParentDir => match parts.last().copied() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `..` at the root is still the root
                _ if rooted => {}
                _ => parts.push(component),
            },
            Component::Normal(_) => parts.push(component),
        }
    }

    cleaned.extend(parts);
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Join `segment` onto `base` and clean the result.
///
/// Unlike [`Path::join`], a rooted `segment` does not replace `base`:
/// `join("/var/lib/maas", "/etc/x")` is `/var/lib/maas/etc/x`.
pub fn join(base: impl AsRef<Path>, segment: impl AsRef<Path>) -> PathBuf {
    let (base, segment) = (base.as_ref(), segment.as_ref());

    if base.as_os_str().is_empty() {
        if segment.as_os_str().is_empty() {
            return PathBuf::new();
        }
        return clean(segment);
    }

    let mut joined = base.to_path_buf();
    joined.extend(
        segment
            .components()
            .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir)),
    );
    clean(joined)
}

/// Whether walking `segment` from its starting directory ever climbs above
/// it via `..`.
///
/// `a/../b` stays put, `../x` and `a/../../x` escape.
pub fn escapes_base(segment: impl AsRef<Path>) -> bool {
    let mut depth = 0usize;
    for component in segment.as_ref().components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::ParentDir => {
                if depth == 0 {
                    return true;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    false
}
