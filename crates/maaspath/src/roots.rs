//! Data root configuration for snap and deb installs.
//!
//! A snap points `SNAP_DATA` (and `MAAS_DATA`) at its private data
//! directory. A deb install sets neither and everything lives under
//! `/var/lib/maas`.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};
use crate::paths;

/// Root used when no override is set.
pub const DEFAULT_DATA_ROOT: &str = "/var/lib/maas";

/// Which override a resolution consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootKind {
    SnapData,
    MaasData,
}

impl RootKind {
    pub const ALL: [RootKind; 2] = [RootKind::SnapData, RootKind::MaasData];

    /// Environment variable holding the override for this root.
    pub fn env_var(self) -> &'static str {
        match self {
            RootKind::SnapData => "SNAP_DATA",
            RootKind::MaasData => "MAAS_DATA",
        }
    }
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.env_var())
    }
}

/// How MAAS was installed, as far as the data roots can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallKind {
    Snap,
    Deb,
}

/// The two optional root overrides.
///
/// An empty override means the same as no override.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRoots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    snap_data: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    maas_data: Option<PathBuf>,
}

impl DataRoots {
    /// No overrides; every root is [`DEFAULT_DATA_ROOT`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Read both overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Read both overrides through `lookup`, which maps a variable name to
    /// its value. Unset and empty values are both treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut roots = Self::new();
        for kind in RootKind::ALL {
            if let Some(dir) = lookup(kind.env_var()).filter(|v| !v.is_empty()) {
                roots = roots.with_override(kind, dir);
            }
        }
        roots
    }

    pub fn with_snap_data(self, dir: impl Into<PathBuf>) -> Self {
        self.with_override(RootKind::SnapData, dir)
    }

    pub fn with_maas_data(self, dir: impl Into<PathBuf>) -> Self {
        self.with_override(RootKind::MaasData, dir)
    }

    /// Set (or, with an empty `dir`, clear) the override for `kind`.
    pub fn with_override(mut self, kind: RootKind, dir: impl Into<PathBuf>) -> Self {
        let dir = Some(dir.into()).filter(|d| !d.as_os_str().is_empty());
        match kind {
            RootKind::SnapData => self.snap_data = dir,
            RootKind::MaasData => self.maas_data = dir,
        }
        self
    }

    /// The raw override for `kind`, exactly as configured.
    pub fn override_for(&self, kind: RootKind) -> Option<&Path> {
        let dir = match kind {
            RootKind::SnapData => self.snap_data.as_deref(),
            RootKind::MaasData => self.maas_data.as_deref(),
        };
        // deserialized values skip the builder
        dir.filter(|d| !d.as_os_str().is_empty())
    }

    /// Snap when `SNAP_DATA` is set, deb otherwise.
    pub fn install_kind(&self) -> InstallKind {
        if self.override_for(RootKind::SnapData).is_some() {
            InstallKind::Snap
        } else {
            InstallKind::Deb
        }
    }

    /// The cleaned override for `kind`, or [`DEFAULT_DATA_ROOT`].
    pub fn root(&self, kind: RootKind) -> PathBuf {
        match self.override_for(kind) {
            Some(dir) => paths::clean(dir),
            None => PathBuf::from(DEFAULT_DATA_ROOT),
        }
    }

    /// Join `path` onto the root for `kind`. Never fails and never touches
    /// the filesystem.
    pub fn resolve(&self, kind: RootKind, path: impl AsRef<Path>) -> PathBuf {
        paths::join(self.root(kind), path)
    }

    /// Like [`DataRoots::resolve`], but refuses segments that are absolute
    /// or that climb above the root.
    pub fn resolve_within(&self, kind: RootKind, path: impl AsRef<Path>) -> Result<PathBuf> {
        let segment = path.as_ref();
        let root = self.root(kind);

        if segment.has_root() {
            tracing::warn!("Refusing absolute data path {:?} under {:?}", segment, root);
            return Err(PathError::AbsoluteSegment {
                segment: segment.to_path_buf(),
            });
        }
        if paths::escapes_base(segment) {
            tracing::warn!("Refusing data path {:?} escaping {:?}", segment, root);
            return Err(PathError::EscapesRoot {
                segment: segment.to_path_buf(),
                root,
            });
        }

        Ok(paths::join(root, segment))
    }

    /// Path under the `SNAP_DATA` root.
    pub fn data_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.resolve(RootKind::SnapData, path)
    }

    /// Path under the `MAAS_DATA` root.
    pub fn maas_data_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.resolve(RootKind::MaasData, path)
    }
}
