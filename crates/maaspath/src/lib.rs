//! Data directory resolution for MAAS.
//!
//! A snap install keeps its data under `SNAP_DATA` (or `MAAS_DATA`), a deb
//! install under `/var/lib/maas`. The helpers here pick the right root and
//! join a relative path onto it, lexically and without any filesystem access.

pub mod error;
pub mod paths;
pub mod roots;

use std::path::{Path, PathBuf};

pub use error::{PathError, Result};
pub use roots::{DataRoots, InstallKind, RootKind, DEFAULT_DATA_ROOT};

/// Path to a MAAS data file, depending on the install type.
///
/// `SNAP_DATA` (when set and non-empty) is the root, `/var/lib/maas` otherwise.
pub fn data_path(path: impl AsRef<Path>) -> PathBuf {
    DataRoots::from_env().data_path(path)
}

/// Same as [`data_path`], but rooted at `MAAS_DATA`.
pub fn maas_data_path(path: impl AsRef<Path>) -> PathBuf {
    DataRoots::from_env().maas_data_path(path)
}
