use std::path::PathBuf;

use thiserror::Error;

/// Why a segment was refused by strict resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("segment {segment:?} is absolute, expected a path relative to the data root")]
    AbsoluteSegment { segment: PathBuf },

    #[error("segment {segment:?} climbs above data root {root:?}")]
    EscapesRoot { segment: PathBuf, root: PathBuf },
}

pub type Result<T> = std::result::Result<T, PathError>;
