//! Versioned on-disk encoding of collection structures.
//!
//! Each structure is stored as a single version byte followed by its
//! postcard payload. Decoding is fallible so a damaged snapshot surfaces as
//! an error instead of taking the process down.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

pub use v1 as latest;

pub mod v1;

pub mod error {
    use super::StructureKind;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum SnapshotError {
        #[error("{kind} snapshot is empty")]
        Empty { kind: StructureKind },

        #[error("{kind} snapshot has unsupported version {version}")]
        UnsupportedVersion { kind: StructureKind, version: u8 },

        #[error("{kind} snapshot is malformed: {source}")]
        Malformed {
            kind: StructureKind,
            #[source]
            source: postcard::Error,
        },
    }
}

use error::SnapshotError;

/// The four structures that make up a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StructureKind {
    Table,
    Index,
    FuzzyByTerm,
    FuzzyByBigram,
}

impl StructureKind {
    pub const ALL: [StructureKind; 4] = [
        StructureKind::Table,
        StructureKind::Index,
        StructureKind::FuzzyByTerm,
        StructureKind::FuzzyByBigram,
    ];
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureKind::Table => write!(f, "table"),
            StructureKind::Index => write!(f, "index"),
            StructureKind::FuzzyByTerm => write!(f, "fuzzy dictionary"),
            StructureKind::FuzzyByBigram => write!(f, "bigram dictionary"),
        }
    }
}

pub trait Snapshot: Serialize + DeserializeOwned {
    const VERSION: u8;
    const KIND: StructureKind;

    fn encode(&self) -> Result<Vec<u8>, SnapshotError> {
        postcard::to_extend(self, vec![Self::VERSION]).map_err(|source| SnapshotError::Malformed {
            kind: Self::KIND,
            source,
        })
    }

    fn decode(data: &[u8]) -> Result<Self, SnapshotError> {
        let (version, payload) = data
            .split_first()
            .ok_or(SnapshotError::Empty { kind: Self::KIND })?;

        if *version != Self::VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                kind: Self::KIND,
                version: *version,
            });
        }

        postcard::from_bytes(payload).map_err(|source| SnapshotError::Malformed {
            kind: Self::KIND,
            source,
        })
    }
}
