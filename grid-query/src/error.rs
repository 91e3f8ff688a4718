//! Error type shared by the decoder and the clause generators.

use crate::constants::MAX_ENTRY_INDEX;

/// Errors produced while decoding a grid request or generating SQL from it.
///
/// All variants are deterministic and data-dependent: retrying the same
/// input yields the same error. `NotThisProtocol` means the request simply
/// isn't a grid request; every other variant is a client error.
///
/// # Example
///
/// ```
/// use grid_query::{GridError, decode};
///
/// let err = decode([("start", "0")]).unwrap_err();
/// assert!(err.is_not_this_protocol());
/// assert_eq!(err.status_code(), None);
///
/// let err = decode([("draw", "1"), ("columns[x][data]", "id")]).unwrap_err();
/// assert!(matches!(err, GridError::MalformedKey { .. }));
/// assert_eq!(err.status_code(), Some(400));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GridError {
    /// No `draw` key was present, so the request does not follow the grid protocol.
    NotThisProtocol,

    /// A form key does not follow the key grammar, or its index is out of bounds.
    MalformedKey {
        /// The raw form key as received.
        key: String,
    },

    /// A numeric field could not be parsed.
    InvalidNumber {
        /// The raw form key as received.
        key: String,
        /// The offending value.
        value: String,
    },

    /// A column's data key has no entry in the caller's column map.
    UnknownColumn {
        /// The data key sent by the client.
        data_key: String,
    },

    /// A sort entry references a column index past the decoded columns.
    IndexOutOfRange {
        /// The requested column index.
        index: usize,
        /// Number of decoded columns.
        len: usize,
    },

    /// A sort entry targets a column flagged as not orderable.
    NotOrderable {
        /// The data key of the column.
        data_key: String,
    },
}

impl GridError {
    /// Create a malformed-key error.
    #[inline]
    #[must_use]
    pub fn malformed(key: &str) -> Self {
        Self::MalformedKey {
            key: key.to_string(),
        }
    }

    /// Create an invalid-number error.
    #[inline]
    #[must_use]
    pub fn invalid_number(key: &str, value: &str) -> Self {
        Self::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an unknown-column error.
    #[inline]
    #[must_use]
    pub fn unknown_column(data_key: &str) -> Self {
        Self::UnknownColumn {
            data_key: data_key.to_string(),
        }
    }

    /// Returns true if the request should be served without grid semantics.
    #[inline]
    #[must_use]
    pub const fn is_not_this_protocol(&self) -> bool {
        matches!(self, Self::NotThisProtocol)
    }

    /// HTTP status an HTTP layer should answer with.
    ///
    /// `None` for [`GridError::NotThisProtocol`], which is not a failure.
    #[inline]
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotThisProtocol => None,
            _ => Some(400),
        }
    }
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotThisProtocol => f.write_str("not a grid request: no `draw` key"),
            Self::MalformedKey { key } => write!(
                f,
                "malformed grid key `{key}` (expected root[index][field], index 0..={MAX_ENTRY_INDEX})"
            ),
            Self::InvalidNumber { key, value } => {
                write!(f, "invalid number for `{key}`: {value:?}")
            },
            Self::UnknownColumn { data_key } => {
                write!(f, "column data key `{data_key}` not found in column map")
            },
            Self::IndexOutOfRange { index, len } => {
                write!(f, "order column {index} out of range ({len} columns)")
            },
            Self::NotOrderable { data_key } => {
                write!(f, "ordering requested on non-orderable column `{data_key}`")
            },
        }
    }
}

impl std::error::Error for GridError {}
