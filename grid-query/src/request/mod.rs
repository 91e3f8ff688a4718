//! Grid request model and decoder.
//!
//! A [`QueryRequest`] is built fresh for every HTTP request by [`decode`],
//! normalized once with [`QueryRequest::normalize`], then handed to the
//! clause generators.
//!
//! # Example
//!
//! ```
//! use grid_query::{SortDir, decode};
//!
//! let req = decode([
//!     ("draw", "4"),
//!     ("order[0][dir]", "desc"),
//!     ("columns[1][data]", "email"),
//!     ("order[0][column]", "1"),
//! ])
//! .unwrap();
//!
//! assert_eq!(req.draw, 4);
//! assert_eq!(req.columns.len(), 2);
//! assert_eq!(req.columns[1].data_key, "email");
//! assert_eq!(req.sort[0].column_index, 1);
//! assert_eq!(req.sort[0].direction, SortDir::Desc);
//! ```

mod key;
mod normalize;

pub use normalize::{escape_literal, has_regex_metachar};

use crate::constants::FLAG_FALSE;
use crate::error::GridError;
use crate::form::FormValues;
use crate::log;
use key::{ColumnField, FieldKey, OrderField, SearchField};

/// Sort direction requested for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum SortDir {
    /// Ascending order (the protocol default).
    #[default]
    Asc,
    /// Descending order: `DESC`
    Desc,
}

impl SortDir {
    /// Parse an `order[n][dir]` value. Only `desc` means descending.
    #[inline]
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        if raw == "desc" { Self::Desc } else { Self::Asc }
    }
}

/// One entry of the requested multi-column sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct SortSpec {
    /// Zero-based index into [`QueryRequest::columns`].
    pub column_index: usize,
    /// Sort direction.
    pub direction: SortDir,
    /// Column name echoed by newer clients (`order[n][name]`). Never used for SQL.
    pub column_name: String,
}

/// One displayed grid column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ColumnSpec {
    /// Display name (`columns[n][name]`). Never used for SQL.
    pub name: String,
    /// Logical identifier (`columns[n][data]`) resolved through the column map.
    pub data_key: String,
    /// Whether the column takes part in filtering.
    pub searchable: bool,
    /// Whether the column may be sorted on.
    pub orderable: bool,
    search: String,
    /// Whether the column search term is a regular expression.
    pub use_regex: bool,
}

impl ColumnSpec {
    /// Column-level search term.
    ///
    /// Raw as received after [`decode`]; a quoted MySQL literal once the
    /// owning request is normalized.
    #[inline]
    #[must_use]
    pub const fn search(&self) -> &str {
        self.search.as_str()
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            data_key: String::new(),
            searchable: true,
            orderable: true,
            search: String::new(),
            use_regex: false,
        }
    }
}

/// A decoded grid request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct QueryRequest {
    /// Draw counter, echoed back in the response.
    pub draw: i64,
    /// Paging offset of the first row.
    pub start: i64,
    /// Page size; negative means no limit.
    pub length: i64,
    search: String,
    /// Whether the global search term is a regular expression.
    pub use_regex: bool,
    /// Requested sort, primary sort first.
    pub sort: Vec<SortSpec>,
    /// Columns, indexed by their position in the grid.
    pub columns: Vec<ColumnSpec>,
    has_filter: bool,
    normalized: bool,
}

/// Whether a boolean protocol flag is set.
///
/// Only the literal `false` switches a flag off; anything else, including an
/// empty value, counts as set.
///
/// ```
/// use grid_query::is_truthy_flag;
///
/// assert!(is_truthy_flag("true"));
/// assert!(is_truthy_flag(""));
/// assert!(!is_truthy_flag("false"));
/// ```
#[inline]
#[must_use]
pub fn is_truthy_flag(raw: &str) -> bool {
    raw != FLAG_FALSE
}

/// Decode form fields into a [`QueryRequest`].
///
/// Each item is a form key and its effective (first) value. Pairs may arrive
/// in any order; `columns` and `sort` grow to fit the highest index seen,
/// default-filling gaps.
///
/// # Errors
///
/// - [`GridError::NotThisProtocol`] if no `draw` key is present
/// - [`GridError::MalformedKey`] for keys that break the grammar or exceed the index bound
/// - [`GridError::InvalidNumber`] for non-numeric `draw`, `start`, `length`, `order[n][column]`
pub fn decode<I, K, V>(fields: I) -> Result<QueryRequest, GridError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let fields: Vec<(K, V)> = fields.into_iter().collect();

    // Not our protocol: report that before any grammar error
    if !fields.iter().any(|(k, _)| key::root(k.as_ref()) == "draw") {
        return Err(GridError::NotThisProtocol);
    }

    let mut req = QueryRequest::default();
    for (key, value) in &fields {
        req.apply(key.as_ref(), value.as_ref())?;
    }

    Ok(req)
}

/// Decode a [`FormValues`] set, using the first value of every key.
pub fn decode_form(form: &FormValues) -> Result<QueryRequest, GridError> {
    decode(form.effective_values())
}

/// Decode and normalize in one step.
///
/// ```
/// let req = grid_query::parse([("draw", "1"), ("search[value]", "o'neil")]).unwrap();
/// assert!(req.has_filter());
/// assert_eq!(req.search(), r"'o\'neil'");
/// ```
pub fn parse<I, K, V>(fields: I) -> Result<QueryRequest, GridError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut req = decode(fields)?;
    req.normalize();
    Ok(req)
}

impl QueryRequest {
    /// Global search term applied to every searchable column.
    ///
    /// Raw as received after [`decode`]; a quoted MySQL literal once
    /// [`normalize`](Self::normalize) has run. The filter generator splices
    /// it verbatim, so it is read-only.
    #[inline]
    #[must_use]
    pub const fn search(&self) -> &str {
        self.search.as_str()
    }

    /// Whether any filtering was requested. Computed by [`normalize`](Self::normalize).
    #[inline]
    #[must_use]
    pub const fn has_filter(&self) -> bool {
        self.has_filter
    }

    /// Whether [`normalize`](Self::normalize) has already run.
    #[inline]
    #[must_use]
    pub const fn is_normalized(&self) -> bool {
        self.normalized
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), GridError> {
        let Some(field) = FieldKey::parse(key).inspect_err(|_| {
            log::debug!("rejected grid key {key:?}");
        })?
        else {
            log::debug!("ignoring unrecognized form key {key:?}");
            return Ok(());
        };

        match field {
            FieldKey::Draw => self.draw = parse_int(key, value)?,
            FieldKey::Start => self.start = parse_int(key, value)?,
            FieldKey::Length => self.length = parse_int(key, value)?,
            FieldKey::Search(SearchField::Value) => self.search = value.to_string(),
            FieldKey::Search(SearchField::Regex) => self.use_regex = is_truthy_flag(value),
            FieldKey::Order { index, field } => {
                let spec = slot(&mut self.sort, index);
                match field {
                    OrderField::Column => spec.column_index = parse_int(key, value)?,
                    OrderField::Dir => spec.direction = SortDir::from_wire(value),
                    OrderField::Name => spec.column_name = value.to_string(),
                }
            },
            FieldKey::Column { index, field } => {
                let column = slot(&mut self.columns, index);
                match field {
                    ColumnField::Data => column.data_key = value.to_string(),
                    ColumnField::Name => column.name = value.to_string(),
                    ColumnField::Searchable => column.searchable = is_truthy_flag(value),
                    ColumnField::Orderable => column.orderable = is_truthy_flag(value),
                    ColumnField::Search(SearchField::Value) => column.search = value.to_string(),
                    ColumnField::Search(SearchField::Regex) => {
                        column.use_regex = is_truthy_flag(value);
                    },
                }
            },
        }

        Ok(())
    }
}

/// Entry at `index`, growing `entries` with defaults if needed.
///
/// `index` is already bounded by the key grammar.
fn slot<T: Default>(entries: &mut Vec<T>, index: usize) -> &mut T {
    if entries.len() <= index {
        entries.resize_with(index + 1, T::default);
    }
    &mut entries[index]
}

fn parse_int<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, GridError> {
    value
        .parse()
        .map_err(|_| GridError::invalid_number(key, value))
}
