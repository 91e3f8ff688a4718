//! MySQL clause generation from a normalized [`QueryRequest`].
//!
//! The generated fragments splice column expressions taken from the
//! caller's [`ColumnMap`] and search terms already quoted by
//! [`QueryRequest::normalize`]. They are pre-escaped literals: never
//! concatenate further unescaped user input into them.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! let columns = HashMap::from([("name", "t1.name"), ("email", "t2.email")]);
//! let req = grid_query::parse([
//!     ("draw", "1"),
//!     ("columns[0][data]", "name"),
//!     ("columns[1][data]", "email"),
//!     ("columns[1][searchable]", "false"),
//!     ("search[value]", "bob"),
//!     ("order[0][column]", "1"),
//!     ("order[0][dir]", "desc"),
//!     ("start", "10"),
//!     ("length", "25"),
//! ])
//! .unwrap();
//!
//! let sql = req
//!     .clauses(&columns)
//!     .unwrap()
//!     .append_to("SELECT t1.name, t2.email FROM users t1 JOIN mail t2 ON t1.id = t2.user_id");
//!
//! assert_eq!(
//!     sql,
//!     "SELECT t1.name, t2.email FROM users t1 JOIN mail t2 ON t1.id = t2.user_id \
//!      WHERE MATCH(t1.name) AGAINST('bob') ORDER BY t2.email DESC LIMIT 10,25"
//! );
//! ```

mod filter;
mod limit;
mod order;

use crate::error::GridError;
use crate::request::QueryRequest;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Maps a column's data key to the SQL column expression it stands for.
///
/// This map is the only source of column SQL: data keys sent by the client
/// are never spliced into a query themselves.
pub trait ColumnMap {
    /// SQL expression for `data_key`, or `None` if the key is not allowed.
    fn column(&self, data_key: &str) -> Option<&str>;
}

impl<K, V, S> ColumnMap for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    #[inline]
    fn column(&self, data_key: &str) -> Option<&str> {
        self.get(data_key).map(AsRef::as_ref)
    }
}

impl<K, V> ColumnMap for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    #[inline]
    fn column(&self, data_key: &str) -> Option<&str> {
        self.get(data_key).map(AsRef::as_ref)
    }
}

impl<K, V> ColumnMap for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn column(&self, data_key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.as_ref() == data_key)
            .map(|(_, v)| v.as_ref())
    }
}

impl<K, V, const N: usize> ColumnMap for [(K, V); N]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    #[inline]
    fn column(&self, data_key: &str) -> Option<&str> {
        self.as_slice().column(data_key)
    }
}

impl<T: ColumnMap + ?Sized> ColumnMap for &T {
    #[inline]
    fn column(&self, data_key: &str) -> Option<&str> {
        (**self).column(data_key)
    }
}

/// Every clause for one request, ready to append to a base query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct QueryClauses {
    /// Filter expression without `WHERE`; empty when nothing is filtered.
    pub filter: String,
    /// ` ORDER BY ...` fragment, always present.
    pub order_by: String,
    /// ` LIMIT offset,count` fragment; empty when every row was requested.
    pub limit: String,
}

impl QueryClauses {
    /// Append the clauses to `base`, adding ` WHERE ` only if there is a filter.
    #[must_use]
    pub fn append_to(&self, base: &str) -> String {
        let mut sql = String::with_capacity(
            base.len() + self.filter.len() + self.order_by.len() + self.limit.len() + 7,
        );
        sql.push_str(base);
        if !self.filter.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.filter);
        }
        sql.push_str(&self.order_by);
        sql.push_str(&self.limit);
        sql
    }
}

impl QueryRequest {
    /// Build the filter expression (without `WHERE`).
    ///
    /// Returns an empty string when the request has no filter; the caller
    /// must then omit the `WHERE` clause entirely.
    ///
    /// # Errors
    ///
    /// [`GridError::UnknownColumn`] for the first searchable column whose
    /// data key is missing from `columns`.
    pub fn filter_clause<M: ColumnMap + ?Sized>(&self, columns: &M) -> Result<String, GridError> {
        filter::build(self, columns)
    }

    /// Build the ` ORDER BY ...` fragment, prefixed with a space.
    ///
    /// Falls back to ` ORDER BY 1` when no sort was requested.
    ///
    /// # Errors
    ///
    /// [`GridError::IndexOutOfRange`], [`GridError::UnknownColumn`] or
    /// [`GridError::NotOrderable`] for the first invalid sort entry.
    pub fn order_clause<M: ColumnMap + ?Sized>(&self, columns: &M) -> Result<String, GridError> {
        order::build(self, columns)
    }

    /// Build the ` LIMIT offset,count` fragment, or `""` for a negative length.
    #[must_use]
    pub fn limit_clause(&self) -> String {
        limit::build(self)
    }

    /// Build filter, order and limit clauses together.
    pub fn clauses<M: ColumnMap + ?Sized>(&self, columns: &M) -> Result<QueryClauses, GridError> {
        Ok(QueryClauses {
            filter: self.filter_clause(columns)?,
            order_by: self.order_clause(columns)?,
            limit: self.limit_clause(),
        })
    }
}
