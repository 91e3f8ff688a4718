// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs - extensive doc changes needed
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::must_use_candidate)] // Not all returned values need must_use
#![allow(clippy::items_after_statements)] // const in functions - intentional for locality
// Sparse entries are resized before they are indexed
#![allow(clippy::indexing_slicing)]
#![cfg_attr(test, allow(clippy::unwrap_used))] // Tests assert on known-good input

//! # grid-query - Server-side processing for DataTables-style grids
//!
//! Turns the form fields a grid client sends for paging, sorting and
//! searching into a validated [`QueryRequest`], then into MySQL filter,
//! order and limit fragments to splice into a hand-written query.
//!
//! ## Quick Start
//!
//! ```
//! use std::collections::HashMap;
//!
//! // Data keys the client may send, mapped to real column expressions
//! let columns = HashMap::from([("name", "t1.name")]);
//!
//! let req = grid_query::parse([
//!     ("draw", "1"),
//!     ("columns[0][data]", "name"),
//!     ("columns[0][searchable]", "true"),
//!     ("columns[0][search][value]", "bob"),
//!     ("order[0][column]", "0"),
//!     ("order[0][dir]", "asc"),
//! ])
//! .unwrap();
//!
//! assert_eq!(req.filter_clause(&columns).unwrap(), "MATCH(t1.name) AGAINST('bob')");
//! assert_eq!(req.order_clause(&columns).unwrap(), " ORDER BY t1.name");
//! ```
//!
//! ## Pipeline
//!
//! | Step | Function | Fails with |
//! |------|----------|------------|
//! | Decode | [`decode`] / [`decode_form`] | `NotThisProtocol`, `MalformedKey`, `InvalidNumber` |
//! | Normalize | [`QueryRequest::normalize`] | never |
//! | Filter | [`QueryRequest::filter_clause`] | `UnknownColumn` |
//! | Order | [`QueryRequest::order_clause`] | `IndexOutOfRange`, `UnknownColumn`, `NotOrderable` |
//! | Limit | [`QueryRequest::limit_clause`] | never |
//!
//! [`parse`] runs decode and normalize together.
//!
//! ## Not a grid request
//!
//! A request without a `draw` key yields [`GridError::NotThisProtocol`];
//! serve it as an ordinary page rather than an error:
//!
//! ```
//! use grid_query::{FormValues, decode_form};
//!
//! let form = FormValues::parse_urlencoded("page=2");
//! let err = decode_form(&form).unwrap_err();
//! assert!(err.is_not_this_protocol());
//! ```
//!
//! ## Security
//!
//! Search terms are spliced as MySQL string literals, quoted and escaped by
//! [`escape_literal`] during normalization. Column SQL only ever comes from
//! the caller's [`ColumnMap`]. The fragments are pre-escaped: never
//! concatenate further unescaped user input into them. Column and sort
//! indices are capped at [`MAX_ENTRY_INDEX`] while decoding.

pub mod constants;
mod error;
mod form;
mod log;
mod request;
mod response;
mod sql;

pub use constants::MAX_ENTRY_INDEX;
pub use error::GridError;
pub use form::{DecodeError, FormValues, url_decode};
pub use request::{
    ColumnSpec, QueryRequest, SortDir, SortSpec, decode, decode_form, escape_literal,
    has_regex_metachar, is_truthy_flag, parse,
};
pub use response::GridResponse;
pub use sql::{ColumnMap, QueryClauses};

/// Prelude module for convenient imports.
///
/// ```
/// use grid_query::prelude::*;
///
/// let req = parse([("draw", "1")]).unwrap();
/// assert_eq!(req.order_clause(&[("id", "t.id")]).unwrap(), " ORDER BY 1");
/// ```
pub mod prelude {
    pub use crate::{
        ColumnMap, ColumnSpec, FormValues, GridError, GridResponse, QueryClauses, QueryRequest,
        SortDir, SortSpec, decode, decode_form, parse,
    };
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
