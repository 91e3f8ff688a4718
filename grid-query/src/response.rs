//! Response envelope returned to the grid client.
//!
//! ```json
//! {"data":[...],"draw":3,"recordsFiltered":12,"recordsTotal":57}
//! ```
//!
//! `draw` must echo the request's draw counter so the client can discard
//! out-of-sequence replies.

use crate::request::QueryRequest;
use miniserde::json::{self, Array, Number, Object, Value};

/// Reply to a grid request.
///
/// # Example
///
/// ```
/// use grid_query::GridResponse;
/// use miniserde::json::Value;
///
/// let req = grid_query::parse([("draw", "3")]).unwrap();
/// let rows = vec![Value::String("row".to_string())];
/// let resp = GridResponse::new(&req, 57, 12, rows);
///
/// assert_eq!(
///     resp.to_json(),
///     r#"{"data":["row"],"draw":3,"recordsFiltered":12,"recordsTotal":57}"#
/// );
/// ```
#[derive(Clone)]
#[non_exhaustive]
pub struct GridResponse {
    /// Draw counter echoed from the request.
    pub draw: i64,
    /// Row count before filtering.
    pub records_total: u64,
    /// Row count after filtering.
    pub records_filtered: u64,
    /// Rows of the current page.
    pub data: Vec<Value>,
    /// Error message shown by the client, if any.
    pub error: Option<String>,
}

impl std::fmt::Debug for GridResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Row contents can be large; show the count only
        f.debug_struct("GridResponse")
            .field("draw", &self.draw)
            .field("records_total", &self.records_total)
            .field("records_filtered", &self.records_filtered)
            .field("data", &self.data.len())
            .field("error", &self.error)
            .finish()
    }
}

impl GridResponse {
    /// Successful reply for `req`.
    #[must_use]
    pub const fn new(
        req: &QueryRequest,
        records_total: u64,
        records_filtered: u64,
        data: Vec<Value>,
    ) -> Self {
        Self {
            draw: req.draw,
            records_total,
            records_filtered,
            data,
            error: None,
        }
    }

    /// Error reply. `draw` should be the request's counter when it is known.
    #[must_use]
    pub fn from_error(draw: i64, message: impl Into<String>) -> Self {
        Self {
            draw,
            records_total: 0,
            records_filtered: 0,
            data: Vec::new(),
            error: Some(message.into()),
        }
    }

    /// JSON value of the envelope. `error` is present only when set.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut data = Array::new();
        data.extend(self.data.iter().cloned());

        let mut obj = Object::new();
        obj.insert("draw".to_string(), Value::Number(Number::I64(self.draw)));
        obj.insert(
            "recordsTotal".to_string(),
            Value::Number(Number::U64(self.records_total)),
        );
        obj.insert(
            "recordsFiltered".to_string(),
            Value::Number(Number::U64(self.records_filtered)),
        );
        obj.insert("data".to_string(), Value::Array(data));
        if let Some(error) = &self.error {
            obj.insert("error".to_string(), Value::String(error.clone()));
        }
        Value::Object(obj)
    }

    /// Serialize the envelope to a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        json::to_string(&self.to_value())
    }
}
