//! `ORDER BY` fragment from the requested sort entries.

use super::ColumnMap;
use crate::error::GridError;
use crate::request::{QueryRequest, SortDir};

/// Used when no sort entry was requested, so paging stays deterministic.
const DEFAULT_ORDER_BY: &str = " ORDER BY 1";

pub(super) fn build<M: ColumnMap + ?Sized>(
    req: &QueryRequest,
    columns: &M,
) -> Result<String, GridError> {
    let mut sql = String::new();

    for spec in &req.sort {
        let column = req
            .columns
            .get(spec.column_index)
            .ok_or(GridError::IndexOutOfRange {
                index: spec.column_index,
                len: req.columns.len(),
            })?;
        let sql_name = columns
            .column(&column.data_key)
            .ok_or_else(|| GridError::unknown_column(&column.data_key))?;
        if !column.orderable {
            return Err(GridError::NotOrderable {
                data_key: column.data_key.clone(),
            });
        }

        sql.push_str(if sql.is_empty() { " ORDER BY " } else { "," });
        sql.push_str(sql_name);
        if spec.direction == SortDir::Desc {
            sql.push_str(" DESC");
        }
    }

    if sql.is_empty() {
        sql.push_str(DEFAULT_ORDER_BY);
    }
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use crate::{GridError, decode};

    const COLUMNS: [(&str, &str); 3] = [("name", "t1.name"), ("email", "t2.email"), ("age", "t1.age")];

    #[test]
    fn test_single_sort() {
        let req = decode([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("order[0][column]", "0"),
            ("order[0][dir]", "asc"),
        ])
        .unwrap();
        assert_eq!(req.order_clause(&COLUMNS).unwrap(), " ORDER BY t1.name");
    }

    #[test]
    fn test_multi_sort_keeps_request_order() {
        let req = decode([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("columns[1][data]", "email"),
            ("columns[2][data]", "age"),
            ("order[1][column]", "0"),
            ("order[0][column]", "2"),
            ("order[0][dir]", "desc"),
        ])
        .unwrap();
        assert_eq!(
            req.order_clause(&COLUMNS).unwrap(),
            " ORDER BY t1.age DESC,t1.name"
        );
    }

    #[test]
    fn test_no_sort_defaults_to_first_column() {
        let req = decode([("draw", "1"), ("columns[0][data]", "name")]).unwrap();
        assert_eq!(req.order_clause(&COLUMNS).unwrap(), " ORDER BY 1");
    }

    #[test]
    fn test_index_out_of_range() {
        let req = decode([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("order[0][column]", "5"),
        ])
        .unwrap();
        assert_eq!(
            req.order_clause(&COLUMNS),
            Err(GridError::IndexOutOfRange { index: 5, len: 1 })
        );
    }

    #[test]
    fn test_unknown_column() {
        let req = decode([
            ("draw", "1"),
            ("columns[0][data]", "ghost"),
            ("order[0][column]", "0"),
        ])
        .unwrap();
        assert_eq!(
            req.order_clause(&COLUMNS),
            Err(GridError::unknown_column("ghost"))
        );
    }

    #[test]
    fn test_not_orderable() {
        let req = decode([
            ("draw", "1"),
            ("columns[0][data]", "email"),
            ("columns[0][orderable]", "false"),
            ("order[0][column]", "0"),
        ])
        .unwrap();
        assert_eq!(
            req.order_clause(&COLUMNS),
            Err(GridError::NotOrderable {
                data_key: "email".to_string()
            })
        );
    }

    #[test]
    fn test_unsorted_unknown_column_is_fine() {
        let req = decode([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("columns[1][data]", "ghost"),
            ("order[0][column]", "0"),
        ])
        .unwrap();
        assert_eq!(req.order_clause(&COLUMNS).unwrap(), " ORDER BY t1.name");
    }
}
