//! Filter expression: full-text `MATCH ... AGAINST` or `REGEXP` per searchable column.

use super::ColumnMap;
use crate::error::GridError;
use crate::request::QueryRequest;

const OR: &str = " OR ";

/// Build the filter expression for `req`.
///
/// For every searchable column, in column order, emits the global term
/// first and then the column's own term, joined with ` OR `.
pub(super) fn build<M: ColumnMap + ?Sized>(
    req: &QueryRequest,
    columns: &M,
) -> Result<String, GridError> {
    if !req.has_filter() {
        return Ok(String::new());
    }

    let mut sql = String::new();
    for column in req.columns.iter().filter(|c| c.searchable) {
        let sql_name = columns
            .column(&column.data_key)
            .ok_or_else(|| GridError::unknown_column(&column.data_key))?;

        if !req.search().is_empty() {
            push_term(&mut sql, sql_name, req.search(), req.use_regex);
        }
        if !column.search().is_empty() {
            push_term(&mut sql, sql_name, column.search(), column.use_regex);
        }
    }

    Ok(sql)
}

/// Append one match condition; `literal` is already quoted.
fn push_term(sql: &mut String, column: &str, literal: &str, regex: bool) {
    if !sql.is_empty() {
        sql.push_str(OR);
    }
    if regex {
        sql.push_str(column);
        sql.push_str(" REGEXP ");
        sql.push_str(literal);
    } else {
        sql.push_str("MATCH(");
        sql.push_str(column);
        sql.push_str(") AGAINST(");
        sql.push_str(literal);
        sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use crate::{GridError, parse};
    use std::collections::HashMap;

    fn columns() -> HashMap<&'static str, &'static str> {
        HashMap::from([("name", "t1.name"), ("email", "t2.email"), ("age", "t1.age")])
    }

    #[test]
    fn test_no_filter_is_empty() {
        let req = parse([("draw", "1"), ("columns[0][data]", "ghost")]).unwrap();
        assert_eq!(req.filter_clause(&columns()), Ok(String::new()));
    }

    #[test]
    fn test_unnormalized_request_has_no_filter() {
        let req = crate::decode([("draw", "1"), ("search[value]", "x")]).unwrap();
        assert_eq!(req.filter_clause(&columns()), Ok(String::new()));
    }

    #[test]
    fn test_column_search() {
        let req = parse([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("columns[0][search][value]", "bob"),
        ])
        .unwrap();
        assert_eq!(
            req.filter_clause(&columns()).unwrap(),
            "MATCH(t1.name) AGAINST('bob')"
        );
    }

    #[test]
    fn test_global_search_spans_searchable_columns() {
        let req = parse([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("columns[1][data]", "email"),
            ("columns[2][data]", "age"),
            ("columns[2][searchable]", "false"),
            ("search[value]", "al"),
        ])
        .unwrap();
        assert_eq!(
            req.filter_clause(&columns()).unwrap(),
            "MATCH(t1.name) AGAINST('al') OR MATCH(t2.email) AGAINST('al')"
        );
    }

    #[test]
    fn test_global_before_column_term() {
        let req = parse([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("columns[0][search][value]", "^b.b$"),
            ("columns[0][search][regex]", "true"),
            ("search[value]", "x"),
        ])
        .unwrap();
        assert_eq!(
            req.filter_clause(&columns()).unwrap(),
            "MATCH(t1.name) AGAINST('x') OR t1.name REGEXP '^b.b$'"
        );
    }

    #[test]
    fn test_global_regex() {
        let req = parse([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("columns[1][data]", "email"),
            ("search[value]", "a|b"),
            ("search[regex]", "true"),
        ])
        .unwrap();
        assert_eq!(
            req.filter_clause(&columns()).unwrap(),
            "t1.name REGEXP 'a|b' OR t2.email REGEXP 'a|b'"
        );
    }

    #[test]
    fn test_non_searchable_column_term_ignored() {
        let req = parse([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("columns[0][searchable]", "false"),
            ("columns[0][search][value]", "bob"),
        ])
        .unwrap();
        assert!(req.has_filter());
        assert_eq!(req.filter_clause(&columns()).unwrap(), "");
    }

    #[test]
    fn test_unknown_column_fails_even_without_own_term() {
        let req = parse([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("columns[0][search][value]", "bob"),
            ("columns[1][data]", "ghost"),
        ])
        .unwrap();
        assert_eq!(
            req.filter_clause(&columns()),
            Err(GridError::unknown_column("ghost"))
        );
    }

    #[test]
    fn test_unknown_non_searchable_column_is_fine() {
        let req = parse([
            ("draw", "1"),
            ("columns[0][data]", "ghost"),
            ("columns[0][searchable]", "false"),
            ("columns[1][data]", "name"),
            ("search[value]", "x"),
        ])
        .unwrap();
        assert_eq!(
            req.filter_clause(&columns()).unwrap(),
            "MATCH(t1.name) AGAINST('x')"
        );
    }

    #[test]
    fn test_injection_attempt_stays_quoted() {
        let req = parse([
            ("draw", "1"),
            ("columns[0][data]", "name"),
            ("search[value]", "') OR 1=1 -- "),
        ])
        .unwrap();
        assert_eq!(
            req.filter_clause(&columns()).unwrap(),
            r"MATCH(t1.name) AGAINST('\') OR 1=1 -- ')"
        );
    }
}
