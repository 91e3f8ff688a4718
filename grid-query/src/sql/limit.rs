//! MySQL `LIMIT offset,count` paging fragment.

use crate::request::QueryRequest;

pub(super) fn build(req: &QueryRequest) -> String {
    if req.length < 0 {
        return String::new();
    }
    format!(" LIMIT {},{}", req.start.max(0), req.length)
}

#[cfg(test)]
mod tests {
    use crate::decode;

    #[test]
    fn test_limit() {
        let req = decode([("draw", "1"), ("start", "30"), ("length", "10")]).unwrap();
        assert_eq!(req.limit_clause(), " LIMIT 30,10");
    }

    #[test]
    fn test_negative_length_means_all_rows() {
        let req = decode([("draw", "1"), ("start", "30"), ("length", "-1")]).unwrap();
        assert_eq!(req.limit_clause(), "");
    }

    #[test]
    fn test_negative_start_clamped() {
        let req = decode([("draw", "1"), ("start", "-5"), ("length", "10")]).unwrap();
        assert_eq!(req.limit_clause(), " LIMIT 0,10");
    }

    #[test]
    fn test_defaults() {
        let req = decode([("draw", "1")]).unwrap();
        assert_eq!(req.limit_clause(), " LIMIT 0,0");
    }
}
