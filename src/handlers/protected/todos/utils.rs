use uuid::Uuid;

use crate::error::ApiError;

pub const NOT_FOUND: &str = "Todo not found";

/// Parse a path id. Malformed ids are reported exactly like missing items.
pub fn parse_item_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_not_found() {
        let err = parse_item_id("64f0c2a9e1b2").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
        assert!(parse_item_id(&Uuid::new_v4().to_string()).is_ok());
    }
}
