//! Argument checks performed before any request leaves the process.

use crate::error::GiphyError;

/// Largest page size the search endpoint accepts.
pub const MAX_LIMIT: u32 = 50;

/// Largest offset the search endpoint accepts.
pub const MAX_OFFSET: u32 = 4999;

pub fn validate_query(query: &str) -> Result<(), GiphyError> {
    if query.trim().is_empty() {
        return Err(GiphyError::Validation(
            "Query parameter is required and must be a string".to_string(),
        ));
    }
    Ok(())
}

/// Checks the paging window; ratings are already constrained by [`Rating`](crate::models::Rating).
pub fn validate_search_params(limit: u32, offset: u32) -> Result<(), GiphyError> {
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(GiphyError::Validation(format!(
            "Limit must be an integer between 1 and {}",
            MAX_LIMIT
        )));
    }
    if offset > MAX_OFFSET {
        return Err(GiphyError::Validation(format!(
            "Offset must be between 0 and {}",
            MAX_OFFSET
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query() {
        assert!(validate_query("funny cats").is_ok());

        let err = validate_query("").unwrap_err();
        assert!(err.to_string().contains("Query parameter is required"));

        assert!(validate_query("   \t").is_err());
    }

    #[test]
    fn test_validate_search_params_valid() {
        assert!(validate_search_params(10, 0).is_ok());
        assert!(validate_search_params(1, 0).is_ok());
        assert!(validate_search_params(50, 1000).is_ok());
        assert!(validate_search_params(50, MAX_OFFSET).is_ok());
    }

    #[test]
    fn test_validate_search_params_limit_out_of_range() {
        let err = validate_search_params(0, 0).unwrap_err();
        assert!(err.to_string().starts_with("Limit must be"));

        let err = validate_search_params(100, 0).unwrap_err();
        assert!(err.to_string().starts_with("Limit must be"));
    }

    #[test]
    fn test_validate_search_params_offset_too_large() {
        let err = validate_search_params(10, MAX_OFFSET + 1).unwrap_err();
        assert!(err.to_string().starts_with("Offset must be"));
    }
}
