//! HTTP handlers for jotter-api.

pub mod ai;
pub mod health;
pub mod notes;

use uuid::Uuid;

use crate::error::ApiError;

/// Parse a note id path segment. Anything that is not a UUID cannot name a
/// note, so it is a 404 rather than a 400.
pub(crate) fn parse_note_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::note_not_found())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_id() {
        let id = Uuid::now_v7();
        assert_eq!(parse_note_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_note_id("not-a-uuid"),
            Err(ApiError::NotFound(_))
        ));
    }
}
