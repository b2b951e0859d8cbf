use crate::catalog::Catalog;
use crate::models::VoteRequest;

pub const MIN_TOKEN_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("photoId must be a non-empty string")]
    InvalidPhoto,
    #[error("voterToken must be at least {MIN_TOKEN_LENGTH} characters")]
    InvalidToken,
    #[error("No photo exists with that id")]
    UnknownPhoto,
}

/// Admission checks for a vote, in order, stopping at the first failure:
/// photo id present, voter token long enough, photo id known to the catalog.
pub fn validate_vote_request(
    request: &VoteRequest,
    catalog: &Catalog,
) -> Result<(), ValidationError> {
    if request.photo_id.is_empty() {
        return Err(ValidationError::InvalidPhoto);
    }
    // Counted in characters, not bytes, so multibyte tokens are not
    // over-credited.
    if request.voter_token.chars().count() < MIN_TOKEN_LENGTH {
        return Err(ValidationError::InvalidToken);
    }
    if !catalog.contains(&request.photo_id) {
        return Err(ValidationError::UnknownPhoto);
    }
    Ok(())
}
