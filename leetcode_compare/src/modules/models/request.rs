use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters of the comparison endpoint. Both usernames are required
/// and must be non-empty.
#[derive(Debug, Serialize, Deserialize, Validate, PartialEq, Eq, Clone)]
pub struct CompareParameter {
    #[validate(length(min = 1, message = "user1 must not be empty"))]
    pub user1: String,
    #[validate(length(min = 1, message = "user2 must not be empty"))]
    pub user2: String,
}
