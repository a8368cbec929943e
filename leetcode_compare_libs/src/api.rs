use serde::Serialize;

/// Body returned by every failed API call: a stable error code and the
/// causing message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

/// Successful comparison payload: one record per requested user, keyed the
/// way they were passed in.
#[derive(Debug, Serialize)]
pub struct ComparisonResponse<D>
where
    D: Serialize,
{
    pub user1: D,
    pub user2: D,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_comparison_response_keys() {
        let response = ComparisonResponse {
            user1: "alice",
            user2: "bob",
        };
        let body: Value = serde_json::to_value(&response).unwrap();

        assert_eq!(body["user1"], "alice");
        assert_eq!(body["user2"], "bob");
    }

    #[test]
    fn test_error_response_body() {
        let response = ErrorResponse::new("failed to fetch leetcode data", "user hoge not found");
        let body: Value = serde_json::to_value(&response).unwrap();

        assert_eq!(body["error"], "failed to fetch leetcode data");
        assert_eq!(body["message"], "user hoge not found");
    }
}
