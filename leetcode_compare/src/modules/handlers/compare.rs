use crate::modules::{
    models::{request::CompareParameter, response::UserMetrics},
    users::aggregator::build_user_metrics,
};
use axum::{
    async_trait,
    extract::{Extension, FromRequestParts},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use http::request::Parts;
use leetcode_compare_libs::{
    api::{ComparisonResponse, ErrorResponse},
    leetcode::model::ProblemTotals,
    LeetCodeApi, LeetCodeClient, LeetCodeError,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tokio::time::{timeout, Duration};
use validator::Validate;

/// Hard deadline for one comparison, covering the totals query and both
/// user pipelines. On expiry the in-flight requests are abandoned.
const COMPARE_TIMEOUT: Duration = Duration::from_secs(15);

type CompareRejection = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("could not fetch data for {username}: {source}")]
    User {
        username: String,
        source: LeetCodeError,
    },
    #[error("comparison did not complete within {0:?}")]
    Timeout(Duration),
}

pub struct ValidatedCompareParameter<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedCompareParameter<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = CompareRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let value: T = serde_structuredqs::from_str(query).map_err(|rejection| {
            tracing::error!("Parsing error: {}", rejection);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "invalid request",
                    format!("both user1 and user2 are required: [{}]", rejection),
                )),
            )
        })?;

        value.validate().map_err(|rejection| {
            tracing::error!("Validation error: {}", rejection);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "invalid request",
                    format!("Validation error: [{}]", rejection).replace('\n', ", "),
                )),
            )
        })?;

        Ok(ValidatedCompareParameter(value))
    }
}

/// Fetches and reduces both users. The totals query runs first and is
/// best-effort; the two user pipelines then run concurrently, and inside
/// each pipeline the profile and tag queries are joined as well. Either
/// pipeline failing fails the comparison as a whole.
pub async fn compare_users<C>(
    client: &C,
    user1: &str,
    user2: &str,
) -> Result<ComparisonResponse<UserMetrics>, CompareError>
where
    C: LeetCodeApi + Sync,
{
    let totals = client.fetch_problem_totals().await;

    let (user1, user2) = tokio::try_join!(
        fetch_user_metrics(client, user1, &totals),
        fetch_user_metrics(client, user2, &totals),
    )?;

    Ok(ComparisonResponse { user1, user2 })
}

async fn fetch_user_metrics<C>(
    client: &C,
    username: &str,
    totals: &ProblemTotals,
) -> Result<UserMetrics, CompareError>
where
    C: LeetCodeApi + Sync,
{
    let result = async {
        let (profile, tags) = tokio::try_join!(
            client.fetch_user_profile(username),
            client.fetch_tag_counts(username),
        )?;

        build_user_metrics(username, profile, tags, totals, Utc::now())
    }
    .await;

    result.map_err(|source| {
        tracing::error!("failed to build metrics for {} cause: {:?}", username, source);
        CompareError::User {
            username: String::from(username),
            source,
        }
    })
}

pub async fn compare(
    ValidatedCompareParameter(params): ValidatedCompareParameter<CompareParameter>,
    Extension(client): Extension<Arc<LeetCodeClient>>,
) -> Result<Json<ComparisonResponse<UserMetrics>>, CompareRejection> {
    let comparison = match timeout(
        COMPARE_TIMEOUT,
        compare_users(client.as_ref(), &params.user1, &params.user2),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(CompareError::Timeout(COMPARE_TIMEOUT)),
    }
    .map_err(|e| {
        tracing::error!("comparison failed cause: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("failed to fetch leetcode data", e)),
        )
    })?;

    Ok(Json(comparison))
}

#[cfg(test)]
mod test {
    use super::*;
    use leetcode_compare_libs::leetcode::model::{TagProblemData, UserProfileData};
    use serde_json::json;

    /// Upstream double serving canned payloads; `missing` simulates a
    /// username the platform does not know.
    struct StubApi {
        missing: Option<&'static str>,
        totals_unavailable: bool,
    }

    impl StubApi {
        fn healthy() -> Self {
            Self {
                missing: None,
                totals_unavailable: false,
            }
        }
    }

    #[async_trait]
    impl LeetCodeApi for StubApi {
        async fn fetch_user_profile(
            &self,
            username: &str,
        ) -> Result<UserProfileData, LeetCodeError> {
            if self.missing == Some(username) {
                return Ok(serde_json::from_value(json!({
                    "matchedUser": null,
                    "userContestRanking": null,
                    "userContestRankingHistory": null
                }))
                .unwrap());
            }

            Ok(serde_json::from_value(json!({
                "matchedUser": {
                    "username": username,
                    "profile": {
                        "ranking": 12345,
                        "reputation": 10,
                        "starRating": 3.0,
                        "userAvatar": null
                    },
                    "submitStats": {
                        "acSubmissionNum": [
                            {"difficulty": "Easy", "count": 50, "submissions": 60},
                            {"difficulty": "Medium", "count": 30, "submissions": 50},
                            {"difficulty": "Hard", "count": 5, "submissions": 10}
                        ]
                    }
                },
                "userContestRanking": null,
                "userContestRankingHistory": []
            }))
            .unwrap())
        }

        async fn fetch_tag_counts(&self, _username: &str) -> Result<TagProblemData, LeetCodeError> {
            Ok(serde_json::from_value(json!({ "matchedUser": null })).unwrap())
        }

        async fn fetch_problem_totals(&self) -> ProblemTotals {
            // Mirrors the real client: an unavailable upstream degrades to
            // the fixed fallback record.
            if self.totals_unavailable {
                ProblemTotals::fallback()
            } else {
                ProblemTotals::from_total(3000)
            }
        }

        async fn ping(&self) -> Result<(), LeetCodeError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn comparison_returns_both_users() {
        let response = compare_users(&StubApi::healthy(), "alice", "bob")
            .await
            .unwrap();

        assert_eq!(response.user1.username, "alice");
        assert_eq!(response.user2.username, "bob");
        assert_eq!(response.user1.problems_solved.total(), 85);
        // Totals are shared by both records.
        assert_eq!(response.user1.total_problems, response.user2.total_problems);
    }

    #[tokio::test]
    async fn unknown_user_fails_the_whole_comparison() {
        let stub = StubApi {
            missing: Some("hoge"),
            totals_unavailable: false,
        };

        let error = compare_users(&stub, "alice", "hoge").await.unwrap_err();

        assert!(error.to_string().contains("hoge"));
        match error {
            CompareError::User { username, source } => {
                assert_eq!(username, "hoge");
                assert!(matches!(source, LeetCodeError::UserNotFound(_)));
            }
            other => panic!("expected a per-user failure, got {:?}", other),
        }
    }

    async fn extract(uri: &str) -> Result<ValidatedCompareParameter<CompareParameter>, CompareRejection> {
        let request = http::Request::builder().uri(uri).body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        ValidatedCompareParameter::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn valid_parameters_are_extracted() {
        let ValidatedCompareParameter(params) =
            extract("http://localhost/api/compare?user1=alice&user2=bob")
                .await
                .unwrap();

        assert_eq!(params.user1, "alice");
        assert_eq!(params.user2, "bob");
    }

    #[tokio::test]
    async fn missing_parameter_is_a_client_error() {
        let rejection = extract("http://localhost/api/compare?user1=alice")
            .await
            .err()
            .unwrap();

        assert_eq!(rejection.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_parameter_is_a_client_error() {
        let rejection = extract("http://localhost/api/compare?user1=alice&user2=")
            .await
            .err()
            .unwrap();

        assert_eq!(rejection.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn totals_outage_degrades_to_the_fallback() {
        let stub = StubApi {
            missing: None,
            totals_unavailable: true,
        };

        let response = compare_users(&stub, "alice", "bob").await.unwrap();

        assert_eq!(response.user1.total_problems.easy, 750);
        assert_eq!(response.user1.total_problems.medium, 1250);
        assert_eq!(response.user1.total_problems.hard, 500);
    }
}
