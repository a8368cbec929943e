use crate::leetcode::{
    model::{
        GraphQLResponse, ProblemTotals, ProblemsetData, TagProblemData, UserProfileData,
        UserStatusData,
    },
    query::GraphQLRequest,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT},
    Client, Url,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

type Result<T> = std::result::Result<T, LeetCodeError>;

#[derive(Debug, Error)]
pub enum LeetCodeError {
    #[error("failed to request to leetcode graphql api")]
    RequestError(#[from] reqwest::Error),
    #[error("failed to deserialize JSON data")]
    DeserializeError(#[from] serde_json::Error),
    #[error("invalid leetcode url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("graphql error: {0}")]
    GraphQLError(String),
    #[error("user {0} not found")]
    UserNotFound(String),
}

/// Upstream operations the comparison pipeline depends on. Split out as a
/// trait so handlers and the orchestration can be exercised against a stub.
#[async_trait]
pub trait LeetCodeApi {
    async fn fetch_user_profile(&self, username: &str) -> Result<UserProfileData>;
    async fn fetch_tag_counts(&self, username: &str) -> Result<TagProblemData>;
    async fn fetch_problem_totals(&self) -> ProblemTotals;
    async fn ping(&self) -> Result<()>;
}

// The endpoint rejects requests that do not look like they came from a
// browser, so every request carries the header set a real one sends.
// Compatibility measure, not a security boundary.
static BROWSER_HEADERS: Lazy<HeaderMap> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        ),
    );
    headers.insert(ORIGIN, HeaderValue::from_static("https://leetcode.com"));
    headers.insert(REFERER, HeaderValue::from_static("https://leetcode.com/"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers
});

pub struct LeetCodeClient {
    url: Url,
    client: Client,
}

impl LeetCodeClient {
    pub fn new(graphql_url: &str) -> Result<Self> {
        let url = Url::parse(graphql_url)?;
        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(10))
            .default_headers(BROWSER_HEADERS.clone())
            .build()?;

        Ok(LeetCodeClient { url, client })
    }

    async fn post_query<D>(&self, request: &GraphQLRequest) -> Result<D>
    where
        D: DeserializeOwned,
    {
        let res = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await?;

        match res.error_for_status_ref() {
            Ok(_) => {}
            Err(e) => {
                tracing::error!("error response returned from leetcode graphql api: {:?}", e);
                return Err(LeetCodeError::RequestError(e));
            }
        }

        // The endpoint answers bot-filtered requests with 200 and an HTML
        // body, so the JSON is parsed from text rather than via `json()`.
        let body = res.text().await?;
        let response: GraphQLResponse<D> = serde_json::from_str(&body)?;

        if let Some(first) = response.errors.and_then(|errors| errors.into_iter().next()) {
            return Err(LeetCodeError::GraphQLError(first.message));
        }

        response
            .data
            .ok_or(LeetCodeError::GraphQLError(String::from(
                "response carried no data",
            )))
    }

    async fn fetch_raw_totals(&self) -> Result<ProblemsetData> {
        self.post_query(&GraphQLRequest::problemset_totals()).await
    }
}

#[async_trait]
impl LeetCodeApi for LeetCodeClient {
    async fn fetch_user_profile(&self, username: &str) -> Result<UserProfileData> {
        self.post_query(&GraphQLRequest::user_profile(username))
            .await
    }

    async fn fetch_tag_counts(&self, username: &str) -> Result<TagProblemData> {
        self.post_query(&GraphQLRequest::tag_problem_counts(username))
            .await
    }

    /// Best-effort, unlike the two per-user queries: the totals only scale
    /// the comparison charts, so an upstream failure here degrades to the
    /// fixed fallback distribution instead of failing the whole request.
    async fn fetch_problem_totals(&self) -> ProblemTotals {
        totals_or_fallback(self.fetch_raw_totals().await)
    }

    async fn ping(&self) -> Result<()> {
        let _: UserStatusData = self.post_query(&GraphQLRequest::user_status()).await?;
        Ok(())
    }
}

/// Reduces the totals query outcome to a usable record: a successful
/// response is split by the fixed difficulty ratios, anything else becomes
/// the hardcoded fallback.
pub fn totals_or_fallback(outcome: Result<ProblemsetData>) -> ProblemTotals {
    match outcome {
        Ok(data) => match data.problemset_question_list {
            Some(list) => ProblemTotals::from_total(list.total),
            None => {
                tracing::warn!("problemset totals response carried no list, using fallback");
                ProblemTotals::fallback()
            }
        },
        Err(e) => {
            tracing::warn!("failed to fetch problemset totals, using fallback: {:?}", e);
            ProblemTotals::fallback()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::leetcode::model::ProblemsetQuestionList;

    #[test]
    fn create_new_client() {
        let client = LeetCodeClient::new("https://leetcode.com/graphql").unwrap();

        assert_eq!(
            client.url,
            Url::parse("https://leetcode.com/graphql").unwrap()
        );
    }

    #[test]
    fn invalid_url_is_rejected() {
        let client = LeetCodeClient::new("not a url");

        assert!(matches!(client, Err(LeetCodeError::InvalidUrlError(_))));
    }

    #[test]
    fn test_totals_from_successful_response() {
        let data = ProblemsetData {
            problemset_question_list: Some(ProblemsetQuestionList {
                total: 3000,
                questions: Vec::new(),
            }),
        };

        let totals = totals_or_fallback(Ok(data));

        assert_eq!(totals.total, 3000);
        assert_eq!(totals.easy, 900);
        assert_eq!(totals.medium, 1500);
        assert_eq!(totals.hard, 600);
    }

    #[test]
    fn test_totals_fallback_on_missing_list() {
        let data = ProblemsetData {
            problemset_question_list: None,
        };

        assert_eq!(totals_or_fallback(Ok(data)), ProblemTotals::fallback());
    }

    #[test]
    fn test_totals_fallback_on_error() {
        let outcome = Err(LeetCodeError::GraphQLError(String::from("boom")));

        assert_eq!(totals_or_fallback(outcome), ProblemTotals::fallback());
    }

    /// Normal system test of the profile query against the live endpoint.
    ///
    /// Run this test with network access to leetcode.com:
    ///
    /// ```ignore
    /// cargo test -p leetcode_compare_libs -- --ignored
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_fetch_user_profile() {
        let client = LeetCodeClient::new("https://leetcode.com/graphql").unwrap();
        let data = client.fetch_user_profile("lee215").await.unwrap();

        assert!(data.matched_user.is_some());
    }

    /// Normal system test of the totals query against the live endpoint.
    /// Falls back instead of failing, so it must always return a non-zero
    /// total.
    #[tokio::test]
    #[ignore]
    async fn test_fetch_problem_totals() {
        let client = LeetCodeClient::new("https://leetcode.com/graphql").unwrap();
        let totals = client.fetch_problem_totals().await;

        assert!(totals.total > 0);
    }
}
