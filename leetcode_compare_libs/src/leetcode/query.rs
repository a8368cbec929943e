use serde::Serialize;
use serde_json::{json, Value};

/// POST body of every GraphQL request: `{query, variables}`.
#[derive(Debug, Serialize)]
pub struct GraphQLRequest {
    pub query: &'static str,
    pub variables: Value,
}

/// Profile, submission counts and contest results for one username.
pub const USER_PROFILE_QUERY: &str = r#"
query userProfile($username: String!) {
  matchedUser(username: $username) {
    username
    profile {
      ranking
      reputation
      starRating
      userAvatar
    }
    submitStats: submitStatsGlobal {
      acSubmissionNum {
        difficulty
        count
        submissions
      }
    }
  }
  userContestRanking(username: $username) {
    attendedContestsCount
    rating
    globalRanking
    totalParticipants
    topPercentage
    badge {
      name
    }
  }
  userContestRankingHistory(username: $username) {
    attended
    trendDirection
    problemsSolved
    totalProblems
    finishTimeInSeconds
    rating
    ranking
    contest {
      title
      startTime
    }
  }
}
"#;

/// Solved counts per tag, grouped by the platform's three proficiency tiers.
pub const TAG_PROBLEM_COUNTS_QUERY: &str = r#"
query userProblemsSolvedByTags($username: String!) {
  matchedUser(username: $username) {
    tagProblemCounts {
      advanced {
        tagName
        tagSlug
        problemsSolved
      }
      intermediate {
        tagName
        tagSlug
        problemsSolved
      }
      fundamental {
        tagName
        tagSlug
        problemsSolved
      }
    }
  }
}
"#;

/// Platform-wide problem count. The endpoint no longer exposes a breakdown
/// by difficulty, so only the grand total is requested.
pub const PROBLEMSET_TOTALS_QUERY: &str = r#"
query problemsetQuestionList($categorySlug: String, $limit: Int, $skip: Int, $filters: QuestionListFilterInput) {
  problemsetQuestionList: questionList(
    categorySlug: $categorySlug
    limit: $limit
    skip: $skip
    filters: $filters
  ) {
    total: totalNum
    questions: data {
      difficulty
    }
  }
}
"#;

/// Minimal query used as a reachability probe.
pub const USER_STATUS_QUERY: &str = r#"
query userStatus {
  userStatus {
    isSignedIn
  }
}
"#;

impl GraphQLRequest {
    pub fn user_profile(username: &str) -> Self {
        Self {
            query: USER_PROFILE_QUERY,
            variables: json!({ "username": username }),
        }
    }

    pub fn tag_problem_counts(username: &str) -> Self {
        Self {
            query: TAG_PROBLEM_COUNTS_QUERY,
            variables: json!({ "username": username }),
        }
    }

    pub fn problemset_totals() -> Self {
        Self {
            query: PROBLEMSET_TOTALS_QUERY,
            variables: json!({
                "categorySlug": "",
                "skip": 0,
                "limit": 1,
                "filters": {},
            }),
        }
    }

    pub fn user_status() -> Self {
        Self {
            query: USER_STATUS_QUERY,
            variables: json!({}),
        }
    }
}
