use serde::Deserialize;

/// Response body of every GraphQL request: `{data, errors?}`.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLErrorMessage>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLErrorMessage {
    pub message: String,
}

/// Root of the profile query. `matched_user` is null when the requested
/// username does not exist; the transport succeeds regardless.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileData {
    pub matched_user: Option<MatchedUser>,
    pub user_contest_ranking: Option<ContestRanking>,
    pub user_contest_ranking_history: Option<Vec<ContestHistoryEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUser {
    pub username: String,
    pub profile: UserPublicProfile,
    pub submit_stats: SubmitStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublicProfile {
    pub ranking: Option<u32>,
    pub reputation: Option<i64>,
    pub star_rating: Option<f64>,
    pub user_avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStats {
    pub ac_submission_num: Vec<SubmissionCount>,
}

/// One row of the accepted-submission stats. `difficulty` is the tier name
/// as sent by the platform ("All", "Easy", "Medium", "Hard").
#[derive(Debug, Deserialize)]
pub struct SubmissionCount {
    pub difficulty: String,
    pub count: u32,
    pub submissions: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestRanking {
    pub attended_contests_count: u32,
    pub rating: Option<f64>,
    pub global_ranking: Option<u32>,
    pub total_participants: Option<u32>,
    pub top_percentage: Option<f64>,
    pub badge: Option<ContestBadge>,
}

#[derive(Debug, Deserialize)]
pub struct ContestBadge {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestHistoryEntry {
    pub attended: bool,
    pub trend_direction: Option<String>,
    pub problems_solved: u32,
    pub total_problems: u32,
    pub finish_time_in_seconds: i64,
    pub rating: Option<f64>,
    pub ranking: Option<u32>,
    pub contest: ContestInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestInfo {
    pub title: String,
    pub start_time: i64,
}

/// Root of the per-tag solved-count query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagProblemData {
    pub matched_user: Option<TagMatchedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMatchedUser {
    pub tag_problem_counts: TagProblemCounts,
}

#[derive(Debug, Default, Deserialize)]
pub struct TagProblemCounts {
    #[serde(default)]
    pub advanced: Vec<TagCount>,
    #[serde(default)]
    pub intermediate: Vec<TagCount>,
    #[serde(default)]
    pub fundamental: Vec<TagCount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag_name: String,
    pub tag_slug: String,
    pub problems_solved: u32,
}

/// Root of the problem-totals query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemsetData {
    pub problemset_question_list: Option<ProblemsetQuestionList>,
}

#[derive(Debug, Deserialize)]
pub struct ProblemsetQuestionList {
    pub total: u32,
    #[serde(default)]
    pub questions: Vec<QuestionDigest>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionDigest {
    pub difficulty: String,
}

/// Root of the reachability-probe query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusData {
    pub user_status: Option<UserStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    pub is_signed_in: bool,
}

/// Platform-wide problem counts per difficulty tier, shared by both users
/// of one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemTotals {
    pub total: u32,
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl ProblemTotals {
    // Typical distribution of the problemset. The endpoint stopped exposing
    // a per-difficulty breakdown, so the split is approximated.
    pub const EASY_RATIO: f64 = 0.3;
    pub const MEDIUM_RATIO: f64 = 0.5;
    pub const HARD_RATIO: f64 = 0.2;

    pub fn from_total(total: u32) -> Self {
        Self {
            total,
            easy: (total as f64 * Self::EASY_RATIO).round() as u32,
            medium: (total as f64 * Self::MEDIUM_RATIO).round() as u32,
            hard: (total as f64 * Self::HARD_RATIO).round() as u32,
        }
    }

    /// Fixed record used when the totals query fails outright.
    pub fn fallback() -> Self {
        Self {
            total: 2500,
            easy: 750,
            medium: 1250,
            hard: 500,
        }
    }
}
