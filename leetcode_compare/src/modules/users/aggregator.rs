use crate::modules::models::response::{DifficultyCounts, TopicStrengths, UserMetrics};
use chrono::{DateTime, TimeZone, Utc};
use itertools::Itertools;
use leetcode_compare_libs::{
    leetcode::model::{
        ContestHistoryEntry, ProblemTotals, SubmissionCount, TagProblemData, UserProfileData,
    },
    LeetCodeError,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, LeetCodeError>;

/// Rating the platform assigns before a user has any contest result.
pub const UNRATED_BASELINE: f64 = 1500.0;

/// Sentinel reported when the profile carries no global ranking.
pub const UNRANKED_SENTINEL: u32 = 999999;

// Normalization ceiling: solving this many problems in one topic counts as
// full strength. An assumption, not an upstream constant.
const MAX_PROBLEMS_PER_TOPIC: f64 = 100.0;

// The platform's tag taxonomy collapsed into the six categories the
// comparison charts report. Slugs absent from this table are ignored.
static TOPIC_CATEGORIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("array", "arrays"),
        ("string", "strings"),
        ("dynamic-programming", "dp"),
        ("tree", "trees"),
        ("binary-tree", "trees"),
        ("graph", "graphs"),
        ("depth-first-search", "graphs"),
        ("breadth-first-search", "graphs"),
        ("sorting", "sorting"),
        ("binary-search", "sorting"),
    ])
});

/// Reduces the raw payloads of one user into the normalized metrics record.
///
/// Pure function of its inputs: `now` is injected by the caller so that the
/// date-derived fields are reproducible under test. Fails only when the
/// profile payload carries no matched user.
pub fn build_user_metrics(
    username: &str,
    profile: UserProfileData,
    tags: TagProblemData,
    totals: &ProblemTotals,
    now: DateTime<Utc>,
) -> Result<UserMetrics> {
    let user = profile
        .matched_user
        .ok_or_else(|| LeetCodeError::UserNotFound(String::from(username)))?;

    let problems_solved = reduce_submission_counts(&user.submit_stats.ac_submission_num);
    let total_solved = problems_solved.total();

    // The history may arrive in any order.
    let history: Vec<ContestHistoryEntry> = profile
        .user_contest_ranking_history
        .unwrap_or_default()
        .into_iter()
        .sorted_by_key(|entry| entry.contest.start_time)
        .collect();

    let member_since = history
        .first()
        .and_then(|entry| Utc.timestamp_opt(entry.contest.start_time, 0).single())
        .unwrap_or(now);

    let average_problems_per_day = total_solved as f64 / days_since(member_since, now) as f64;

    let contest_history: Vec<f64> = history
        .iter()
        .map(|entry| entry.rating.unwrap_or(UNRATED_BASELINE))
        .collect();
    let contest_history = if contest_history.is_empty() {
        vec![UNRATED_BASELINE]
    } else {
        contest_history
    };

    Ok(UserMetrics {
        username: user.username,
        member_since: member_since.format("%b %Y").to_string(),
        premium: false,
        problems_solved,
        total_problems: DifficultyCounts::from(totals),
        acceptance_rate: acceptance_rate(total_solved),
        global_ranking: user.profile.ranking.unwrap_or(UNRANKED_SENTINEL),
        streak: 0,
        contest_rating: profile
            .user_contest_ranking
            .and_then(|ranking| ranking.rating)
            .unwrap_or(UNRATED_BASELINE),
        average_problems_per_day,
        topic_strengths: accumulate_topic_strengths(&tags),
        contest_history,
    })
}

fn reduce_submission_counts(counts: &[SubmissionCount]) -> DifficultyCounts {
    let mut reduced = DifficultyCounts::default();

    for item in counts.iter() {
        match item.difficulty.to_lowercase().as_str() {
            "easy" => reduced.easy = item.count,
            "medium" => reduced.medium = item.count,
            "hard" => reduced.hard = item.count,
            // the aggregate "All" row would double the sum
            _ => {}
        }
    }

    reduced
}

/// Whole days between joining and now, floored at one so the per-day
/// average never divides by zero.
fn days_since(member_since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - member_since).num_days().max(1)
}

/// Approximation of the acceptance rate, which the upstream API does not
/// expose: grows towards 100 with the solved count.
fn acceptance_rate(total_solved: u32) -> u32 {
    let total_solved = total_solved as f64;
    ((total_solved / (total_solved + 100.0)) * 100.0).round() as u32
}

fn accumulate_topic_strengths(tags: &TagProblemData) -> TopicStrengths {
    let mut strengths = TopicStrengths::default();

    let counts = match tags.matched_user.as_ref() {
        Some(user) => &user.tag_problem_counts,
        None => return strengths,
    };

    for tag in counts
        .advanced
        .iter()
        .chain(counts.intermediate.iter())
        .chain(counts.fundamental.iter())
    {
        let category = match TOPIC_CATEGORIES.get(tag.tag_slug.as_str()) {
            Some(category) => category,
            None => continue,
        };
        if let Some(strength) = strengths.get_mut(category) {
            // Saturates at 100 instead of overflowing the scale.
            *strength =
                (*strength + tag.problems_solved as f64 / MAX_PROBLEMS_PER_TOPIC * 100.0).min(100.0);
        }
    }

    strengths
}
