use leetcode_compare_libs::leetcode::model::ProblemTotals;
use serde::Serialize;

/// Normalized per-user record the comparison charts consume. Built once per
/// request by the aggregator and never mutated afterwards.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserMetrics {
    pub username: String,
    /// Month/year label approximating the membership start, derived from
    /// the earliest contest the user entered.
    pub member_since: String,
    /// Always false: the upstream API does not expose premium status.
    pub premium: bool,
    pub problems_solved: DifficultyCounts,
    pub total_problems: DifficultyCounts,
    /// Heuristic approximation; the upstream API does not expose the true
    /// acceptance rate.
    pub acceptance_rate: u32,
    pub global_ranking: u32,
    /// Always 0: the upstream API does not expose streaks.
    pub streak: u32,
    pub contest_rating: f64,
    pub average_problems_per_day: f64,
    pub topic_strengths: TopicStrengths,
    /// Chronological contest rating series. Never empty.
    pub contest_history: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DifficultyCounts {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyCounts {
    pub fn total(&self) -> u32 {
        self.easy + self.medium + self.hard
    }
}

impl From<&ProblemTotals> for DifficultyCounts {
    fn from(totals: &ProblemTotals) -> Self {
        Self {
            easy: totals.easy,
            medium: totals.medium,
            hard: totals.hard,
        }
    }
}

/// Strength per canonical topic category, each within [0, 100].
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TopicStrengths {
    pub arrays: f64,
    pub strings: f64,
    pub dp: f64,
    pub trees: f64,
    pub graphs: f64,
    pub sorting: f64,
}

impl TopicStrengths {
    pub(crate) fn get_mut(&mut self, category: &str) -> Option<&mut f64> {
        match category {
            "arrays" => Some(&mut self.arrays),
            "strings" => Some(&mut self.strings),
            "dp" => Some(&mut self.dp),
            "trees" => Some(&mut self.trees),
            "graphs" => Some(&mut self.graphs),
            "sorting" => Some(&mut self.sorting),
            _ => None,
        }
    }
}
