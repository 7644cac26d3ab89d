// src/services/analytics.rs

use std::collections::BTreeMap;

use crate::{
    models::result::{AnalysisSummary, GroupPerformance, LeaderboardEntry, TestResult},
    services::scoring::round2,
};

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 50;

/// Top `limit` results by percentage, highest first.
///
/// `results` must be in insertion order; the sort is stable so equal
/// percentages keep that order.
pub fn leaderboard(results: &[TestResult], limit: usize) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<&TestResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    ranked.into_iter().take(limit).map(LeaderboardEntry::from).collect()
}

/// Overall and per-school/kit/level averages.
pub fn analysis(results: &[TestResult]) -> AnalysisSummary {
    let total_tests = results.len();
    let average_score = if total_tests == 0 {
        0.0
    } else {
        round2(results.iter().map(|r| r.percentage).sum::<f64>() / total_tests as f64)
    };

    AnalysisSummary {
        total_tests,
        average_score,
        school_performance: group_by(results, |r| r.school.clone()),
        kit_performance: group_by(results, |r| r.kit),
        level_performance: group_by(results, |r| r.level),
    }
}

fn group_by<K, F>(results: &[TestResult], key: F) -> BTreeMap<K, GroupPerformance>
where
    K: Ord,
    F: Fn(&TestResult) -> K,
{
    let mut sums: BTreeMap<K, (usize, f64)> = BTreeMap::new();
    for r in results {
        let entry = sums.entry(key(r)).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += r.percentage;
    }

    sums.into_iter()
        .map(|(k, (tests, sum))| {
            (
                k,
                GroupPerformance {
                    tests,
                    average: round2(sum / tests as f64),
                },
            )
        })
        .collect()
}
