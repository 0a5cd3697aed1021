//! Team generation: partition a roster into balanced two-player teams.
//!
//! All four algorithms are total over any even roster of at least 2 players
//! and deterministic given their random source and the stats snapshot.

use crate::logic::stats::StatsSnapshot;
use crate::models::{Algorithm, PlayerId, RoundnetError, Team};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Generate a team partition for `roster` using the selected algorithm.
///
/// The roster must have an even, non-zero number of players; otherwise
/// `InvalidRosterSize` is returned and nothing is dropped or duplicated.
/// The random source is only consulted by `Algorithm::Random`.
pub fn generate_teams<R: Rng>(
    roster: &[PlayerId],
    algorithm: Algorithm,
    stats: &StatsSnapshot,
    rng: &mut R,
) -> Result<Vec<Team>, RoundnetError> {
    if roster.is_empty() || roster.len() % 2 != 0 {
        return Err(RoundnetError::InvalidRosterSize {
            count: roster.len(),
        });
    }
    let teams = match algorithm {
        Algorithm::Random => random_teams(roster, rng),
        Algorithm::SkillBalanced => skill_balanced_teams(roster, stats),
        Algorithm::WinRateBalanced => win_rate_balanced_teams(roster, stats),
        Algorithm::PartnershipBalanced => partnership_balanced_teams(roster, stats),
    };
    Ok(teams)
}

/// Shuffle the roster with the supplied source and pair consecutive players.
fn random_teams<R: Rng>(roster: &[PlayerId], rng: &mut R) -> Vec<Team> {
    let mut shuffled = roster.to_vec();
    shuffled.shuffle(rng);
    shuffled
        .chunks_exact(2)
        .map(|pair| Team::new(pair[0], pair[1]))
        .collect()
}

/// Sort descending by skill (stable, so ties keep roster order) and pair the
/// strongest with the weakest, second strongest with second weakest, and so
/// on. Teams end up close in combined skill while each has one strong and
/// one weak player.
fn skill_balanced_teams(roster: &[PlayerId], stats: &StatsSnapshot) -> Vec<Team> {
    let mut sorted = roster.to_vec();
    sorted.sort_by_key(|&id| std::cmp::Reverse(stats.skill_level(id)));
    fold_pair(&sorted)
}

/// Same fold pairing as skill-balanced, but ranked by current win rate.
fn win_rate_balanced_teams(roster: &[PlayerId], stats: &StatsSnapshot) -> Vec<Team> {
    let mut sorted = roster.to_vec();
    sorted.sort_by(|&a, &b| stats.win_rate(b).total_cmp(&stats.win_rate(a)));
    fold_pair(&sorted)
}

/// Pair rank 1 with rank N, rank 2 with rank N-1, etc.
fn fold_pair(sorted: &[PlayerId]) -> Vec<Team> {
    let n = sorted.len();
    (0..n / 2)
        .map(|i| Team::new(sorted[i], sorted[n - 1 - i]))
        .collect()
}

/// Greedy minimum-history matching: repeatedly take the unpaired player with
/// the fewest total prior partnership games (ties: lowest id), then pair them
/// with the remaining player they have partnered least (ties: lowest id).
/// A heuristic, not an optimal matching - the goal is to avoid repeat
/// pairings, not exact optimality.
fn partnership_balanced_teams(roster: &[PlayerId], stats: &StatsSnapshot) -> Vec<Team> {
    let mut pool = roster.to_vec();
    let mut teams = Vec::with_capacity(pool.len() / 2);
    while !pool.is_empty() {
        let anchor = take_min_by_key(&mut pool, |&id| (stats.total_times_partnered(id), id));
        let partner = take_min_by_key(&mut pool, |&id| (stats.times_together(anchor, id), id));
        teams.push(Team::new(anchor, partner));
    }
    teams
}

/// Remove and return the element with the minimal key. The pool is non-empty
/// at every call site (even roster, two removals per iteration).
fn take_min_by_key<K: Ord>(pool: &mut Vec<PlayerId>, key: impl Fn(&PlayerId) -> K) -> PlayerId {
    let mut best = 0;
    for i in 1..pool.len() {
        if key(&pool[i]) < key(&pool[best]) {
            best = i;
        }
    }
    pool.swap_remove(best)
}

/// Balance metrics for a generated partition: variance of mean team win rate,
/// variance of within-team partnership familiarity, and a weighted overall
/// score where lower variance scores higher.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TeamBalance {
    pub win_rate_variance: f64,
    pub partnership_variance: f64,
    pub overall_score: f64,
}

const WIN_RATE_WEIGHT: f64 = 0.7;
const PARTNERSHIP_WEIGHT: f64 = 0.3;

/// Score how balanced a partition is under the current statistics.
pub fn balance_metrics(teams: &[Team], stats: &StatsSnapshot) -> TeamBalance {
    if teams.is_empty() {
        return TeamBalance::default();
    }

    let team_win_rates: Vec<f64> = teams
        .iter()
        .map(|t| {
            let [a, b] = t.players();
            (stats.win_rate(a) + stats.win_rate(b)) / 2.0
        })
        .collect();
    let win_rate_variance = variance(&team_win_rates);

    let familiarity: Vec<f64> = teams
        .iter()
        .map(|t| {
            let [a, b] = t.players();
            f64::from(stats.times_together(a, b))
        })
        .collect();
    let partnership_variance = variance(&familiarity);

    let overall_score = WIN_RATE_WEIGHT * (1.0 / (1.0 + win_rate_variance))
        + PARTNERSHIP_WEIGHT * (1.0 / (1.0 + partnership_variance));

    TeamBalance {
        win_rate_variance,
        partnership_variance,
        overall_score,
    }
}

fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}
