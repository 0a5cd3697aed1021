//! Integration tests for the statistics aggregator: win rates, partnership
//! replay, summary numbers, and balance metrics.

use chrono::{Duration, Utc};
use roundnet_web::{
    balance_metrics, recent_games, summary_stats, Game, GameResult, Player, PlayerId,
    StatsSnapshot, Team,
};
use uuid::Uuid;

fn player(n: u128, skill: u8) -> Player {
    Player {
        id: Uuid::from_u128(n),
        name: format!("P{n}"),
        skill_level: skill,
        total_wins: 0,
        total_games: 0,
        created_at: Utc::now(),
    }
}

fn game(
    team_a: (PlayerId, PlayerId),
    team_b: (PlayerId, PlayerId),
    result: GameResult,
    duration: Option<u32>,
) -> Game {
    Game::new(
        Uuid::from_u128(77),
        Team::new(team_a.0, team_a.1),
        Team::new(team_b.0, team_b.1),
        result,
        duration,
        None,
        None,
    )
}

#[test]
fn win_rate_is_zero_without_games() {
    let players = vec![player(1, 5)];
    let stats = StatsSnapshot::from_games(&players, &[]);
    assert_eq!(stats.win_rate(players[0].id), 0.0);
    // Unknown ids are a valid never-played state, not an error.
    assert_eq!(stats.win_rate(Uuid::new_v4()), 0.0);
}

#[test]
fn win_rate_counts_games_on_either_side() {
    let players: Vec<Player> = (1..=4).map(|n| player(n, 5)).collect();
    let [p1, p2, p3, p4] = [players[0].id, players[1].id, players[2].id, players[3].id];
    let games = vec![
        game((p1, p2), (p3, p4), GameResult::TeamAWin, None),
        game((p3, p1), (p2, p4), GameResult::TeamAWin, None),
        game((p1, p4), (p2, p3), GameResult::Tie, None),
    ];
    let stats = StatsSnapshot::from_games(&players, &games);

    assert_eq!(stats.win_rate(p1), 2.0 / 3.0);
    assert_eq!(stats.win_rate(p2), 1.0 / 3.0);
    assert_eq!(stats.win_rate(p4), 0.0);
}

#[test]
fn partnerships_replay_canonically_from_the_log() {
    let players: Vec<Player> = (1..=4).map(|n| player(n, 5)).collect();
    let [p1, p2, p3, p4] = [players[0].id, players[1].id, players[2].id, players[3].id];
    // Same pair listed in both orders across games; still one record.
    let games = vec![
        game((p2, p1), (p3, p4), GameResult::TeamAWin, None),
        game((p1, p2), (p3, p4), GameResult::TeamBWin, None),
    ];
    let stats = StatsSnapshot::from_games(&players, &games);

    assert_eq!(stats.times_together(p1, p2), 2);
    assert_eq!(stats.times_together(p2, p1), 2);
    assert_eq!(stats.partnership(p1, p2).wins_together, 1);
    assert_eq!(stats.partnerships().len(), 2);

    // Records carry the canonical order: lower id first.
    for record in stats.partnership_records() {
        assert!(record.player_a_id < record.player_b_id);
    }

    // A pair that never met reads as zeroes.
    let unpaired = stats.partnership(p1, p3);
    assert_eq!(unpaired.times_together, 0);
    assert_eq!(unpaired.win_rate_together(), 0.0);
}

#[test]
fn total_times_partnered_sums_over_all_partners() {
    let players: Vec<Player> = (1..=6).map(|n| player(n, 5)).collect();
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    let games = vec![
        game((ids[0], ids[1]), (ids[2], ids[3]), GameResult::Tie, None),
        game((ids[0], ids[2]), (ids[1], ids[3]), GameResult::Tie, None),
    ];
    let stats = StatsSnapshot::from_games(&players, &games);

    assert_eq!(stats.total_times_partnered(ids[0]), 2);
    assert_eq!(stats.total_times_partnered(ids[4]), 0);
}

#[test]
fn summary_counts_totals_and_average_duration() {
    let players: Vec<Player> = (1..=4).map(|n| player(n, 5)).collect();
    let [p1, p2, p3, p4] = [players[0].id, players[1].id, players[2].id, players[3].id];
    let now = Utc::now();
    let mut games = vec![
        game((p1, p2), (p3, p4), GameResult::TeamAWin, Some(20)),
        game((p1, p3), (p2, p4), GameResult::Tie, Some(40)),
        game((p1, p4), (p2, p3), GameResult::TeamBWin, None),
    ];
    // Push one game out of the 7-day window.
    games[2].created_at = now - Duration::days(30);

    let summary = summary_stats(&players, 2, &games, now);
    assert_eq!(summary.total_players, 4);
    assert_eq!(summary.total_playing_days, 2);
    assert_eq!(summary.total_games, 3);
    // Only games that recorded a duration count toward the average.
    assert_eq!(summary.avg_game_duration, 30.0);
    assert_eq!(summary.recent_games, 2);
}

#[test]
fn recent_games_are_windowed_and_newest_first() {
    let players: Vec<Player> = (1..=4).map(|n| player(n, 5)).collect();
    let [p1, p2, p3, p4] = [players[0].id, players[1].id, players[2].id, players[3].id];
    let now = Utc::now();
    let mut old = game((p1, p2), (p3, p4), GameResult::Tie, None);
    old.created_at = now - Duration::days(10);
    let mut yesterday = game((p1, p3), (p2, p4), GameResult::Tie, None);
    yesterday.created_at = now - Duration::days(1);
    let mut fresh = game((p1, p4), (p2, p3), GameResult::Tie, None);
    fresh.created_at = now;

    let recent = recent_games(&[old, fresh.clone(), yesterday.clone()], 7, now);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, fresh.id);
    assert_eq!(recent[1].id, yesterday.id);
}

#[test]
fn balance_metrics_reward_even_partitions() {
    let players: Vec<Player> = (1..=4).map(|n| player(n, 5)).collect();
    let [p1, p2, p3, p4] = [players[0].id, players[1].id, players[2].id, players[3].id];
    // p1 and p2 always win, p3 and p4 always lose.
    let games = vec![
        game((p1, p2), (p3, p4), GameResult::TeamAWin, None),
        game((p1, p2), (p3, p4), GameResult::TeamAWin, None),
    ];
    let stats = StatsSnapshot::from_games(&players, &games);

    // Splitting a winner and a loser per team evens the expected strength.
    let mixed = [Team::new(p1, p3), Team::new(p2, p4)];
    let stacked = [Team::new(p1, p2), Team::new(p3, p4)];

    let mixed_score = balance_metrics(&mixed, &stats);
    let stacked_score = balance_metrics(&stacked, &stats);

    assert_eq!(mixed_score.win_rate_variance, 0.0);
    assert_eq!(mixed_score.partnership_variance, 0.0);
    assert_eq!(mixed_score.overall_score, 1.0);

    assert_eq!(stacked_score.win_rate_variance, 0.25);
    // Both stacked pairs are equally familiar, so that variance stays zero.
    assert_eq!(stacked_score.partnership_variance, 0.0);
    assert!(stacked_score.overall_score < mixed_score.overall_score);
}

#[test]
fn uneven_familiarity_shows_up_as_partnership_variance() {
    let players: Vec<Player> = (1..=6).map(|n| player(n, 5)).collect();
    let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    // Only p1/p2 and p5/p6 have partnered before.
    let games = vec![
        game((ids[0], ids[1]), (ids[4], ids[5]), GameResult::Tie, None),
        game((ids[0], ids[1]), (ids[4], ids[5]), GameResult::Tie, None),
    ];
    let stats = StatsSnapshot::from_games(&players, &games);

    let teams = [
        Team::new(ids[0], ids[1]),
        Team::new(ids[2], ids[3]),
        Team::new(ids[4], ids[5]),
    ];
    let score = balance_metrics(&teams, &stats);
    assert!(score.partnership_variance > 0.0);
    assert!(score.overall_score < 1.0);
}
