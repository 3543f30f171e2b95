// ═══════════════════════════════════════════════════════════════════════
// Balance matrix — enumerates every class lineup of a given size (with
// replacement) and runs a fixed batch per matchup, to expose win-rate
// imbalance between classes.
// ═══════════════════════════════════════════════════════════════════════

use crate::runner::{run_simulation, PolicyChoice, SimConfig, SimStats};
use serde::Serialize;
use tank_engine::types::{ConfigError, Mode, TankClass};

/// All multisets of classes of size `k`, in catalog order.
pub fn class_combinations(k: usize) -> Vec<Vec<TankClass>> {
    fn go(classes: &[TankClass], k: usize) -> Vec<Vec<TankClass>> {
        if k == 1 {
            return classes.iter().map(|&c| vec![c]).collect();
        }
        let mut combos = Vec::new();
        for i in 0..classes.len() {
            for tail in go(&classes[i..], k - 1) {
                let mut lineup = Vec::with_capacity(k);
                lineup.push(classes[i]);
                lineup.extend(tail);
                combos.push(lineup);
            }
        }
        combos
    }
    go(&TankClass::ALL, k)
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchupResult {
    pub lineup: Vec<TankClass>,
    pub stats: SimStats,
}

impl MatchupResult {
    /// Win rate of `class` within this matchup, normalized by how many
    /// seats the class occupies.
    pub fn win_rate(&self, class: TankClass, games: u32) -> Option<f64> {
        let seats = self.lineup.iter().filter(|&&c| c == class).count();
        if seats == 0 || games == 0 {
            return None;
        }
        let wins = self.stats.wins_by_class.get(&class).copied().unwrap_or(0);
        Some(wins as f64 / (games as u64 * seats as u64) as f64)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixReport {
    pub player_count: usize,
    pub games_per_matchup: u32,
    pub matchups: Vec<MatchupResult>,
}

impl MatrixReport {
    /// Per-class (wins, entries) totalled over every matchup, where a
    /// class contributes `games` entries for each seat it occupies.
    pub fn overall(&self) -> Vec<(TankClass, u64, u64)> {
        TankClass::ALL
            .iter()
            .map(|&class| {
                let mut wins = 0u64;
                let mut entries = 0u64;
                for m in &self.matchups {
                    let seats = m.lineup.iter().filter(|&&c| c == class).count() as u64;
                    entries += self.games_per_matchup as u64 * seats;
                    wins += m.stats.wins_by_class.get(&class).copied().unwrap_or(0) as u64;
                }
                (class, wins, entries)
            })
            .collect()
    }

    /// The win rate a perfectly balanced class would show.
    pub fn uniform_target(&self) -> f64 {
        1.0 / self.player_count as f64
    }
}

/// Run every matchup of `player_count` seats.
pub fn run_matrix(
    player_count: usize,
    games_per_matchup: u32,
    seed: u64,
    policy: PolicyChoice,
) -> Result<MatrixReport, ConfigError> {
    let mode = Mode::for_player_count(player_count)?;
    let mut matchups = Vec::new();

    for (i, lineup) in class_combinations(player_count).into_iter().enumerate() {
        let config = SimConfig {
            games: games_per_matchup,
            classes: lineup.clone(),
            mode,
            // Distinct seed stream per matchup.
            seed: seed.wrapping_add((i as u64).wrapping_mul(0x9E3779B97F4A7C15)),
            max_turns: 1000,
            verbose: false,
            policy,
        };
        let stats = run_simulation(&config)?;
        matchups.push(MatchupResult { lineup, stats });
    }

    Ok(MatrixReport { player_count, games_per_matchup, matchups })
}
