// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point for running simulations, the balance matrix
// and single verbose games
// ═══════════════════════════════════════════════════════════════════════

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tank_engine::types::{Mode, TankClass};
use tank_sim::runner::{run_game, run_simulation_with, PolicyChoice, SimConfig, SimStats};
use tank_sim::{run_matrix, MatrixReport};

#[derive(Parser)]
#[command(name = "tank-runner", about = "Tank card-combat balance lab")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a batch of games for one lineup and print aggregate stats
    Sim {
        #[arg(short, long, default_value_t = 1000)]
        games: u32,
        /// Comma-separated lineup, e.g. "heavy,medium". 2 classes play
        /// a duel, 3+ a deathmatch.
        #[arg(short, long, default_value = "heavy,medium")]
        classes: String,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Turn cap per game; breaching it counts as a degenerate draw
        #[arg(long, default_value_t = 1000)]
        max_turns: u32,
        /// Policy: "heuristic", "random" or "mixed"
        #[arg(short, long, default_value = "heuristic")]
        policy: String,
        /// Print every game's event log as JSON lines
        #[arg(short, long)]
        verbose: bool,
    },
    /// Run the full class-balance matrix for 2-, 3- and 4-player games
    Matrix {
        #[arg(short, long, default_value_t = 1000)]
        games_per_matchup: u32,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value = "heuristic")]
        policy: String,
    },
    /// Play a single game and print its full transcript
    Play {
        #[arg(short, long, default_value = "heavy,medium")]
        classes: String,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long, default_value = "heuristic")]
        policy: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Sim { games, classes, seed, max_turns, policy, verbose } => {
            cmd_sim(games, &classes, seed, max_turns, &policy, verbose)
        }
        Commands::Matrix { games_per_matchup, seed, policy } => {
            cmd_matrix(games_per_matchup, seed, &policy)
        }
        Commands::Play { classes, seed, policy } => cmd_play(&classes, seed, &policy),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ── Argument parsing helpers ───────────────────────────────────────────

fn parse_classes(spec: &str) -> Result<(Vec<TankClass>, Mode), String> {
    let names: Vec<String> = spec.split(',').map(|s| s.trim().to_string()).collect();
    let classes = tank_engine::setup::parse_lineup(&names).map_err(|e| e.to_string())?;
    let mode = Mode::for_player_count(classes.len()).map_err(|e| e.to_string())?;
    Ok((classes, mode))
}

fn parse_policy(spec: &str) -> Result<PolicyChoice, String> {
    spec.parse()
}

// ── Commands ───────────────────────────────────────────────────────────

fn cmd_sim(
    games: u32,
    class_spec: &str,
    seed: u64,
    max_turns: u32,
    policy_spec: &str,
    verbose: bool,
) -> Result<(), String> {
    let (classes, mode) = parse_classes(class_spec)?;
    let policy = parse_policy(policy_spec)?;
    let lineup: Vec<String> = classes.iter().map(|c| c.to_string()).collect();
    println!(
        "Running {} games in {:?} mode with classes: {}...",
        games,
        mode,
        lineup.join(", ")
    );

    let config = SimConfig { games, classes: classes.clone(), mode, seed, max_turns, verbose, policy };

    let start = std::time::Instant::now();
    let stats = run_simulation_with(&config, |i, outcome| {
        if verbose {
            println!("\n--- Game {} Log ---", i);
            for record in &outcome.log {
                match serde_json::to_string(record) {
                    Ok(line) => println!("{}", line),
                    Err(e) => println!("<unserializable log record: {}>", e),
                }
            }
            let winner = match outcome.winner_class {
                Some(class) => class.to_string(),
                None => "Draw".to_string(),
            };
            println!("Game {} finished in {} turns. Winner: {}", i, outcome.turns, winner);
        }
    })
    .map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();

    print_stats(&stats, &classes);
    println!("Time: {}ms", elapsed.as_millis());
    Ok(())
}

fn print_stats(stats: &SimStats, classes: &[TankClass]) {
    println!("\n--- Simulation Results ---");
    println!("Games Played: {}", stats.games_played);
    println!("Degenerate Games (Max Turns / Empty Deck): {}", stats.degenerate_games);
    println!("Draws: {}", stats.draws);
    println!("Avg Turns/Game: {:.2}", stats.average_turns());
    println!("Avg Cards Played/Game: {:.2}", stats.average_cards_played());

    let denom = stats.games_played.max(1) as f64;

    println!("\n--- Win Rates by Class ---");
    let mut seen = Vec::new();
    for &class in classes {
        if seen.contains(&class) {
            continue;
        }
        seen.push(class);
        let wins = stats.wins_by_class.get(&class).copied().unwrap_or(0);
        println!("{:<10}: {} wins ({:.2}%)", class.to_string(), wins, wins as f64 / denom * 100.0);
    }

    println!("\n--- Win Rates by Seat ---");
    for seat in 0..classes.len() {
        let wins = stats.wins_by_seat.get(&seat).copied().unwrap_or(0);
        println!("Seat {}: {} wins ({:.2}%)", seat, wins, wins as f64 / denom * 100.0);
    }

    println!("\n--- Total Kills by Class ---");
    for &class in &seen {
        let kills = stats.kills_by_class.get(&class).copied().unwrap_or(0);
        println!("{:<10}: {} kills", class.to_string(), kills);
    }
}

fn cmd_matrix(games_per_matchup: u32, seed: u64, policy_spec: &str) -> Result<(), String> {
    let policy = parse_policy(policy_spec)?;
    println!("Starting Balance Matrix Test...");
    let start = std::time::Instant::now();

    for player_count in [2usize, 3, 4] {
        println!("\n==============================================================");
        println!(
            " Running {}-Player Matrix ({} games per matchup)",
            player_count, games_per_matchup
        );
        println!("==============================================================\n");

        let report = run_matrix(player_count, games_per_matchup, seed, policy)
            .map_err(|e| e.to_string())?;
        print_matrix(&report);
    }

    println!("\n==============================================================");
    println!("Matrix testing completed in {:.2}s.", start.elapsed().as_secs_f64());
    println!("==============================================================");
    Ok(())
}

fn print_matrix(report: &MatrixReport) {
    for m in &report.matchups {
        let matchup: Vec<String> = m.lineup.iter().map(|c| c.to_string()).collect();
        let mut rates = Vec::new();
        let mut seen = Vec::new();
        for &class in &m.lineup {
            if seen.contains(&class) {
                continue;
            }
            seen.push(class);
            if let Some(rate) = m.win_rate(class, report.games_per_matchup) {
                rates.push(format!("{}: {:.1}%", class, rate * 100.0));
            }
        }
        println!("[ {:<35} ] => {}", matchup.join(" vs "), rates.join(" | "));
    }

    let target = report.uniform_target() * 100.0;
    println!(
        "\n--- Overall {}-Player Win Rates (Target: ~{:.1}%) ---",
        report.player_count, target
    );
    for (class, wins, entries) in report.overall() {
        if entries == 0 {
            continue;
        }
        let rate = wins as f64 / entries as f64 * 100.0;
        let delta = rate - target;
        println!(
            "{:<10}: {:>5.1}%  (Delta: {:>+6.1}%)  [{} wins / {} entries]",
            class.to_string(),
            rate,
            delta,
            wins,
            entries
        );
    }
}

fn cmd_play(class_spec: &str, seed: u64, policy_spec: &str) -> Result<(), String> {
    let (classes, mode) = parse_classes(class_spec)?;
    let policy = parse_policy(policy_spec)?;

    let outcome = run_game(&classes, mode, seed, 1000, policy)?;
    for record in &outcome.log {
        match serde_json::to_string(record) {
            Ok(line) => println!("{}", line),
            Err(e) => println!("<unserializable log record: {}>", e),
        }
    }

    let winner = match outcome.winner_class {
        Some(class) => class.to_string(),
        None => "Draw".to_string(),
    };
    println!("\nGame finished in {} turns. Winner: {}", outcome.turns, winner);
    println!("Cards played: {}", outcome.cards_played);
    for (seat, kills) in outcome.kills_by_seat.iter().enumerate() {
        println!("Seat {} ({}): {} kill marks", seat, classes[seat], kills);
    }
    Ok(())
}
