//! Spectrum Duel - Main Binary
//!
//! Runs AI-vs-AI matches from the command line

use clap::{Parser, Subcommand, ValueEnum};
use rustc_hash::FxHashMap;
use spectrum_duel::{
    core::PlayerId,
    game::{
        HeuristicController, Match, MatchConfig, MatchEndReason, MatchMode, MatchRunner,
        PlayerController, RandomController, ScenarioSetup, VerbosityLevel,
    },
    Result,
};
use std::path::PathBuf;

/// Controller type for each seat
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ControllerType {
    /// Makes random legal choices
    Random,
    /// Heuristic AI with attack/block planning
    Heuristic,
}

/// Deck variant
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// One deck shared by both seats
    Shared,
    /// A personal deck per seat
    PerPlayer,
    /// Shared deck, no exhaustion tiebreaker
    Sandbox,
}

impl From<ModeArg> for MatchMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Shared => MatchMode::SharedDeck,
            ModeArg::PerPlayer => MatchMode::PerPlayerDecks,
            ModeArg::Sandbox => MatchMode::Sandbox,
        }
    }
}

/// Verbosity level for match output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Spectrum Duel - two-player card battle engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match between two AI seats
    Play {
        /// Seed for deck shuffling and random controllers
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Deck variant
        #[arg(long, value_enum, default_value = "shared")]
        mode: ModeArg,

        /// Allow several blockers on one attacker
        #[arg(long)]
        multi_block: bool,

        /// Starting life for both seats
        #[arg(long, default_value_t = 20)]
        life: i32,

        /// Stop after this many turns
        #[arg(long, default_value_t = 500)]
        max_turns: u32,

        /// Verbosity level for match output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Print outcome events as JSON lines instead of the text log
        #[arg(long)]
        json: bool,

        /// Start from a scripted position (JSON scenario file)
        #[arg(long, value_name = "SCENARIO_FILE")]
        scenario: Option<PathBuf>,

        /// Player 1 controller type
        #[arg(long, value_enum, default_value = "heuristic")]
        p1: ControllerType,

        /// Player 2 controller type
        #[arg(long, value_enum, default_value = "heuristic")]
        p2: ControllerType,
    },

    /// Play many seeded matches and print the tally
    Bench {
        /// Number of matches to run
        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        /// First seed; match i uses seed + i
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Deck variant
        #[arg(long, value_enum, default_value = "shared")]
        mode: ModeArg,

        /// Allow several blockers on one attacker
        #[arg(long)]
        multi_block: bool,

        /// Player 1 controller type
        #[arg(long, value_enum, default_value = "heuristic")]
        p1: ControllerType,

        /// Player 2 controller type
        #[arg(long, value_enum, default_value = "random")]
        p2: ControllerType,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            mode,
            multi_block,
            life,
            max_turns,
            verbosity,
            json,
            scenario,
            p1,
            p2,
        } => {
            let mode = match scenario {
                Some(path) => MatchMode::Scenario(load_scenario(&path)?),
                None => mode.into(),
            };
            let config = MatchConfig::default()
                .with_seed(seed)
                .with_mode(mode)
                .with_multi_blocking(multi_block)
                .with_starting_life(life);
            run_play(config, max_turns, verbosity.0, json, p1, p2)
        }
        Commands::Bench {
            games,
            seed,
            mode,
            multi_block,
            p1,
            p2,
        } => run_bench(games, seed, mode.into(), multi_block, p1, p2),
    }
}

fn load_scenario(path: &PathBuf) -> Result<ScenarioSetup> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn make_controller(kind: ControllerType, seat: PlayerId, seed: u64) -> Box<dyn PlayerController> {
    match kind {
        ControllerType::Random => Box::new(RandomController::with_seed(seat, seed)),
        ControllerType::Heuristic => Box::new(HeuristicController::new(seat)),
    }
}

fn run_play(
    config: MatchConfig,
    max_turns: u32,
    verbosity: VerbosityLevel,
    json: bool,
    p1: ControllerType,
    p2: ControllerType,
) -> Result<()> {
    let seed = config.seed;
    let start = Match::start(config)?;
    let mut game = start.state;
    let mut controller1 = make_controller(p1, PlayerId::ONE, seed);
    let mut controller2 = make_controller(p2, PlayerId::TWO, seed.wrapping_add(1));

    let mut runner = MatchRunner::new(&mut game)
        .with_max_turns(max_turns)
        .with_verbosity(verbosity);
    let result = runner.run_match(controller1.as_mut(), controller2.as_mut())?;

    if json {
        for event in start.events.iter().chain(runner.events()) {
            println!("{}", serde_json::to_string(event)?);
        }
    } else {
        runner.game.logger.print_tail(usize::MAX);
        println!();
        match result.winner() {
            Some(winner) => println!(
                "Winner: {} after {} turns ({:?})",
                runner.game.player(winner).name,
                result.turns_played,
                result.end_reason
            ),
            None => println!(
                "No winner after {} turns ({:?})",
                result.turns_played, result.end_reason
            ),
        }
    }
    Ok(())
}

fn run_bench(
    games: usize,
    seed: u64,
    mode: MatchMode,
    multi_block: bool,
    p1: ControllerType,
    p2: ControllerType,
) -> Result<()> {
    println!("=== Spectrum Duel - Bench Mode ===");
    println!("Running {games} matches from seed {seed} ({p1:?} vs {p2:?})");

    let mut wins = [0u32; 2];
    let mut undecided = 0u32;
    let mut reasons: FxHashMap<&'static str, u32> = FxHashMap::default();
    let mut total_turns = 0u64;
    let started = std::time::Instant::now();

    for i in 0..games {
        let match_seed = seed.wrapping_add(i as u64);
        let config = MatchConfig::default()
            .with_seed(match_seed)
            .with_mode(mode.clone())
            .with_multi_blocking(multi_block);
        let mut game = Match::new(config)?;
        let mut controller1 = make_controller(p1, PlayerId::ONE, match_seed);
        let mut controller2 = make_controller(p2, PlayerId::TWO, match_seed.wrapping_add(1));

        let result = MatchRunner::new(&mut game)
            .with_verbosity(VerbosityLevel::Silent)
            .run_match(controller1.as_mut(), controller2.as_mut())?;

        match result.winner() {
            Some(winner) => wins[winner.index()] += 1,
            None => undecided += 1,
        }
        let reason = match result.end_reason {
            MatchEndReason::PlayerDeath(_) => "life",
            MatchEndReason::Exhaustion => "exhaustion",
            MatchEndReason::Resignation(_) => "resignation",
            MatchEndReason::TurnLimit => "turn limit",
            MatchEndReason::Manual => "manual",
        };
        *reasons.entry(reason).or_default() += 1;
        total_turns += result.turns_played as u64;
    }

    let elapsed = started.elapsed();
    println!();
    println!("P1 wins: {}", wins[0]);
    println!("P2 wins: {}", wins[1]);
    println!("Draws / unfinished: {undecided}");
    let mut reasons: Vec<_> = reasons.into_iter().collect();
    reasons.sort();
    for (reason, count) in reasons {
        println!("  ended by {reason}: {count}");
    }
    if games > 0 {
        println!(
            "Average turns: {:.1}, {:.2}ms per match",
            total_turns as f64 / games as f64,
            elapsed.as_secs_f64() * 1000.0 / games as f64
        );
    }
    Ok(())
}
