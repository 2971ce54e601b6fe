use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use cinemaze::events::{Channel, ProgressionEvent};
use cinemaze::game::{
    Clock, DailyChallengeService, DifficultyClassifier, GameStatsService, Settings, SystemClock,
};
use cinemaze::metadata::BundledCatalog;
use cinemaze::model::{Actor, CompletedGame, Difficulty, MovieRecord};
use cinemaze::store::{FileStore, KeyValueStore};

#[derive(Parser)]
#[command(name = "cinemaze")]
#[command(about = "CineMaze progression, achievements and daily challenges", long_about = None)]
#[command(version)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a finished game
    Record {
        #[arg(long)]
        moves: u32,
        /// The connection was not completed
        #[arg(long)]
        loss: bool,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Actor ids met along the path
        #[arg(long = "actor")]
        actors: Vec<u64>,
        /// Movie ids visited along the path
        #[arg(long = "movie")]
        movies: Vec<u64>,
    },
    /// Show player stats
    Stats,
    /// List achievements and whether they are unlocked
    Achievements,
    /// Classify the difficulty of a movie pair
    Classify { start: u64, target: u64 },
    /// Daily challenge commands
    Daily {
        #[command(subcommand)]
        command: DailyCommand,
    },
    /// Forget all progression
    Reset,
}

#[derive(Subcommand)]
enum DailyCommand {
    /// Show today's pair
    Show,
    /// Submit today's result
    Submit {
        #[arg(long)]
        moves: u32,
        #[arg(long)]
        seconds: u64,
    },
    /// Show today's leaderboard
    Leaderboard,
    /// Show stats derived from the challenge history
    Stats,
    /// Show the challenge history
    History,
}

fn init_logging() {
    env_logger::init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let settings = Settings::load();
    let data_dir = settings.resolved_data_dir();
    debug!("Using data directory {:?}", data_dir);
    let store: Rc<dyn KeyValueStore> = Rc::new(FileStore::new(data_dir));
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);

    let (emitter, observer) = Channel::new::<ProgressionEvent>();
    if !cli.json {
        observer.subscribe(|event: &ProgressionEvent| match event {
            ProgressionEvent::LevelUp { level } => println!("Level up! You are now level {}", level),
            ProgressionEvent::StreakExtended { current_streak } => {
                println!("Streak extended to {} days", current_streak)
            }
            ProgressionEvent::AchievementUnlocked(achievement) => println!(
                "{} Achievement unlocked: {} ({})",
                achievement.icon, achievement.title, achievement.reward
            ),
            ProgressionEvent::GameRecorded { .. } => (),
        });
    }
    let stats_service =
        GameStatsService::new(Rc::clone(&store), Rc::clone(&clock)).with_events(emitter);
    let daily = DailyChallengeService::new(Rc::clone(&store), Rc::clone(&clock))
        .with_settings(&settings);
    let catalog = BundledCatalog::new();

    match cli.command {
        Command::Record {
            moves,
            loss,
            difficulty,
            actors,
            movies,
        } => {
            if moves == 0 && !loss {
                bail!("a completed connection takes at least one move");
            }
            let game = CompletedGame {
                moves,
                actors: actors.into_iter().map(|id| Actor::new(id, "")).collect(),
                movies: movies.into_iter().map(|id| MovieRecord::new(id, "")).collect(),
                is_win: !loss,
                difficulty,
            };
            let reward = stats_service.record_game_complete(&game);
            if cli.json {
                print_json(&reward)?;
            } else {
                println!(
                    "+{} XP, level {} ({}/{})",
                    reward.exp_gained,
                    reward.stats.level,
                    reward.stats.experience,
                    reward.stats.next_level_exp
                );
            }
        }
        Command::Stats => {
            let stats = stats_service.get_player_stats();
            if cli.json {
                print_json(&stats)?;
            } else {
                println!("Level {} ({:.0}% to next)", stats.level, stats.level_progress() * 100.0);
                println!("Games {} / wins {}", stats.total_games, stats.total_wins);
                match stats.best_move_count {
                    Some(best) => println!("Best {} moves, average {:.1}", best, stats.average_moves),
                    None => println!("No wins yet"),
                }
                println!(
                    "Wins by difficulty: easy {}, medium {}, hard {}",
                    stats.easy_wins, stats.medium_wins, stats.hard_wins
                );
                println!(
                    "Streak {} (longest {})",
                    stats.current_streak, stats.longest_streak
                );
                println!(
                    "Discovered {} actors across {} movies",
                    stats.unique_actors_found.len(),
                    stats.movies_watched.len()
                );
            }
        }
        Command::Achievements => {
            let board = stats_service.achievement_board();
            if cli.json {
                print_json(&board)?;
            } else {
                for status in board {
                    let mark = if status.unlocked { "x" } else { " " };
                    println!(
                        "[{}] {} {}: {}",
                        mark,
                        status.achievement.icon,
                        status.achievement.title,
                        status.achievement.description
                    );
                }
            }
        }
        Command::Classify { start, target } => {
            let classifier = DifficultyClassifier::new(settings.seed);
            if Settings::is_debug_mode() {
                eprintln!("classifier seed {}", classifier.seed());
            }
            let start = catalog
                .movie(start)
                .cloned()
                .unwrap_or_else(|| MovieRecord::new(start, ""));
            let target = catalog
                .movie(target)
                .cloned()
                .unwrap_or_else(|| MovieRecord::new(target, ""));
            let difficulty = classifier.classify_with_metadata(&start, &target, &catalog);
            if cli.json {
                print_json(&difficulty)?;
            } else {
                println!(
                    "{} (x{} XP)",
                    difficulty.label(),
                    difficulty.xp_multiplier()
                );
            }
        }
        Command::Daily { command } => {
            daily.check_new_day();
            run_daily(&daily, &catalog, command, cli.json)?;
        }
        Command::Reset => {
            stats_service.reset_stats();
            println!("Progress reset");
        }
    }
    Ok(())
}

fn run_daily(
    daily: &DailyChallengeService,
    catalog: &BundledCatalog,
    command: DailyCommand,
    json: bool,
) -> Result<()> {
    match command {
        DailyCommand::Show => {
            let pair = daily.todays_challenge_hydrated(catalog);
            if json {
                return print_json(&pair);
            }
            println!("Connect {} to {}", pair.start.title, pair.target.title);
            if let Some(result) = daily.get_todays_result() {
                println!("Completed today in {} moves", result.moves);
            }
            let remaining = daily.time_until_next_challenge().as_secs();
            println!("Next challenge in {}h {}m", remaining / 3600, remaining % 3600 / 60);
        }
        DailyCommand::Submit { moves, seconds } => {
            if moves == 0 {
                bail!("a completed connection takes at least one move");
            }
            let result = daily.submit_result(moves, Duration::from_secs(seconds), Vec::new());
            if json {
                return print_json(&result);
            }
            let rank = result
                .leaderboard_id
                .and_then(|id| daily.rank_of(id))
                .context("submission missing from today's leaderboard")?;
            println!("Submitted {} moves in {}s, rank {}", moves, seconds, rank);
        }
        DailyCommand::Leaderboard => {
            let board = daily.get_todays_leaderboard();
            if json {
                return print_json(&board);
            }
            for entry in board {
                println!(
                    "{:>3}. {} moves, {}s",
                    entry.rank,
                    entry.moves,
                    entry.time_taken.as_secs()
                );
            }
        }
        DailyCommand::Stats => {
            let stats = daily.get_user_stats();
            if json {
                return print_json(&stats);
            }
            println!("Completed {} challenges", stats.total_completed);
            println!(
                "Average {:.1} moves / {:.1}s, best {} moves / {:.1}s",
                stats.average_moves, stats.average_time, stats.best_moves, stats.best_time
            );
            println!(
                "Daily streak {} (longest {})",
                stats.current_streak, stats.longest_streak
            );
        }
        DailyCommand::History => {
            let history = daily.get_history();
            if json {
                return print_json(&history);
            }
            for result in history {
                println!(
                    "{}: {} moves, {}s",
                    result.date,
                    result.moves,
                    result.time_taken.as_secs()
                );
            }
        }
    }
    Ok(())
}
