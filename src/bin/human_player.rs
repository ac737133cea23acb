use anyhow::{Context, Result};
use clap::Parser;
use inertia::config::GameConfig;
use inertia::game::Game;
use inertia::leaderboard::JsonFileStore;
use inertia::movement::MoveResult;
use inertia::position::Direction;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::Level as LogLevel;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Folder containing level1.txt, level2.txt, ...
    #[clap(short, long, default_value = "levels")]
    levels: PathBuf,

    /// File where the leaderboard is kept
    #[clap(long, default_value = "leaderboard.json")]
    leaderboard: PathBuf,

    /// Number of scores kept in the leaderboard
    #[clap(long, default_value_t = 5)]
    max_scores: usize,

    /// Draw the board with terminal colours
    #[clap(long)]
    color: bool,

    /// Log more (-v for info, -vv for debug)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            levels_dir: self.levels.clone(),
            leaderboard_path: self.leaderboard.clone(),
            max_scores: self.max_scores,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LogLevel::WARN,
        1 => LogLevel::INFO,
        _ => LogLevel::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn print_status(game: &Game<JsonFileStore>, color: bool) -> Result<()> {
    println!("---------------------");
    println!("Level {} of {}", game.current_level(), game.max_levels());
    if color {
        let level = game.level()?;
        println!("{}", level.board().to_string_with_highlight(level.player_position().ok()));
        println!(
            "#Lives: {} | #Moves: {} | #Gems: {} | Level Score: {} pts | Game Score: {} pts",
            level.lives(),
            level.num_moves(),
            level.num_gems_got(),
            level.score(),
            game.score()
        );
    } else {
        println!("{}", game);
    }
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read from stdin")? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn offer_leaderboard(game: &mut Game<JsonFileStore>, input: &mut impl BufRead) -> Result<()> {
    println!("Final Score: {} pts", game.total_score());
    if game.is_in_leaderboard() {
        print!("You made it to the leaderboard! Enter your name: ");
        io::stdout().flush()?;
        if let Some(name) = read_line(input)? {
            if !name.is_empty() {
                game.add_to_leaderboard(&name)
                    .context("Failed to save the leaderboard")?;
            }
        }
    }
    println!("--- Leaderboard ---");
    print!("{}", game.leaderboard());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut game = Game::from_config(&args.config())
        .with_context(|| format!("Failed to open levels folder {}", args.levels.display()))?;
    if !game.next_level().context("Failed to load the first level")? {
        println!("No levels found in {}", args.levels.display());
        return Ok(());
    }
    println!("Welcome to Inertia!");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print_status(&game, args.color)?;

        if game.is_level_completed()? {
            if game.has_lost()? {
                println!("💀 You ran out of lives! GAME OVER.");
                offer_leaderboard(&mut game, &mut input)?;
                break;
            }
            println!("🎉 Level completed!");
            if !game.next_level().context("Failed to load the next level")? {
                println!("🎉 You beat every level! 🎉");
                offer_leaderboard(&mut game, &mut input)?;
                break;
            }
            continue;
        }

        print!("Enter Your Move (UP/DOWN/LEFT/RIGHT/UNDO/RELOAD/QUIT): ");
        io::stdout().flush()?;

        let Some(command) = read_line(&mut input)? else {
            println!();
            break;
        };

        match command.to_ascii_uppercase().as_str() {
            "QUIT" | "Q" => {
                println!("Thanks for playing!");
                break;
            }
            "UNDO" | "U" => {
                if game.undo()? {
                    println!("Move undone.");
                } else {
                    println!("Nothing to undo.");
                }
            }
            "RELOAD" | "R" => {
                game.reload().context("Failed to reload the level")?;
                println!("Level reloaded.");
            }
            other => match other.parse::<Direction>() {
                Ok(direction) => match game.move_player(direction)? {
                    MoveResult::Ok => {}
                    MoveResult::Die => println!("Boom! You stepped on a mine."),
                    MoveResult::Ko => println!("You cannot move that way."),
                },
                Err(e) => println!("{}. Use UP, DOWN, LEFT, RIGHT, UNDO, RELOAD or QUIT.", e),
            },
        }
    }

    Ok(())
}
