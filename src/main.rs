use anyhow::{Context, Result};
use clap::Parser;
use fourbot::config::GameConfig;
use fourbot::{Board, GameState, Mcts, Player};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play connect four against the MCTS engine", long_about = None)]
struct Args {
    /// JSON game config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Your side: '1' moves first, '2' moves second
    #[arg(long)]
    side: Option<String>,

    /// Board width (columns)
    #[arg(long)]
    width: Option<usize>,

    /// Board height (rows)
    #[arg(long)]
    height: Option<usize>,

    /// Engine thinking time per move in milliseconds
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// Seed for the engine's random source
    #[arg(long)]
    seed: Option<u64>,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn parse_side(side_str: &str) -> Result<Player> {
    match side_str.to_lowercase().as_str() {
        "1" | "one" | "first" => Ok(Player::One),
        "2" | "two" | "second" => Ok(Player::Two),
        _ => anyhow::bail!("Invalid side: use '1' or '2'"),
    }
}

/// Returns `None` when the human asks to quit.
fn get_human_move(board: &Board) -> Result<Option<usize>> {
    loop {
        print!("Enter your move (0-{}): ", board.width() - 1);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        let input = input.trim();
        if input == "quit" {
            return Ok(None);
        }

        match input.parse::<usize>() {
            Ok(column) if board.can_place(column) => return Ok(Some(column)),
            Ok(_) => println!("Illegal move!"),
            Err(_) => println!("Invalid move format! Enter a column number"),
        }
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(side) = &args.side { config.human = parse_side(side)?; }
    if let Some(w) = args.width { config.width = w; }
    if let Some(h) = args.height { config.height = h; }
    if let Some(ms) = args.movetime_ms { config.movetime_ms = ms; }
    if args.seed.is_some() { config.seed = args.seed; }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;

    let mut board = config.board()?;
    let mut engine = Mcts::new(&board, config.search_params());

    // Main game loop
    while board.game_state() == GameState::Ongoing {
        println!("\n{}", board);

        let is_human_turn = board.turn() == config.human;

        let column = if is_human_turn {
            match get_human_move(&board)? {
                Some(column) => column,
                None => {
                    println!("Thanks for playing!");
                    return Ok(());
                }
            }
        } else {
            if args.verbose {
                println!("Thinking...");
            }
            let res = engine.search()?;
            if args.verbose {
                println!("{}", engine.statistics_string());
                let ips = res.iterations as f64 / res.elapsed.as_secs_f64().max(1e-9);
                println!(
                    "Iterations: {}, root visits: {}, elapsed: {:.2}s, iterations/s: {:.0}",
                    res.iterations,
                    engine.tree().root_node().visits(),
                    res.elapsed.as_secs_f64(),
                    ips
                );
            }
            println!("Engine plays: {}", res.best_move);
            res.best_move
        };

        board.place(column);
        engine.advance(column);
    }

    println!("\n{}\n", board);
    match board.game_state() {
        GameState::Player1Won if config.human == Player::One => println!("You won."),
        GameState::Player2Won if config.human == Player::Two => println!("You won."),
        GameState::Player1Won | GameState::Player2Won => println!("Engine won."),
        _ => println!("Tie."),
    }

    Ok(())
}
