use clap::Parser;
use fourbot::{Board, Mcts, SearchParams};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "fourbot-bench", version, about = "Benchmark MCTS iterations per second")]
struct Args {
    /// Board width
    #[arg(long, default_value_t = 7)]
    width: usize,

    /// Board height
    #[arg(long, default_value_t = 6)]
    height: usize,

    /// Columns to play before searching, e.g. "3,3,2"
    #[arg(long, default_value = "")]
    moves: String,

    /// Movetime in milliseconds
    #[arg(long, default_value_t = 1000)]
    movetime: u64,

    /// Fixed iteration count (overrides movetime when > 0)
    #[arg(long, default_value_t = 0)]
    iterations: u64,

    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut board = Board::new(args.width, args.height)?;
    for tok in args.moves.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let column: usize = tok.parse()?;
        if !board.place(column) {
            anyhow::bail!("column {} is not playable", column);
        }
    }

    let mut p = SearchParams { seed: Some(args.seed), ..SearchParams::default() };
    if args.iterations > 0 {
        p.movetime = Duration::MAX;
        p.max_iterations = Some(args.iterations);
    } else {
        p.movetime = Duration::from_millis(args.movetime);
    }

    let mut engine = Mcts::new(&board, p);
    let res = engine.search()?;
    let secs = res.elapsed.as_secs_f64();
    let ips = if secs > 0.0 { res.iterations as f64 / secs } else { 0.0 };
    println!(
        "bestmove={} iterations={} nodes={} elapsed={:.3}s ips={:.1}",
        res.best_move,
        res.iterations,
        engine.tree().len(),
        secs,
        ips
    );
    Ok(())
}
