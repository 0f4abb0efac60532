use anyhow::Context;
use clap::Parser;
use fourbot::selfplay::{generate_games, summarize, write_records, Contender, SelfPlayParams};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fourbot-selfplay", about = "Play engine games and write JSON-lines records")]
struct Args {
    #[arg(long, default_value_t = 20)]
    games: usize,
    #[arg(long, default_value_t = 7)]
    width: usize,
    #[arg(long, default_value_t = 6)]
    height: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Player one: 'engine' or 'random'
    #[arg(long, default_value = "engine")]
    p1: String,
    /// Player two: 'engine' or 'random'
    #[arg(long, default_value = "random")]
    p2: String,
    #[arg(long, default_value_t = 200)]
    movetime_ms: u64,
    /// Iteration cap per engine move (makes games reproducible)
    #[arg(long)]
    iterations: Option<u64>,
    #[arg(long, default_value_t = std::f64::consts::SQRT_2)]
    exploration: f64,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn contender(kind: &str, a: &Args) -> anyhow::Result<Contender> {
    match kind {
        "engine" => Ok(Contender::Engine { movetime_ms: a.movetime_ms, max_iterations: a.iterations, exploration: a.exploration }),
        "random" => Ok(Contender::Random),
        other => anyhow::bail!("Invalid contender '{}': use 'engine' or 'random'", other),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams {
        games: a.games,
        width: a.width,
        height: a.height,
        seed: a.seed,
        player_one: contender(&a.p1, &a)?,
        player_two: contender(&a.p2, &a)?,
    };
    eprintln!("Playing {} games ({} vs {}, movetime={}ms, threads={})", a.games, a.p1, a.p2, a.movetime_ms, a.threads);

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games")
            .context("progress bar template")?
            .progress_chars("=>-"),
    );
    let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads.max(1)).build()?;
    let games = pool.install(|| generate_games(&params, Some(&pb)))?;
    pb.finish();

    if let Some(dir) = a.out.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = File::create(&a.out).with_context(|| format!("creating {}", a.out.display()))?;
    write_records(&games, BufWriter::new(file))?;

    let s = summarize(&games);
    eprintln!(
        "Wrote {} games to {}: p1 wins={} p2 wins={} ties={}",
        games.len(),
        a.out.display(),
        s.player_one_wins,
        s.player_two_wins,
        s.ties
    );
    Ok(())
}
