use fourbot::selfplay::{generate_games, play_game, read_records, replay, summarize, write_records, Contender, SelfPlayParams};
use fourbot::GameState;
use std::io::Cursor;

fn params(seed: u64) -> SelfPlayParams {
    SelfPlayParams {
        games: 3,
        width: 7,
        height: 6,
        seed,
        player_one: Contender::Engine { movetime_ms: 60_000, max_iterations: Some(150), exploration: std::f64::consts::SQRT_2 },
        player_two: Contender::Random,
    }
}

#[test]
fn selfplay_generates_games_deterministically() {
    let p = params(42);
    let g1 = generate_games(&p, None).expect("games");
    let g2 = generate_games(&p, None).expect("games");
    assert_eq!(g1.len(), 3);
    assert_eq!(g1, g2);
    for g in &g1 {
        assert!(g.result.is_over());
        let board = replay(g, 7, 6).expect("replayable");
        assert_eq!(board.game_state(), g.result);
    }
}

#[test]
fn selfplay_different_seeds_differ() {
    let a = play_game(&params(1), 0).expect("game");
    let b = play_game(&params(2), 0).expect("game");
    assert_ne!(a.moves, b.moves, "seed did not alter the game");
}

#[test]
fn engine_beats_random_mover() {
    let mut p = params(5);
    p.games = 6;
    p.player_one = Contender::Engine { movetime_ms: 60_000, max_iterations: Some(1_500), exploration: std::f64::consts::SQRT_2 };
    let games = generate_games(&p, None).expect("games");
    let s = summarize(&games);
    assert_eq!(s.player_one_wins + s.player_two_wins + s.ties, 6);
    assert!(s.player_one_wins >= 5, "engine won only {} of 6", s.player_one_wins);
}

#[test]
fn records_roundtrip_through_json_lines() {
    let games = generate_games(&params(9), None).expect("games");
    let mut buf = Vec::new();
    write_records(&games, &mut buf).expect("write");
    assert_eq!(String::from_utf8_lossy(&buf).lines().count(), games.len());
    let back = read_records(Cursor::new(buf)).expect("read");
    assert_eq!(back, games);
}

#[test]
fn replay_rejects_unplayable_moves() {
    let record = fourbot::selfplay::GameRecord { game: 0, moves: vec![0; 7], result: GameState::Ongoing };
    assert!(replay(&record, 7, 6).is_err());
}
