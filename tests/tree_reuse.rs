use fourbot::{Board, Mcts, SearchParams};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn capped(iterations: u64, seed: u64) -> SearchParams {
    SearchParams {
        movetime: Duration::from_secs(60),
        max_iterations: Some(iterations),
        seed: Some(seed),
        ..SearchParams::default()
    }
}

#[test]
fn advance_promotes_explored_child() {
    let mut m = Mcts::new(&Board::default(), capped(700, 12));
    m.search().expect("search");
    let old_board = m.root_board().clone();
    let child_id = m.tree().root_node().child(3).expect("column 3 expanded");
    let child = m.tree().get(child_id);
    let (visits, credit) = (child.visits(), child.player1_credit());
    assert!(visits > 0);

    m.advance(3);

    let root = m.tree().root_node();
    assert_eq!(root.board(), &old_board.next_state(3));
    assert_eq!(root.visits(), visits);
    assert_eq!(root.player1_credit(), credit);
    assert_eq!(root.parent(), None);
}

#[test]
fn advance_on_unexplored_column_starts_fresh() {
    let mut m = Mcts::new(&Board::default(), capped(0, 1));
    m.advance(5);
    let root = m.tree().root_node();
    assert_eq!(m.tree().len(), 1);
    assert_eq!(root.visits(), 0);
    assert_eq!(root.player1_credit(), 0.0);
    assert_eq!(root.board(), &Board::default().next_state(5));
}

#[test]
fn root_visits_count_inherited_plus_new_iterations() {
    let mut m = Mcts::new(&Board::default(), capped(600, 31));
    m.search().expect("first search");
    let best = m.root_stats().iter().max_by_key(|s| s.visits).map(|s| s.column).expect("stats");
    let inherited = m.tree().get(m.tree().root_node().child(best).expect("child")).visits();
    m.advance(best);
    let res = m.search().expect("second search");
    assert_eq!(m.tree().root_node().visits(), inherited + res.iterations);
}

#[test]
fn discarded_siblings_are_freed() {
    let mut m = Mcts::new(&Board::default(), capped(1_000, 6));
    m.search().expect("search");
    let before = m.tree().len();
    let root = m.tree().root_node();
    let kept_id = root.child(0).expect("column 0 expanded");

    fn subtree_size(m: &Mcts, id: usize) -> usize {
        1 + m.tree().get(id).children().iter().flatten().map(|&c| subtree_size(m, c)).sum::<usize>()
    }
    let kept = subtree_size(&m, kept_id);
    m.advance(0);
    assert_eq!(m.tree().len(), kept);
    assert!(m.tree().len() < before);
    for node in m.tree().iter().skip(1) {
        assert!(node.parent().is_some());
    }
}

#[test]
fn game_driver_keeps_tree_in_sync() {
    let mut board = Board::default();
    let mut engine = Mcts::new(&board, capped(200, 77));
    let human_moves = [3, 2, 4, 5, 1, 0, 6, 3, 2];
    let mut hi = 0;
    while !board.game_state().is_over() {
        let column = if board.turn() == fourbot::Player::One {
            let mut c = human_moves[hi % human_moves.len()];
            hi += 1;
            while !board.can_place(c) {
                c = (c + 1) % board.width();
            }
            c
        } else {
            engine.best_move().expect("engine move")
        };
        assert!(board.place(column));
        engine.advance(column);
        assert_eq!(engine.root_board(), &board);
    }
}
