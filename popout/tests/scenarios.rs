use popout::{
    parse_history, Board, GameConfig, Move, Outcome, Player, Referee, SearchConfig, SearchEngine,
    TerminalOracle, WON,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("popout=debug")
        .with_test_writer()
        .try_init();
}

#[test]
fn completes_open_three() -> anyhow::Result<()> {
    init_tracing();
    let board = Board::from_diagram(
        4,
        Player::One,
        &[".......", ".......", ".......", ".......", ".......", "..111.."],
    )?;
    for depth in 1..=3 {
        let mut engine = SearchEngine::with_referee(SearchConfig {
            max_depth: depth,
            ..SearchConfig::default()
        })?;
        let outcome = engine.search(&board, Player::One)?;
        assert!(
            [Move::drop(1), Move::drop(5)].contains(&outcome.mv),
            "depth {depth} picked {}",
            outcome.mv
        );
        assert_eq!(outcome.value, WON);
        let child = board.apply(Player::One, outcome.mv)?;
        assert_eq!(Referee.classify(&child), Outcome::Win(Player::One));
    }
    Ok(())
}

#[test]
fn wins_with_a_pop() -> anyhow::Result<()> {
    init_tracing();
    // Popping column 0 drops player one's piece into the middle row.
    let board = Board::from_diagram(3, Player::One, &[".....", "1.2..", "211..", "121.."])?;
    for depth in [1, 3] {
        let mut engine = SearchEngine::with_referee(SearchConfig {
            max_depth: depth,
            ..SearchConfig::default()
        })?;
        let outcome = engine.search(&board, Player::One)?;
        assert_eq!(outcome.mv, Move::pop(0));
        assert_eq!(outcome.value, WON);
    }
    Ok(())
}

#[test]
fn json_configured_parallel_search() -> anyhow::Result<()> {
    init_tracing();
    let config = SearchConfig::from_json(
        r#"{"max_depth": 3, "heuristic": "clusters", "parallel": true, "seed": 7}"#,
    )?;
    let board = Board::from_diagram(3, Player::One, &[".....", "1.2..", "211..", "121.."])?;
    let mut engine = SearchEngine::with_referee(config)?;
    assert_eq!(engine.choose_move(&board, Player::One)?, Move::pop(0));
    Ok(())
}

#[test]
fn blocks_after_replayed_history() -> anyhow::Result<()> {
    init_tracing();
    let moves = parse_history("1d0 2d0 1d1 2d1 1d2")?;
    let board = Board::from_history(&GameConfig::default(), &moves)?;
    assert_eq!(board.turn(), Player::Two);
    let mut engine = SearchEngine::with_referee(SearchConfig {
        max_depth: 2,
        ..SearchConfig::default()
    })?;
    assert_eq!(engine.choose_move(&board, Player::Two)?, Move::drop(3));
    Ok(())
}

#[test]
fn self_play_reaches_a_result() -> anyhow::Result<()> {
    init_tracing();
    let config = GameConfig::new(5, 6, 4)?;
    let mut engines = [
        SearchEngine::with_referee(SearchConfig {
            max_depth: 3,
            seed: Some(11),
            ..SearchConfig::default()
        })?,
        SearchEngine::with_referee(SearchConfig {
            max_depth: 2,
            seed: Some(12),
            heuristic: popout::Heuristic::Clusters,
            ..SearchConfig::default()
        })?,
    ];
    let mut board = Board::new(&config, Player::One)?;
    // Every drop adds a piece and each side pops at most once.
    let limit = config.rows * config.columns + 4;
    let mut plies = 0;
    while Referee.classify(&board) == Outcome::Ongoing {
        assert!(plies < limit, "game did not finish:\n{board}");
        let player = board.turn();
        let engine = match player {
            Player::One => &mut engines[0],
            Player::Two => &mut engines[1],
        };
        let mv = engine.choose_move(&board, player)?;
        board.is_legal(player, mv)?;
        board = board.apply(player, mv)?;
        plies += 1;
    }
    assert!(Referee.classify(&board).is_terminal());
    Ok(())
}
