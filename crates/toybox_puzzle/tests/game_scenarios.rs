//! Game scenarios
//!
//! Whole-game flows driven through the public `Game` API: dropping pieces,
//! clearing rows, choosing after a four-row clear, and losing.

use rand::rngs::StdRng;
use rand::SeedableRng;
use toybox_puzzle::{Game, GameSettings, LockOutcome, Phase, PuzzleAction, Shape, ShapeCatalog};

const GREY: [u8; 3] = [128, 128, 128];

fn new_game(catalog: ShapeCatalog) -> Game {
    Game::with_rng(GameSettings::default(), catalog, StdRng::seed_from_u64(7))
}

/// Tick gravity until the current piece locks
fn drop_until_locked(game: &mut Game) -> LockOutcome {
    let fall = game.settings().fall_speed;
    for _ in 0..200 {
        if let Some(outcome) = game.tick(fall) {
            return outcome;
        }
    }
    panic!("piece never locked");
}

/// Fill rows with locked cells, leaving one column open
fn fill_rows_except(game: &mut Game, rows: std::ops::Range<i32>, open_column: i32) {
    let width = game.settings().grid_width;
    for y in rows {
        for x in 0..width {
            if x != open_column {
                game.locked_mut().lock(x, y, GREY);
            }
        }
    }
}

#[test]
fn test_four_row_clear_scores_four_and_offers_choice() {
    let mut game = new_game(ShapeCatalog::cat_pieces());
    fill_rows_except(&mut game, 16..20, 5);

    let outcome = drop_until_locked(&mut game);

    assert_eq!(outcome.rows_cleared, 4);
    assert_eq!(outcome.score, 4);
    assert!(outcome.choosing);
    assert_eq!(game.score(), 4);

    // The top block of the column was above the cleared rows and fell to the floor
    assert_eq!(game.locked().len(), 1);
    assert!(game.locked().contains(5, 19));

    match game.phase() {
        Phase::Choosing(chooser) => assert_eq!(chooser.options(), &["I".to_string()]),
        other => panic!("expected Choosing, got {:?}", other),
    }
}

#[test]
fn test_gravity_paused_while_choosing() {
    let mut game = new_game(ShapeCatalog::cat_pieces());
    fill_rows_except(&mut game, 16..20, 5);
    drop_until_locked(&mut game);

    assert_eq!(game.tick(10.0), None);
    game.apply(PuzzleAction::MoveLeft);
    assert!(game.is_choosing());
}

#[test]
fn test_confirm_choice_spawns_selected_shape() {
    let dot = Shape::new("dot", [vec!["C"]]).unwrap();
    let bar = Shape::new("bar", [vec!["CCC"]]).unwrap();
    let catalog = ShapeCatalog::new(vec![
        ShapeCatalog::cat_pieces().shapes()[0].clone(),
        dot,
        bar,
    ])
    .unwrap();

    // Find a seed whose first piece is the cat column
    let mut game = (0..100)
        .map(|seed| Game::with_rng(GameSettings::default(), catalog.clone(), StdRng::seed_from_u64(seed)))
        .find(|game| game.current().shape.name() == "I")
        .expect("no seed produced an I piece");

    fill_rows_except(&mut game, 16..20, 5);
    drop_until_locked(&mut game);
    assert!(game.is_choosing());

    // Wrap from the first option to the last
    game.apply(PuzzleAction::ChoicePrev);
    game.apply(PuzzleAction::ConfirmChoice);

    assert_eq!(game.phase(), &Phase::Playing);
    assert_eq!(game.current().shape.name(), "bar");
    assert_eq!(game.current().x, game.settings().spawn_x());
    assert_eq!(game.current().y, 0);
}

#[test]
fn test_console_choice_by_index() {
    let mut game = new_game(ShapeCatalog::cat_pieces());
    fill_rows_except(&mut game, 16..20, 5);
    drop_until_locked(&mut game);

    assert!(!game.choose_shape(3));
    assert!(game.is_choosing());
    assert!(game.choose_shape(0));
    assert_eq!(game.phase(), &Phase::Playing);
}

#[test]
fn test_block_in_top_row_loses() {
    let dot = Shape::new("dot", [vec!["C"]]).unwrap();
    let mut game = new_game(ShapeCatalog::new(vec![dot]).unwrap());
    let x = game.settings().spawn_x();
    game.locked_mut().lock(x, 1, GREY);

    let outcome = drop_until_locked(&mut game);

    assert!(outcome.lost);
    assert!(game.is_lost());
    assert!(game.locked().contains(x, 0));
}

#[test]
fn test_no_room_to_spawn_loses() {
    let mut game = new_game(ShapeCatalog::cat_pieces());
    for y in 1..20 {
        game.locked_mut().lock(5, y, GREY);
    }

    let outcome = drop_until_locked(&mut game);

    assert!(outcome.lost);
    assert_eq!(game.phase(), &Phase::Lost);
    // Nothing moves once the game is over
    assert_eq!(game.tick(10.0), None);
}

#[test]
fn test_score_accumulates_across_clears() {
    let mut game = new_game(ShapeCatalog::cat_pieces());
    fill_rows_except(&mut game, 19..20, 5);

    let first = drop_until_locked(&mut game);
    assert_eq!(first.rows_cleared, 1);
    assert!(!first.choosing);
    // The rest of the column settled one row lower
    for y in 16..20 {
        assert!(game.locked().contains(5, y));
    }

    // Rows 18 and 19 are completed by the settled column
    fill_rows_except(&mut game, 18..20, 5);
    let second = drop_until_locked(&mut game);
    assert_eq!(second.rows_cleared, 2);
    assert_eq!(second.score, 3);
    assert_eq!(game.score(), 3);
}

#[test]
fn test_chosen_shape_without_room_loses() {
    let column = Shape::new("column", [vec!["C"; 10]]).unwrap();
    let catalog = ShapeCatalog::new(vec![ShapeCatalog::cat_pieces().shapes()[0].clone(), column]).unwrap();
    let mut game = (0..100)
        .map(|seed| Game::with_rng(GameSettings::default(), catalog.clone(), StdRng::seed_from_u64(seed)))
        .find(|game| game.current().shape.name() == "I")
        .expect("no seed produced an I piece");

    fill_rows_except(&mut game, 16..20, 5);
    // Settles at row 9 after the clear, right under the chosen column
    game.locked_mut().lock(3, 5, GREY);
    let outcome = drop_until_locked(&mut game);
    assert!(outcome.choosing);
    assert!(!outcome.lost);
    assert!(game.locked().contains(3, 9));

    assert!(game.choose_shape(1));

    assert!(game.is_lost());
    assert_eq!(game.tick(10.0), None);
    assert_eq!(game.tick(10.0), None);
}
