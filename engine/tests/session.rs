use parking_panic_core::{
    CellCoord, Direction, Exit, LevelDefinition, MoveError, Orientation, VehicleId, VehicleSpec,
};
use parking_panic_engine::{query, Session};

fn spec(
    id: u32,
    orientation: Orientation,
    length: u32,
    column: u32,
    row: u32,
    is_target: bool,
) -> VehicleSpec {
    VehicleSpec {
        id: VehicleId::new(id),
        orientation,
        length,
        anchor: CellCoord::new(column, row),
        is_target,
    }
}

/// The lot from the distilled walkthrough: a 6x6 grid with an east exit in
/// row 2, the target car on the west wall, and one vertical blocker parked
/// across the exit lane.
fn walkthrough_level() -> LevelDefinition {
    LevelDefinition {
        columns: 6,
        rows: 6,
        exit: Exit::new(Direction::East, 2),
        vehicles: vec![
            spec(0, Orientation::Horizontal, 2, 0, 2, true),
            spec(1, Orientation::Vertical, 2, 3, 2, false),
        ],
    }
}

fn anchor_of(session: &Session, id: u32) -> CellCoord {
    query::vehicle_view(session)
        .get(VehicleId::new(id))
        .expect("vehicle exists")
        .anchor
}

fn occupied_cell_count(session: &Session) -> usize {
    query::occupancy_view(session)
        .iter()
        .filter(Option::is_some)
        .count()
}

#[test]
fn clearing_the_lane_and_sliding_home_solves_in_two_steps() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");
    assert!(!session.is_solved());

    let blocker_anchor = session
        .attempt_move(VehicleId::new(1), Direction::South, 1)
        .expect("blocker slides out of the lane");
    assert_eq!(blocker_anchor, CellCoord::new(3, 3));
    assert!(!session.is_solved());

    let target_anchor = session
        .attempt_move(VehicleId::new(0), Direction::East, 4)
        .expect("target slides to the exit");
    assert_eq!(target_anchor, CellCoord::new(4, 2));

    assert!(session.is_solved());
    assert_eq!(session.step_count(), 2);
}

#[test]
fn cross_axis_slides_are_rejected_without_side_effects() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");

    let result = session.attempt_move(VehicleId::new(0), Direction::North, 1);

    assert_eq!(
        result,
        Err(MoveError::InvalidDirection {
            orientation: Orientation::Horizontal,
            direction: Direction::North,
        })
    );
    assert_eq!(session.step_count(), 0);
    assert_eq!(anchor_of(&session, 0), CellCoord::new(0, 2));
}

#[test]
fn a_partially_clear_path_blocks_the_whole_slide() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");

    // One free cell ahead of the target, then the blocker at (3, 2).
    let result = session.attempt_move(VehicleId::new(0), Direction::East, 2);

    assert_eq!(
        result,
        Err(MoveError::Blocked {
            vehicle: VehicleId::new(1)
        })
    );
    assert_eq!(anchor_of(&session, 0), CellCoord::new(0, 2));
    assert_eq!(session.step_count(), 0);
    assert_eq!(
        query::cell_occupant(&session, CellCoord::new(2, 2)).expect("cell is in bounds"),
        None
    );
}

#[test]
fn slides_cannot_leave_the_lot() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");

    assert_eq!(
        session.attempt_move(VehicleId::new(0), Direction::West, 1),
        Err(MoveError::OutOfBounds)
    );
    assert_eq!(
        session.attempt_move(VehicleId::new(1), Direction::South, 4),
        Err(MoveError::OutOfBounds)
    );
    assert_eq!(session.step_count(), 0);
}

#[test]
fn applied_moves_preserve_occupied_cell_count() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");
    let before = occupied_cell_count(&session);

    let _ = session
        .attempt_move(VehicleId::new(1), Direction::South, 1)
        .expect("blocker slides");

    assert_eq!(occupied_cell_count(&session), before);
    assert_eq!(session.step_count(), 1);
}

#[test]
fn is_solved_is_idempotent_between_moves() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");
    assert!(!session.is_solved());
    assert!(!session.is_solved());

    let _ = session
        .attempt_move(VehicleId::new(1), Direction::South, 1)
        .expect("blocker slides");

    let first = session.is_solved();
    assert_eq!(session.is_solved(), first);
}

#[test]
fn each_step_counts_once_regardless_of_distance() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");

    let _ = session
        .attempt_move(VehicleId::new(1), Direction::South, 1)
        .expect("blocker slides");
    let _ = session
        .attempt_move(VehicleId::new(0), Direction::East, 4)
        .expect("target slides four cells");

    assert_eq!(session.step_count(), 2);
}

#[test]
fn reset_restores_the_initial_layout() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");

    let _ = session
        .attempt_move(VehicleId::new(1), Direction::South, 1)
        .expect("blocker slides");
    let _ = session
        .attempt_move(VehicleId::new(0), Direction::East, 4)
        .expect("target slides");
    assert!(session.is_solved());

    session.reset();

    assert_eq!(session.step_count(), 0);
    assert!(!session.is_solved());
    assert_eq!(anchor_of(&session, 0), CellCoord::new(0, 2));
    assert_eq!(anchor_of(&session, 1), CellCoord::new(3, 2));
    assert_eq!(
        query::cell_occupant(&session, CellCoord::new(0, 2)).expect("cell is in bounds"),
        Some(VehicleId::new(0))
    );
    assert_eq!(
        query::cell_occupant(&session, CellCoord::new(3, 3)).expect("cell is in bounds"),
        Some(VehicleId::new(1))
    );
}

#[test]
fn undo_reverses_the_latest_move_and_counts_a_step() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");

    let _ = session
        .attempt_move(VehicleId::new(1), Direction::South, 1)
        .expect("blocker slides");
    let anchor = session.undo().expect("undo succeeds");

    assert_eq!(anchor, CellCoord::new(3, 2));
    assert_eq!(anchor_of(&session, 1), CellCoord::new(3, 2));
    assert_eq!(session.step_count(), 2);
}

#[test]
fn undo_without_history_fails_and_changes_nothing() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");

    assert_eq!(session.undo(), Err(MoveError::NothingToUndo));
    assert_eq!(session.step_count(), 0);
    assert_eq!(anchor_of(&session, 0), CellCoord::new(0, 2));
}

#[test]
fn undo_consumes_history_entries_in_reverse_order() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");

    let _ = session
        .attempt_move(VehicleId::new(1), Direction::South, 1)
        .expect("blocker slides");
    let _ = session
        .attempt_move(VehicleId::new(0), Direction::East, 2)
        .expect("target slides");

    assert_eq!(session.undo().expect("first undo"), CellCoord::new(0, 2));
    assert_eq!(session.undo().expect("second undo"), CellCoord::new(3, 2));
    assert_eq!(session.undo(), Err(MoveError::NothingToUndo));
    assert_eq!(session.step_count(), 4);
}

#[test]
fn queries_expose_the_level_geometry() {
    let session = Session::load(walkthrough_level()).expect("level loads");

    assert_eq!(query::dimensions(&session), (6, 6));
    assert_eq!(query::exit(&session), Exit::new(Direction::East, 2));
    assert_eq!(query::target_vehicle(&session), VehicleId::new(0));
    assert_eq!(
        query::cell_occupant(&session, CellCoord::new(1, 2)).expect("cell is in bounds"),
        Some(VehicleId::new(0))
    );
    assert!(query::cell_occupant(&session, CellCoord::new(6, 0)).is_err());

    let view = query::occupancy_view(&session);
    assert_eq!(view.dimensions(), (6, 6));
    assert!(view.is_free(CellCoord::new(5, 5)));
}

#[test]
fn a_solved_lot_can_be_unsolved_by_moving_the_target_away() {
    let mut session = Session::load(walkthrough_level()).expect("level loads");

    let _ = session
        .attempt_move(VehicleId::new(1), Direction::South, 1)
        .expect("blocker slides");
    let _ = session
        .attempt_move(VehicleId::new(0), Direction::East, 4)
        .expect("target slides");
    assert!(session.is_solved());

    let _ = session
        .attempt_move(VehicleId::new(0), Direction::West, 1)
        .expect("target slides back");

    assert!(!session.is_solved());
}
