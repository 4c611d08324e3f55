#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for the Parking Panic puzzle engine.
//!
//! A [`Session`] owns one play-through of one level: the dense occupancy
//! grid, the vehicle set, the step counter, and the undo history. Slides are
//! validated and applied atomically; a rejected slide reports the precise
//! reason and leaves the session untouched. Adapters mutate exclusively
//! through [`Session`] methods and read exclusively through [`query`].

mod grid;
mod vehicles;

use parking_panic_core::{
    CellCoord, Direction, GridError, LevelDefinition, LevelError, MoveError, Orientation,
    VehicleId,
};

use crate::{
    grid::OccupancyGrid,
    vehicles::{shift_cell, Vehicle},
};

/// Mutable state of one play-through of one level.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    definition: LevelDefinition,
    grid: OccupancyGrid,
    vehicles: Vec<Vehicle>,
    target: VehicleId,
    steps: StepCounter,
    solved: bool,
    history: Vec<AppliedMove>,
}

impl Session {
    /// Validates a level definition and builds a fresh session from it.
    ///
    /// The definition is retained so [`Session::reset`] can restore the
    /// initial layout later.
    pub fn load(definition: LevelDefinition) -> Result<Self, LevelError> {
        if definition.columns == 0 || definition.rows == 0 {
            return Err(LevelError::ZeroDimension);
        }

        let lane_bound = match definition.exit.side().orientation() {
            Orientation::Horizontal => definition.rows,
            Orientation::Vertical => definition.columns,
        };
        if definition.exit.lane() >= lane_bound {
            return Err(LevelError::ExitOutOfRange {
                lane: definition.exit.lane(),
            });
        }

        let mut grid = OccupancyGrid::new(definition.columns, definition.rows);
        let mut vehicles: Vec<Vehicle> = Vec::with_capacity(definition.vehicles.len());
        let mut target: Option<VehicleId> = None;

        for spec in &definition.vehicles {
            if vehicles.iter().any(|vehicle| vehicle.id() == spec.id) {
                return Err(LevelError::DuplicateVehicle { vehicle: spec.id });
            }
            if spec.length < 2 {
                return Err(LevelError::VehicleTooShort { vehicle: spec.id });
            }

            let vehicle = Vehicle::from_spec(spec);
            if !span_fits(&vehicle, definition.columns, definition.rows) {
                return Err(LevelError::VehicleOutOfBounds { vehicle: spec.id });
            }
            match grid.place(&vehicle) {
                Ok(()) => {}
                Err(GridError::Overlap { cell, occupant }) => {
                    return Err(LevelError::VehicleOverlap {
                        first: occupant,
                        second: spec.id,
                        cell,
                    });
                }
                Err(_) => {
                    return Err(LevelError::VehicleOutOfBounds { vehicle: spec.id });
                }
            }

            if spec.is_target {
                if let Some(first) = target {
                    return Err(LevelError::MultipleTargets {
                        first,
                        second: spec.id,
                    });
                }
                target = Some(spec.id);
            }
            vehicles.push(vehicle);
        }

        let Some(target) = target else {
            return Err(LevelError::NoTarget);
        };
        let Some(target_vehicle) = vehicles.iter().find(|vehicle| vehicle.id() == target) else {
            return Err(LevelError::NoTarget);
        };
        if !exit_reachable(target_vehicle, &definition) {
            return Err(LevelError::ExitMisaligned { vehicle: target });
        }

        let mut session = Self {
            definition,
            grid,
            vehicles,
            target,
            steps: StepCounter::default(),
            solved: false,
            history: Vec::new(),
        };
        session.solved = session.target_at_exit();
        Ok(session)
    }

    /// Validates and applies a slide of `distance` cells for a vehicle.
    ///
    /// On success the step counter advances by exactly one regardless of the
    /// distance, the move is recorded for [`Session::undo`], and the new
    /// anchor is returned. On failure nothing changes.
    pub fn attempt_move(
        &mut self,
        vehicle: VehicleId,
        direction: Direction,
        distance: u32,
    ) -> Result<CellCoord, MoveError> {
        let anchor = self.apply_slide(vehicle, direction, distance)?;
        self.history.push(AppliedMove {
            vehicle,
            direction,
            distance,
        });
        self.steps.increment();
        self.solved = self.target_at_exit();
        Ok(anchor)
    }

    /// Reverses the most recent applied move.
    ///
    /// The inverse slide runs through the same validator and counts one step,
    /// exactly like a forward move; only the history entry is consumed
    /// instead of appended.
    pub fn undo(&mut self) -> Result<CellCoord, MoveError> {
        let last = self.history.last().copied().ok_or(MoveError::NothingToUndo)?;
        let anchor = self.apply_slide(last.vehicle, last.direction.opposite(), last.distance)?;
        let _ = self.history.pop();
        self.steps.increment();
        self.solved = self.target_at_exit();
        Ok(anchor)
    }

    /// Restores the initial layout of the loaded level.
    ///
    /// Vehicle positions return to the definition's anchors and the step
    /// counter, undo history, and solved flag are reset.
    pub fn reset(&mut self) {
        self.vehicles.clear();
        self.vehicles
            .extend(self.definition.vehicles.iter().map(Vehicle::from_spec));
        self.grid.fill_with(&self.vehicles);
        self.steps.reset();
        self.history.clear();
        self.solved = self.target_at_exit();
    }

    /// Reports whether the target vehicle has reached the exit.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// Number of committed moves in the current attempt.
    #[must_use]
    pub const fn step_count(&self) -> u32 {
        self.steps.get()
    }

    /// Runs the full legality check and, when it passes, the grid update.
    ///
    /// Shared by [`Session::attempt_move`] and [`Session::undo`]; neither the
    /// step counter nor the history is touched here so each caller can do its
    /// own bookkeeping.
    fn apply_slide(
        &mut self,
        vehicle_id: VehicleId,
        direction: Direction,
        distance: u32,
    ) -> Result<CellCoord, MoveError> {
        let index = self
            .vehicles
            .iter()
            .position(|vehicle| vehicle.id() == vehicle_id)
            .ok_or(MoveError::UnknownVehicle {
                vehicle: vehicle_id,
            })?;
        if distance == 0 {
            return Err(MoveError::ZeroDistance);
        }

        let vehicle = self.vehicles[index];
        if direction.orientation() != vehicle.orientation() {
            return Err(MoveError::InvalidDirection {
                orientation: vehicle.orientation(),
                direction,
            });
        }

        let destination = vehicle
            .shifted_anchor(direction, distance)
            .ok_or(MoveError::OutOfBounds)?;

        // The cells entered during the slide are exactly the `distance` cells
        // ahead of the leading edge, so probing those covers the whole path;
        // the vehicle can never collide with itself.
        let leading = vehicle.leading_cell(direction);
        for step in 1..=distance {
            let probe = shift_cell(leading, direction, step).ok_or(MoveError::OutOfBounds)?;
            if let Some(occupant) = self.grid.occupant(probe)? {
                return Err(MoveError::Blocked { vehicle: occupant });
            }
        }

        self.grid.clear(&self.vehicles[index])?;
        self.vehicles[index].relocate(destination);
        self.grid.place(&self.vehicles[index])?;
        Ok(destination)
    }

    fn target_at_exit(&self) -> bool {
        let Some(target) = self
            .vehicles
            .iter()
            .find(|vehicle| vehicle.id() == self.target)
        else {
            return false;
        };

        let anchor = target.anchor();
        let exit = self.definition.exit;
        match exit.side() {
            Direction::East => {
                anchor.row() == exit.lane()
                    && anchor.column() + target.length() == self.definition.columns
            }
            Direction::West => anchor.row() == exit.lane() && anchor.column() == 0,
            Direction::South => {
                anchor.column() == exit.lane()
                    && anchor.row() + target.length() == self.definition.rows
            }
            Direction::North => anchor.column() == exit.lane() && anchor.row() == 0,
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use parking_panic_core::{
        CellCoord, Exit, GridError, OccupancyView, VehicleId, VehicleView,
    };

    use super::Session;

    /// Returns the vehicle occupying the addressed cell, if any.
    ///
    /// Cells outside the grid dimensions report [`GridError::OutOfBounds`].
    pub fn cell_occupant(
        session: &Session,
        cell: CellCoord,
    ) -> Result<Option<VehicleId>, GridError> {
        session.grid.occupant(cell)
    }

    /// Exposes a read-only view of the dense occupancy grid.
    #[must_use]
    pub fn occupancy_view(session: &Session) -> OccupancyView<'_> {
        let (columns, rows) = session.grid.dimensions();
        OccupancyView::new(session.grid.cells(), columns, rows)
    }

    /// Captures a read-only view of the vehicles in the lot.
    #[must_use]
    pub fn vehicle_view(session: &Session) -> VehicleView {
        VehicleView::from_snapshots(
            session
                .vehicles
                .iter()
                .map(|vehicle| vehicle.snapshot())
                .collect(),
        )
    }

    /// Provides the lot dimensions as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(session: &Session) -> (u32, u32) {
        session.grid.dimensions()
    }

    /// Retrieves the exit opening of the loaded level.
    #[must_use]
    pub fn exit(session: &Session) -> Exit {
        session.definition.exit
    }

    /// Identifier of the vehicle that must reach the exit.
    #[must_use]
    pub fn target_vehicle(session: &Session) -> VehicleId {
        session.target
    }
}

/// Number of committed moves in the current attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct StepCounter(u32);

impl StepCounter {
    fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    fn reset(&mut self) {
        self.0 = 0;
    }

    const fn get(self) -> u32 {
        self.0
    }
}

/// One successfully applied slide, retained for undo.
#[derive(Clone, Copy, Debug, PartialEq)]
struct AppliedMove {
    vehicle: VehicleId,
    direction: Direction,
    distance: u32,
}

fn span_fits(vehicle: &Vehicle, columns: u32, rows: u32) -> bool {
    let anchor = vehicle.anchor();
    let extent = vehicle.length().saturating_sub(1);
    match vehicle.orientation() {
        Orientation::Horizontal => {
            anchor.row() < rows
                && anchor
                    .column()
                    .checked_add(extent)
                    .map_or(false, |end| end < columns)
        }
        Orientation::Vertical => {
            anchor.column() < columns
                && anchor
                    .row()
                    .checked_add(extent)
                    .map_or(false, |end| end < rows)
        }
    }
}

fn exit_reachable(vehicle: &Vehicle, definition: &LevelDefinition) -> bool {
    if vehicle.orientation() != definition.exit.side().orientation() {
        return false;
    }
    match vehicle.orientation() {
        Orientation::Horizontal => vehicle.anchor().row() == definition.exit.lane(),
        Orientation::Vertical => vehicle.anchor().column() == definition.exit.lane(),
    }
}
