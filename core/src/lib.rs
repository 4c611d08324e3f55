#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Parking Panic engine.
//!
//! This crate defines the vocabulary that connects the authoritative session
//! state with its adapters: coordinates, vehicle descriptions, the level
//! definition consumed by the loader, the error enums every fallible
//! operation reports through, and the read-only view types adapters use to
//! render the lot. Adapters never mutate grid or vehicle state directly;
//! they call into the session and query these views.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Parking Panic.";

/// Unique identifier assigned to a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(u32);

impl VehicleId {
    /// Creates a new vehicle identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Axis along which a vehicle is laid out and permitted to slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// The vehicle spans consecutive columns and slides east or west.
    Horizontal,
    /// The vehicle spans consecutive rows and slides north or south.
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

/// Cardinal directions a slide may be requested in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Axis a slide in this direction travels along.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::East | Self::West => Orientation::Horizontal,
            Self::North | Self::South => Orientation::Vertical,
        }
    }

    /// The direction that undoes a slide in this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        })
    }
}

/// Opening in the lot wall the target vehicle must reach.
///
/// The exit sits on one side of the grid at a fixed lane: the lane is a row
/// index when the side is east or west, and a column index otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exit {
    side: Direction,
    lane: u32,
}

impl Exit {
    /// Creates an exit on the provided side of the grid at the given lane.
    #[must_use]
    pub const fn new(side: Direction, lane: u32) -> Self {
        Self { side, lane }
    }

    /// Side of the grid the opening is carved into.
    #[must_use]
    pub const fn side(&self) -> Direction {
        self.side
    }

    /// Row (east/west exits) or column (north/south exits) of the opening.
    #[must_use]
    pub const fn lane(&self) -> u32 {
        self.lane
    }
}

/// Description of one vehicle within a level definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleSpec {
    /// Identifier the session will know the vehicle by.
    pub id: VehicleId,
    /// Axis the vehicle is laid out along.
    pub orientation: Orientation,
    /// Number of cells the vehicle occupies, at least two.
    pub length: u32,
    /// Top-left occupied cell; the span extends along the orientation axis.
    pub anchor: CellCoord,
    /// Marks the single vehicle that must reach the exit.
    pub is_target: bool,
}

/// Static input data describing a level's initial layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Number of columns in the lot grid.
    pub columns: u32,
    /// Number of rows in the lot grid.
    pub rows: u32,
    /// Opening the target vehicle must reach.
    pub exit: Exit,
    /// Initial vehicle layout; exactly one entry carries the target flag.
    pub vehicles: Vec<VehicleSpec>,
}

/// Immutable representation of a single vehicle's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VehicleSnapshot {
    /// Unique identifier assigned to the vehicle.
    pub id: VehicleId,
    /// Axis the vehicle is laid out along.
    pub orientation: Orientation,
    /// Number of cells the vehicle occupies.
    pub length: u32,
    /// Top-left occupied cell at the time of the snapshot.
    pub anchor: CellCoord,
    /// Whether this vehicle is the one that must reach the exit.
    pub is_target: bool,
}

/// Read-only snapshot describing every vehicle in the lot.
#[derive(Clone, Debug, Default)]
pub struct VehicleView {
    snapshots: Vec<VehicleSnapshot>,
}

impl VehicleView {
    /// Creates a new vehicle view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<VehicleSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &VehicleSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot for a specific vehicle.
    #[must_use]
    pub fn get(&self, id: VehicleId) -> Option<&VehicleSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<VehicleSnapshot> {
        self.snapshots
    }
}

/// Read-only view into the dense occupancy grid.
#[derive(Clone, Copy, Debug)]
pub struct OccupancyView<'a> {
    cells: &'a [Option<VehicleId>],
    columns: u32,
    rows: u32,
}

impl<'a> OccupancyView<'a> {
    /// Captures a new occupancy view backed by the provided cell slice.
    #[must_use]
    pub fn new(cells: &'a [Option<VehicleId>], columns: u32, rows: u32) -> Self {
        Self {
            cells,
            columns,
            rows,
        }
    }

    /// Returns the vehicle occupying the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<VehicleId> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Reports whether the cell is currently empty.
    #[must_use]
    pub fn is_free(&self, cell: CellCoord) -> bool {
        self.index(cell).map_or(true, |index| {
            self.cells.get(index).copied().unwrap_or(None).is_none()
        })
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Option<VehicleId>> + 'a {
        self.cells.iter().copied()
    }

    /// Provides the dimensions of the underlying occupancy grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Errors surfaced by the occupancy grid primitives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum GridError {
    /// The addressed cell lies outside the grid dimensions.
    #[error("cell {cell} is outside the lot")]
    OutOfBounds {
        /// Cell that fell outside the grid.
        cell: CellCoord,
    },
    /// A placement touched a cell already held by another vehicle.
    #[error("cell {cell} is already occupied by vehicle {occupant}")]
    Overlap {
        /// Cell both vehicles claimed.
        cell: CellCoord,
        /// Vehicle currently holding the cell.
        occupant: VehicleId,
    },
    /// A clear was requested for a vehicle that is not on the grid.
    #[error("vehicle {vehicle} is not placed on the grid")]
    Vacant {
        /// Vehicle that was expected on the grid.
        vehicle: VehicleId,
    },
}

/// Reasons a requested slide may be rejected by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum MoveError {
    /// No vehicle with the requested identifier exists in the session.
    #[error("vehicle {vehicle} does not exist")]
    UnknownVehicle {
        /// Identifier that matched no vehicle.
        vehicle: VehicleId,
    },
    /// A slide of zero cells was requested.
    #[error("slide distance must be at least one cell")]
    ZeroDistance,
    /// The requested direction is perpendicular to the vehicle's orientation.
    #[error("a {orientation} vehicle cannot slide {direction}")]
    InvalidDirection {
        /// Orientation of the vehicle the slide was requested for.
        orientation: Orientation,
        /// Direction the slide was requested in.
        direction: Direction,
    },
    /// The destination span would leave the grid.
    #[error("slide would leave the lot")]
    OutOfBounds,
    /// Another vehicle occupies a cell on the slide path.
    #[error("path is blocked by vehicle {vehicle}")]
    Blocked {
        /// First vehicle found blocking the path.
        vehicle: VehicleId,
    },
    /// An undo was requested with an empty move history.
    #[error("no moves to undo")]
    NothingToUndo,
}

impl From<GridError> for MoveError {
    fn from(error: GridError) -> Self {
        match error {
            GridError::OutOfBounds { .. } => Self::OutOfBounds,
            GridError::Overlap { occupant, .. } => Self::Blocked { vehicle: occupant },
            GridError::Vacant { vehicle } => Self::UnknownVehicle { vehicle },
        }
    }
}

/// Reasons a level definition may be rejected by the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum LevelError {
    /// The grid was declared with a zero column or row count.
    #[error("grid dimensions must be positive")]
    ZeroDimension,
    /// The exit lane does not fit the declared grid dimensions.
    #[error("exit lane {lane} is outside the grid")]
    ExitOutOfRange {
        /// Lane index that fell outside the grid.
        lane: u32,
    },
    /// No vehicle carried the target flag.
    #[error("no vehicle is flagged as the target")]
    NoTarget,
    /// More than one vehicle carried the target flag.
    #[error("vehicles {first} and {second} are both flagged as the target")]
    MultipleTargets {
        /// First vehicle found carrying the flag.
        first: VehicleId,
        /// Second vehicle found carrying the flag.
        second: VehicleId,
    },
    /// The same identifier was declared for two vehicles.
    #[error("vehicle {vehicle} is declared twice")]
    DuplicateVehicle {
        /// Identifier that appeared more than once.
        vehicle: VehicleId,
    },
    /// A vehicle was declared shorter than two cells.
    #[error("vehicle {vehicle} is shorter than two cells")]
    VehicleTooShort {
        /// Vehicle with the invalid length.
        vehicle: VehicleId,
    },
    /// A vehicle's span extends beyond the grid bounds.
    #[error("vehicle {vehicle} extends outside the lot")]
    VehicleOutOfBounds {
        /// Vehicle whose span left the grid.
        vehicle: VehicleId,
    },
    /// Two vehicles claimed the same cell in the initial layout.
    #[error("vehicles {first} and {second} overlap at {cell}")]
    VehicleOverlap {
        /// Vehicle placed first.
        first: VehicleId,
        /// Vehicle whose placement collided.
        second: VehicleId,
        /// Cell both vehicles claimed.
        cell: CellCoord,
    },
    /// The target vehicle's axis or lane can never reach the exit.
    #[error("target vehicle {vehicle} can never reach the exit lane")]
    ExitMisaligned {
        /// Vehicle carrying the target flag.
        vehicle: VehicleId,
    },
}
