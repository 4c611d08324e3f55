//! Vehicle state and span arithmetic.

use parking_panic_core::{
    CellCoord, Direction, Orientation, VehicleId, VehicleSnapshot, VehicleSpec,
};

/// A single car or truck parked in the lot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Vehicle {
    id: VehicleId,
    orientation: Orientation,
    length: u32,
    anchor: CellCoord,
    is_target: bool,
}

impl Vehicle {
    pub(crate) fn from_spec(spec: &VehicleSpec) -> Self {
        Self {
            id: spec.id,
            orientation: spec.orientation,
            length: spec.length,
            anchor: spec.anchor,
            is_target: spec.is_target,
        }
    }

    pub(crate) const fn id(&self) -> VehicleId {
        self.id
    }

    pub(crate) const fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub(crate) const fn length(&self) -> u32 {
        self.length
    }

    pub(crate) const fn anchor(&self) -> CellCoord {
        self.anchor
    }

    #[allow(dead_code)]
    pub(crate) const fn is_target(&self) -> bool {
        self.is_target
    }

    /// Cells the vehicle currently occupies, anchor first.
    pub(crate) fn span(&self) -> SpanCells {
        SpanCells {
            anchor: self.anchor,
            orientation: self.orientation,
            length: self.length,
            cursor: 0,
        }
    }

    /// Cell at the vehicle's front edge for a slide in the given direction.
    pub(crate) fn leading_cell(&self, direction: Direction) -> CellCoord {
        let extent = self.length.saturating_sub(1);
        match direction {
            Direction::North | Direction::West => self.anchor,
            Direction::East => CellCoord::new(
                self.anchor.column().saturating_add(extent),
                self.anchor.row(),
            ),
            Direction::South => CellCoord::new(
                self.anchor.column(),
                self.anchor.row().saturating_add(extent),
            ),
        }
    }

    /// Anchor after sliding `distance` cells, if it stays representable.
    pub(crate) fn shifted_anchor(&self, direction: Direction, distance: u32) -> Option<CellCoord> {
        shift_cell(self.anchor, direction, distance)
    }

    pub(crate) fn relocate(&mut self, anchor: CellCoord) {
        self.anchor = anchor;
    }

    pub(crate) fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            orientation: self.orientation,
            length: self.length,
            anchor: self.anchor,
            is_target: self.is_target,
        }
    }
}

/// Shifts a cell `distance` cells toward `direction` without wrapping.
pub(crate) fn shift_cell(cell: CellCoord, direction: Direction, distance: u32) -> Option<CellCoord> {
    match direction {
        Direction::North => cell
            .row()
            .checked_sub(distance)
            .map(|row| CellCoord::new(cell.column(), row)),
        Direction::South => cell
            .row()
            .checked_add(distance)
            .map(|row| CellCoord::new(cell.column(), row)),
        Direction::East => cell
            .column()
            .checked_add(distance)
            .map(|column| CellCoord::new(column, cell.row())),
        Direction::West => cell
            .column()
            .checked_sub(distance)
            .map(|column| CellCoord::new(column, cell.row())),
    }
}

/// Iterator over the cells of a vehicle's span.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SpanCells {
    anchor: CellCoord,
    orientation: Orientation,
    length: u32,
    cursor: u32,
}

impl Iterator for SpanCells {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.length {
            return None;
        }
        let offset = self.cursor;
        self.cursor += 1;
        Some(match self.orientation {
            Orientation::Horizontal => CellCoord::new(
                self.anchor.column().saturating_add(offset),
                self.anchor.row(),
            ),
            Orientation::Vertical => CellCoord::new(
                self.anchor.column(),
                self.anchor.row().saturating_add(offset),
            ),
        })
    }
}
