//! Dense cell-occupancy storage for the parking lot.

use parking_panic_core::{CellCoord, GridError, VehicleId};

use crate::vehicles::Vehicle;

/// Row-major occupancy of the lot; each cell holds at most one vehicle.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct OccupancyGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<VehicleId>>,
}

impl OccupancyGrid {
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    /// Vehicle holding the addressed cell, or `None` for an empty cell.
    pub(crate) fn occupant(&self, cell: CellCoord) -> Result<Option<VehicleId>, GridError> {
        let index = self.index(cell).ok_or(GridError::OutOfBounds { cell })?;
        Ok(self.cells.get(index).copied().flatten())
    }

    /// Marks every cell of the vehicle's span as held by it.
    ///
    /// The whole span is validated before any cell is written, so a rejected
    /// placement leaves the grid untouched. Cells already held by the same
    /// vehicle are accepted; only a different occupant is an overlap.
    pub(crate) fn place(&mut self, vehicle: &Vehicle) -> Result<(), GridError> {
        for cell in vehicle.span() {
            let index = self.index(cell).ok_or(GridError::OutOfBounds { cell })?;
            if let Some(occupant) = self.cells.get(index).copied().flatten() {
                if occupant != vehicle.id() {
                    return Err(GridError::Overlap { cell, occupant });
                }
            }
        }
        for cell in vehicle.span() {
            if let Some(slot) = self.slot_mut(cell) {
                *slot = Some(vehicle.id());
            }
        }
        Ok(())
    }

    /// Empties every cell of the vehicle's span.
    ///
    /// Fails if the vehicle does not currently hold its full span.
    pub(crate) fn clear(&mut self, vehicle: &Vehicle) -> Result<(), GridError> {
        for cell in vehicle.span() {
            let held = self
                .index(cell)
                .and_then(|index| self.cells.get(index).copied().flatten());
            if held != Some(vehicle.id()) {
                return Err(GridError::Vacant {
                    vehicle: vehicle.id(),
                });
            }
        }
        for cell in vehicle.span() {
            if let Some(slot) = self.slot_mut(cell) {
                *slot = None;
            }
        }
        Ok(())
    }

    /// Rebuilds the occupancy from scratch for the provided vehicles.
    pub(crate) fn fill_with(&mut self, vehicles: &[Vehicle]) {
        self.cells.fill(None);
        for vehicle in vehicles {
            for cell in vehicle.span() {
                if let Some(slot) = self.slot_mut(cell) {
                    *slot = Some(vehicle.id());
                }
            }
        }
    }

    pub(crate) fn cells(&self) -> &[Option<VehicleId>] {
        &self.cells
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn slot_mut(&mut self, cell: CellCoord) -> Option<&mut Option<VehicleId>> {
        let index = self.index(cell)?;
        self.cells.get_mut(index)
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
