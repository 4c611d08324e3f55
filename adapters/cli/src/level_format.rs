//! Parser for the compact level catalog text format.
//!
//! A catalog is a plain text file: the first line holds the number of
//! levels, and each level contributes a vehicle-count line followed by one
//! four-character record per vehicle. A record encodes the orientation
//! letter (`H`/`V`), the 1-based anchor column, the 1-based anchor row, and
//! the vehicle length, e.g. `H132`. The first record of every level is the
//! target car. Every catalog lot shares the same geometry: a 6x6 grid with
//! the exit carved into the east wall of the third row.

use std::{error::Error, fmt};

use parking_panic_core::{
    CellCoord, Direction, Exit, LevelDefinition, Orientation, VehicleId, VehicleSpec,
};

/// Columns and rows of every lot described by the catalog format.
const GRID_SIZE: u32 = 6;
/// Exit opening shared by every catalog level.
const EXIT: Exit = Exit::new(Direction::East, 2);

/// Parses a whole catalog into level definitions.
pub(crate) fn parse_catalog(input: &str) -> Result<Vec<LevelDefinition>, CatalogError> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());
    let count_line = lines.next().ok_or(CatalogError::EmptyCatalog)?;
    let level_count = parse_count(count_line)?;

    let mut levels = Vec::with_capacity(level_count);
    for level in 1..=level_count {
        let vehicle_count = match lines.next() {
            Some(line) => parse_count(line)?,
            None => return Err(CatalogError::MissingRecords { level }),
        };
        let mut vehicles = Vec::with_capacity(vehicle_count);
        for index in 0..vehicle_count {
            let record = lines.next().ok_or(CatalogError::MissingRecords { level })?;
            vehicles.push(parse_record(record, index)?);
        }
        levels.push(LevelDefinition {
            columns: GRID_SIZE,
            rows: GRID_SIZE,
            exit: EXIT,
            vehicles,
        });
    }
    Ok(levels)
}

/// Retrieves the 1-based `level` from a parsed catalog.
pub(crate) fn select_level(
    levels: &[LevelDefinition],
    level: usize,
) -> Result<&LevelDefinition, CatalogError> {
    if level == 0 || level > levels.len() {
        return Err(CatalogError::UnknownLevel {
            level,
            available: levels.len(),
        });
    }
    Ok(&levels[level - 1])
}

fn parse_count(line: &str) -> Result<usize, CatalogError> {
    line.parse::<usize>()
        .map_err(|_| CatalogError::InvalidCount(line.to_owned()))
}

fn parse_record(record: &str, index: usize) -> Result<VehicleSpec, CatalogError> {
    let mut chars = record.chars();
    let (Some(axis), Some(column), Some(row), Some(length), None) = (
        chars.next(),
        chars.next(),
        chars.next(),
        chars.next(),
        chars.next(),
    ) else {
        return Err(CatalogError::MalformedRecord(record.to_owned()));
    };

    let orientation = match axis {
        'H' => Orientation::Horizontal,
        'V' => Orientation::Vertical,
        other => return Err(CatalogError::InvalidOrientation(other)),
    };
    let column = digit(column)?
        .checked_sub(1)
        .ok_or_else(|| CatalogError::MalformedRecord(record.to_owned()))?;
    let row = digit(row)?
        .checked_sub(1)
        .ok_or_else(|| CatalogError::MalformedRecord(record.to_owned()))?;
    let length = digit(length)?;

    Ok(VehicleSpec {
        id: VehicleId::new(index as u32),
        orientation,
        length,
        anchor: CellCoord::new(column, row),
        is_target: index == 0,
    })
}

fn digit(value: char) -> Result<u32, CatalogError> {
    value.to_digit(10).ok_or(CatalogError::InvalidDigit(value))
}

/// Errors that can occur while reading a level catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CatalogError {
    /// The catalog was empty or contained only whitespace.
    EmptyCatalog,
    /// A level or vehicle count line could not be parsed.
    InvalidCount(String),
    /// The catalog ended before every declared record was read.
    MissingRecords {
        /// 1-based level the catalog ended inside.
        level: usize,
    },
    /// A vehicle record did not have the expected four characters.
    MalformedRecord(String),
    /// A record declared an orientation other than `H` or `V`.
    InvalidOrientation(char),
    /// A record carried a non-digit coordinate or length.
    InvalidDigit(char),
    /// A requested level number is not present in the catalog.
    UnknownLevel {
        /// 1-based level that was requested.
        level: usize,
        /// Number of levels the catalog actually holds.
        available: usize,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "level catalog was empty"),
            Self::InvalidCount(line) => write!(f, "could not parse count line '{line}'"),
            Self::MissingRecords { level } => write!(f, "catalog ended inside level {level}"),
            Self::MalformedRecord(record) => write!(f, "vehicle record '{record}' is malformed"),
            Self::InvalidOrientation(axis) => write!(f, "orientation '{axis}' is not 'H' or 'V'"),
            Self::InvalidDigit(value) => write!(f, "'{value}' is not a digit"),
            Self::UnknownLevel { level, available } => {
                write!(f, "level {level} is not in the catalog ({available} available)")
            }
        }
    }
}

impl Error for CatalogError {}
