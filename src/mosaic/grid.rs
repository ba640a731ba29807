//! Grid partitioning of the source image into equally sized cells
//!
//! Cell size is the floor of the image size divided by the grid size, so pixels
//! on the right and bottom borders that do not fill a whole cell are left out.
//! Cells are produced in column-major order: the cell in column `i` and row `j`
//! has index `i * rows + j`.

use std::fmt;
use std::str::FromStr;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{MosaicError, Result, invalid_parameter};

/// Axis-aligned cell rectangle in source pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Minimum `[x, y]` corner (inclusive)
    pub min: [u32; 2],
    /// Maximum `[x, y]` corner (exclusive)
    pub max: [u32; 2],
}

impl Cell {
    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.max[0].saturating_sub(self.min[0])
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.max[1].saturating_sub(self.min[1])
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Check whether the cell lies inside an image of the given size
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.min[0] <= self.max[0]
            && self.min[1] <= self.max[1]
            && self.max[0] <= width
            && self.max[1] <= height
    }

    /// Check whether two cells share any pixel
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.min[0] < other.max[0]
            && other.min[0] < self.max[0]
            && self.min[1] < other.max[1]
            && other.min[1] < self.max[1]
    }

    pub(crate) const fn as_region(&self) -> [u32; 4] {
        [self.min[0], self.min[1], self.max[0], self.max[1]]
    }
}

/// Requested grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    /// Number of cells across
    pub columns: u32,
    /// Number of cells down
    pub rows: u32,
}

impl GridSize {
    /// Create a grid size, rejecting zero or oversized dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds
    /// [`MAX_GRID_DIMENSION`]
    pub fn new(columns: u32, rows: u32) -> Result<Self> {
        for (parameter, value) in [("columns", columns), ("rows", rows)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Cell size for an image of the given dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has a zero dimension, or if the grid is
    /// finer than the image so a cell would be zero pixels wide or tall
    pub fn cell_size(&self, width: u32, height: u32) -> Result<(u32, u32)> {
        if self.columns == 0 || self.rows == 0 {
            return Err(invalid_parameter(
                "grid",
                self,
                &"columns and rows must be positive",
            ));
        }

        let cell_width = width / self.columns;
        let cell_height = height / self.rows;
        if cell_width == 0 || cell_height == 0 {
            return Err(MosaicError::DegenerateGrid {
                grid: (self.columns, self.rows),
                dimensions: (width, height),
            });
        }

        Ok((cell_width, cell_height))
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.columns, self.rows)
    }
}

impl FromStr for GridSize {
    type Err = MosaicError;

    /// Parse `"cols,rows"`
    fn from_str(s: &str) -> Result<Self> {
        let (columns, rows) = s
            .split_once(',')
            .ok_or_else(|| invalid_parameter("grid", &s, &"expected \"cols,rows\""))?;

        let parse = |parameter: &'static str, text: &str| {
            text.trim()
                .parse::<u32>()
                .map_err(|e| invalid_parameter(parameter, &text, &e))
        };

        Self::new(parse("columns", columns)?, parse("rows", rows)?)
    }
}

/// Split an image of the given size into column-major cells
///
/// # Errors
///
/// Returns an error if the grid cannot produce non-empty cells for this image
pub fn partition(width: u32, height: u32, grid: GridSize) -> Result<Vec<Cell>> {
    let (cell_width, cell_height) = grid.cell_size(width, height)?;

    let mut cells = Vec::with_capacity(grid.cell_count());
    for i in 0..grid.columns {
        for j in 0..grid.rows {
            cells.push(Cell {
                min: [i * cell_width, j * cell_height],
                max: [(i + 1) * cell_width, (j + 1) * cell_height],
            });
        }
    }

    Ok(cells)
}
