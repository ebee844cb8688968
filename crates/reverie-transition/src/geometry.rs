//! Occlusion geometry.
//!
//! Tiles: the viewport is divided into a grid of roughly 80px cells. Each
//! cell starts its animation after a delay proportional to `column + row`,
//! which sweeps a diagonal wave from the top-left corner. The viewport is
//! fully covered once the last cell has finished, i.e. at
//! `max_delay + duration`.

use std::time::Duration;

use reverie_core::viewport::Viewport;
use serde::Serialize;

/// Minimum number of tile columns.
pub const MIN_COLUMNS: u32 = 10;
/// Minimum number of tile rows.
pub const MIN_ROWS: u32 = 8;
/// Nominal cell edge in pixels.
pub const CELL_EDGE: f64 = 80.0;

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cells_along(extent: u32, minimum: u32) -> u32 {
    let fitted = (f64::from(extent) / CELL_EDGE).round() as u32;
    fitted.max(minimum)
}

/// One animated cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileCell {
    /// Zero-based column.
    pub column: u32,
    /// Zero-based row.
    pub row: u32,
    /// Animation start delay in milliseconds.
    pub delay_ms: f64,
}

/// Column/row layout of a tiles wipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileGrid {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
}

impl TileGrid {
    /// Creates a grid with explicit dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Derives the grid from the viewport size.
    ///
    /// Without a viewport the grid falls back to its minimum size.
    #[must_use]
    pub fn for_viewport(viewport: Option<Viewport>) -> Self {
        match viewport {
            Some(v) => Self::new(
                cells_along(v.width, MIN_COLUMNS),
                cells_along(v.height, MIN_ROWS),
            ),
            None => Self::new(MIN_COLUMNS, MIN_ROWS),
        }
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Start delay of the cell at (`column`, `row`) in milliseconds.
    #[must_use]
    pub fn wave_delay_ms(&self, column: u32, row: u32, duration: Duration) -> f64 {
        let step = millis(duration) / f64::from(self.cell_count().max(1));
        f64::from(column + row) * step
    }

    /// Every cell in row-major order with its wave delay.
    #[must_use]
    pub fn cells(&self, duration: Duration) -> Vec<TileCell> {
        (0..self.cell_count())
            .map(|i| {
                let (column, row) = (i % self.columns, i / self.columns);
                TileCell {
                    column,
                    row,
                    delay_ms: self.wave_delay_ms(column, row, duration),
                }
            })
            .collect()
    }

    /// Largest wave delay across all cells, in milliseconds.
    #[must_use]
    pub fn max_delay_ms(&self, duration: Duration) -> f64 {
        self.cells(duration)
            .iter()
            .map(|cell| cell.delay_ms)
            .fold(0.0, f64::max)
    }

    /// Time until every cell has finished: `ceil(max_delay + duration)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn occlusion_time(&self, duration: Duration) -> Duration {
        let total = (self.max_delay_ms(duration) + millis(duration)).ceil();
        Duration::from_millis(total as u64)
    }
}

/// Parameters of a circular wipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrisParams {
    /// Time for the circle to close completely.
    pub duration: Duration,
    /// Radius in pixels that fully uncovers the viewport.
    pub max_radius: f64,
}

impl IrisParams {
    /// Derives the parameters from the duration and viewport.
    #[must_use]
    pub fn new(duration: Duration, viewport: Option<Viewport>) -> Self {
        let max_radius = viewport.map_or(0.0, |v| {
            f64::from(v.width).hypot(f64::from(v.height)) / 2.0
        });
        Self {
            duration,
            max_radius,
        }
    }
}

/// What the occlusion surface has to build for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OcclusionPlan {
    /// A cell grid with per-cell delays.
    Tiles {
        /// Grid layout.
        grid: TileGrid,
        /// Cells in row-major order.
        cells: Vec<TileCell>,
        /// Per-cell animation duration.
        duration: Duration,
    },
    /// A single circular wipe.
    Iris(IrisParams),
}
