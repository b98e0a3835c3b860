//! Derive stitch symbols from an occupancy grid.
//!
//! The rasterizer only says which cells hold a stitch. This module works out
//! where the knitter binds off, decreases and increases, using a fixed
//! sequence of template passes:
//!
//! 1. pick which row parity carries right- and left-leaning shaping;
//! 2. seed transient markers at the corners of each step in the outline;
//! 3. spread markers sideways through empty cells, then turn them into knits;
//! 4. add an empty row on top;
//! 5. bind off the last stitch of every column;
//! 6. merge a bind-off with its live neighbour into a decrease;
//! 7. mark increases where a row widens.
//!
//! Each pass matches against the grid as it stood when the pass began.

use log::{debug, warn};

use crate::chart::Chart;
use crate::error::{ChartError, Result};
use crate::grid::{StitchGrid, Symbol};
use crate::pattern::{Stamp, Template, replace, replace_all};

use crate::grid::Symbol::{BindOff as BO, Empty as E, Knit as K, MarkerLeft as ML, MarkerRight as MR};

/// Shaping lines alternate every two rows.
pub const SEED_ROW_STRIDE: usize = 2;

/// First row of each shaping parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRows {
    /// Rows carrying right-leaning shaping markers.
    pub right_leaning: usize,
    /// Rows carrying left-leaning shaping markers.
    pub left_leaning: usize,
}

/// Parity assignment for a grid of `num_rows` rows.
///
/// Counted from the top, so the parity flips with the row count to keep the
/// shaping rows fixed relative to the cast-on edge at the bottom.
pub fn seed_rows(num_rows: usize) -> SeedRows {
    if num_rows % 2 == 0 {
        SeedRows { right_leaning: 1, left_leaning: 0 }
    } else {
        SeedRows { right_leaning: 0, left_leaning: 1 }
    }
}

/// Seed transient markers above the outer corner of each step.
///
/// Returns how many right- and left-leaning markers were placed.
pub fn seed_markers(grid: &mut StitchGrid) -> Result<(usize, usize)> {
    let rows = seed_rows(grid.rows());

    let right = replace(
        grid,
        &Template::new(vec![vec![E, E], vec![E, K]])?,
        Stamp { at: (0, 1), with: MR },
        rows.right_leaning,
        SEED_ROW_STRIDE,
    )?;
    let left = replace(
        grid,
        &Template::new(vec![vec![E, E], vec![K, E]])?,
        Stamp { at: (0, 0), with: ML },
        rows.left_leaning,
        SEED_ROW_STRIDE,
    )?;

    debug!("seeded {right} right-leaning and {left} left-leaning markers");
    Ok((right, left))
}

/// Outcome of [`propagate_markers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Propagation {
    /// Full passes run, including the last one that changed nothing.
    pub iterations: usize,
    /// False when the iteration cap stopped the loop first.
    pub converged: bool,
}

/// Spread markers through runs of empty cells until nothing changes:
/// right-leaning markers grow rightward, left-leaning ones leftward.
///
/// A run of empty cells is shorter than the row, so `max(rows, cols)` passes
/// always reach the fixed point; the cap only guards against a bug.
pub fn propagate_markers(grid: &mut StitchGrid) -> Result<Propagation> {
    let grow_right = Template::row(&[MR, E])?;
    let grow_left = Template::row(&[E, ML])?;
    let cap = grid.rows().max(grid.cols());

    for iteration in 1..=cap {
        let changed = replace_all(grid, &grow_right, Stamp { at: (0, 1), with: MR })?
            + replace_all(grid, &grow_left, Stamp { at: (0, 0), with: ML })?;
        if changed == 0 {
            debug!("marker propagation settled after {iteration} passes");
            return Ok(Propagation { iterations: iteration, converged: true });
        }
    }

    warn!("marker propagation stopped at the cap of {cap} passes without settling");
    Ok(Propagation { iterations: cap, converged: false })
}

/// Turn every transient marker back into a plain knit stitch.
pub fn collapse_markers(grid: &mut StitchGrid) {
    grid.replace_symbol(MR, K);
    grid.replace_symbol(ML, K);
}

/// Bind off every stitch with nothing above it. Expects the empty top row
/// to be in place so the first row of knitting is covered too.
pub fn stamp_bind_offs(grid: &mut StitchGrid) -> Result<usize> {
    replace_all(grid, &Template::column(&[E, K])?, Stamp { at: (1, 0), with: BO })
}

/// Merge bind-offs with the live stitch beside them.
///
/// Returns the number of right-leaning (k2tog) and left-leaning (ssk)
/// decreases.
pub fn stamp_decreases(grid: &mut StitchGrid) -> Result<(usize, usize)> {
    let k2tog = replace_all(grid, &Template::row(&[K, BO])?, Stamp { at: (0, 1), with: Symbol::K2tog })?;
    let ssk = replace_all(grid, &Template::row(&[BO, K])?, Stamp { at: (0, 0), with: Symbol::Ssk })?;
    Ok((k2tog, ssk))
}

/// Mark a make-one wherever a row is one stitch wider than the row below.
pub fn stamp_increases(grid: &mut StitchGrid) -> Result<usize> {
    let left = replace_all(
        grid,
        &Template::new(vec![vec![K, K], vec![K, E]])?,
        Stamp { at: (0, 0), with: Symbol::MakeOne },
    )?;
    let right = replace_all(
        grid,
        &Template::new(vec![vec![K, K], vec![E, K]])?,
        Stamp { at: (0, 1), with: Symbol::MakeOne },
    )?;
    Ok(left + right)
}

/// Run every pass in order and return the finished chart.
///
/// The occupancy grid must be at least 2x2 so every template fits.
pub fn derive_symbols(occupancy: StitchGrid) -> Result<Chart> {
    let mut grid = occupancy;
    if grid.rows() < 2 || grid.cols() < 2 {
        return Err(ChartError::GridTooSmall { rows: grid.rows(), cols: grid.cols() });
    }

    seed_markers(&mut grid)?;
    propagate_markers(&mut grid)?;
    collapse_markers(&mut grid);

    grid.insert_row_at_top(E);

    let bind_offs = stamp_bind_offs(&mut grid)?;
    let (k2tog, ssk) = stamp_decreases(&mut grid)?;
    let increases = stamp_increases(&mut grid)?;
    debug!(
        "symbols: {bind_offs} bind-offs ({k2tog} k2tog, {ssk} ssk after merging), {increases} increases"
    );

    Chart::from_grid(grid)
}
