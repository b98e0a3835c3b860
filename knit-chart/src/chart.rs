//! A finished knitting chart and the edits allowed on it.

use std::ops::Range;

use crate::error::{ChartError, Result};
use crate::grid::{StitchGrid, Symbol};
use crate::pattern::Template;

/// Which half of a row is copied when mirroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorSource {
    /// Keep the left half, overwrite the right half with its reflection.
    Left,
    /// Keep the right half, overwrite the left half with its reflection.
    Right,
}

/// A stitch grid with no transient symbols in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    grid: StitchGrid,
}

impl Chart {
    /// Wrap a grid, refusing one that still carries derivation markers.
    pub fn from_grid(grid: StitchGrid) -> Result<Self> {
        if let Some(marker) = grid.iter_rows().flatten().find(|s| s.is_transient()) {
            return Err(ChartError::TransientSymbol(marker.name()));
        }
        Ok(Self { grid })
    }

    pub fn grid(&self) -> &StitchGrid {
        &self.grid
    }

    pub fn into_grid(self) -> StitchGrid {
        self.grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Symbol {
        self.grid.get(row, col)
    }

    pub fn to_codes(&self) -> Vec<Vec<i8>> {
        self.grid.to_codes()
    }

    /// Repeat `pattern` over the given rectangle, anchored at its top-left
    /// corner and cropped at the far edges.
    ///
    /// An empty range is a no-op. A range reaching past the chart, or a
    /// pattern containing markers, is rejected before anything is written.
    pub fn tile(&mut self, pattern: &Template, rows: Range<usize>, cols: Range<usize>) -> Result<()> {
        self.check_region(&rows, &cols)?;
        for r in 0..pattern.rows() {
            for c in 0..pattern.cols() {
                let symbol = pattern.get(r, c);
                if symbol.is_transient() {
                    return Err(ChartError::TransientSymbol(symbol.name()));
                }
            }
        }
        if rows.is_empty() || cols.is_empty() {
            return Ok(());
        }

        for row in rows.clone() {
            let pattern_row = (row - rows.start) % pattern.rows();
            for col in cols.clone() {
                let pattern_col = (col - cols.start) % pattern.cols();
                self.grid.set(row, col, pattern.get(pattern_row, pattern_col));
            }
        }
        Ok(())
    }

    /// Make each row in `rows` mirror-symmetric about the vertical centre.
    ///
    /// With an even column count the halves are `[0, n/2)` and `[n/2, n)`.
    /// With an odd count the centre column `n/2` belongs to neither half and
    /// is left alone.
    pub fn symmetrize_rows(&mut self, rows: Range<usize>, source: MirrorSource) -> Result<()> {
        self.check_region(&rows, &(0..self.cols()))?;
        let half = self.cols() / 2;
        let right_start = self.cols() - half;

        for row in rows {
            let cells = self.grid.row_mut(row);
            for k in 0..half {
                let left = half - 1 - k;
                let right = right_start + k;
                match source {
                    MirrorSource::Right => cells[left] = cells[right],
                    MirrorSource::Left => cells[right] = cells[left],
                }
            }
        }
        Ok(())
    }

    /// Turn plain stitches from `start_row` down into vertical stripes:
    /// even columns get `even`, odd columns get `odd`.
    ///
    /// Empty cells and shaping stitches keep their symbol, so the rib follows
    /// the outline. A start row past the last row changes nothing.
    pub fn replace_vertical_stripes_below(&mut self, start_row: usize, even: Symbol, odd: Symbol) -> Result<()> {
        for symbol in [even, odd] {
            if symbol.is_transient() {
                return Err(ChartError::TransientSymbol(symbol.name()));
            }
        }

        for row in start_row..self.rows() {
            for (col, cell) in self.grid.row_mut(row).iter_mut().enumerate() {
                if cell.is_plain() {
                    *cell = if col % 2 == 0 { even } else { odd };
                }
            }
        }
        Ok(())
    }

    fn check_region(&self, rows: &Range<usize>, cols: &Range<usize>) -> Result<()> {
        if rows.start > rows.end || rows.end > self.rows() || cols.start > cols.end || cols.end > self.cols() {
            return Err(ChartError::InvalidRegion {
                rows: rows.clone(),
                cols: cols.clone(),
                grid_rows: self.rows(),
                grid_cols: self.cols(),
            });
        }
        Ok(())
    }
}
