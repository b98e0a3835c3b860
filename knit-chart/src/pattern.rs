//! Sliding-window find-and-stamp over a stitch grid.
//!
//! Every symbol pass works the same way: slide a small template over the
//! grid, and wherever all of its cells match exactly, overwrite one chosen
//! cell. Matches are collected against the grid as it was when the call
//! started and written afterwards, so overlapping matches never see each
//! other's edits.

use crate::error::{ChartError, Result};
use crate::grid::{StitchGrid, Symbol};

/// A small rectangle of symbols to look for. Every cell must match; there
/// is no wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    cells: StitchGrid,
}

impl Template {
    /// Build a template from rows. Must be rectangular and non-empty.
    pub fn new(rows: Vec<Vec<Symbol>>) -> Result<Self> {
        let cells = StitchGrid::from_rows(rows)
            .map_err(|e| ChartError::InvalidTemplate(e.to_string()))?;
        if cells.rows() == 0 || cells.cols() == 0 {
            return Err(ChartError::InvalidTemplate("template has no cells".to_string()));
        }
        Ok(Self { cells })
    }

    /// One-row template.
    pub fn row(symbols: &[Symbol]) -> Result<Self> {
        Self::new(vec![symbols.to_vec()])
    }

    /// One-column template, top to bottom.
    pub fn column(symbols: &[Symbol]) -> Result<Self> {
        Self::new(symbols.iter().map(|&s| vec![s]).collect())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Symbol {
        self.cells.get(row, col)
    }

    fn matches_at(&self, grid: &StitchGrid, top: usize, left: usize) -> bool {
        (0..self.rows()).all(|r| {
            let window = &grid.row(top + r)[left..left + self.cols()];
            window == self.cells.row(r)
        })
    }
}

/// Where to search and what to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    /// `(row, col)` inside the template whose grid cell is overwritten.
    pub at: (usize, usize),
    /// Symbol written on every match.
    pub with: Symbol,
}

/// Find every occurrence of `template` and stamp `stamp.with` into the cell
/// under `stamp.at`.
///
/// Only windows whose top row is `start_row`, `start_row + row_stride`, ...
/// are tested; every column offset is. Returns the number of matches.
///
/// A template larger than the grid is a caller bug and fails fast. A
/// `start_row` past the last row where the template fits is a no-op.
pub fn replace(
    grid: &mut StitchGrid,
    template: &Template,
    stamp: Stamp,
    start_row: usize,
    row_stride: usize,
) -> Result<usize> {
    let (at_row, at_col) = stamp.at;
    if at_row >= template.rows() || at_col >= template.cols() {
        return Err(ChartError::InvalidTemplate(format!(
            "stamp position ({at_row}, {at_col}) is outside a {}x{} template",
            template.rows(),
            template.cols()
        )));
    }
    if row_stride == 0 {
        return Err(ChartError::InvalidStride);
    }
    if template.rows() > grid.rows() || template.cols() > grid.cols() {
        return Err(ChartError::TemplateDoesNotFit {
            template_rows: template.rows(),
            template_cols: template.cols(),
            grid_rows: grid.rows(),
            grid_cols: grid.cols(),
        });
    }

    let last_row = grid.rows() - template.rows();
    if start_row > last_row {
        return Ok(0);
    }
    let last_col = grid.cols() - template.cols();

    // Read-only pass: collect every hit against the untouched grid.
    let snapshot: &StitchGrid = grid;
    let hits: Vec<(usize, usize)> = (start_row..=last_row)
        .step_by(row_stride)
        .flat_map(|top| (0..=last_col).map(move |left| (top, left)))
        .filter(|&(top, left)| template.matches_at(snapshot, top, left))
        .collect();

    // Write pass onto a separate copy.
    let mut result = grid.clone();
    for &(top, left) in &hits {
        result.set(top + at_row, left + at_col, stamp.with);
    }
    *grid = result;

    Ok(hits.len())
}

/// [`replace`] over every row.
pub fn replace_all(grid: &mut StitchGrid, template: &Template, stamp: Stamp) -> Result<usize> {
    replace(grid, template, stamp, 0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Symbol::{Empty as E, Knit as K};

    fn grid(codes: &[&[i64]]) -> StitchGrid {
        StitchGrid::from_codes(codes).unwrap()
    }

    #[test]
    fn stamps_every_match() {
        let mut g = grid(&[&[1, 0, 1, 0], &[0, 0, 1, 0]]);
        let template = Template::row(&[K, E]).unwrap();
        let n = replace_all(&mut g, &template, Stamp { at: (0, 1), with: Symbol::BindOff }).unwrap();
        assert_eq!(n, 3);
        assert_eq!(g.to_codes(), vec![vec![1, 60, 1, 60], vec![0, 0, 1, 60]]);
    }

    #[test]
    fn non_overlapping_matches_each_stamp_once() {
        // Four separate 2x2 blocks; the template matches each exactly once.
        let mut g = grid(&[
            &[1, 1, 0, 1, 1, 0],
            &[1, 1, 0, 1, 1, 0],
            &[0, 0, 0, 0, 0, 0],
            &[1, 1, 0, 1, 1, 0],
            &[1, 1, 0, 1, 1, 0],
        ]);
        let template = Template::new(vec![vec![K, K], vec![K, K]]).unwrap();
        let n = replace_all(&mut g, &template, Stamp { at: (1, 1), with: Symbol::Purl }).unwrap();
        assert_eq!(n, 4);
        assert_eq!(g.count(Symbol::Purl), 4);
    }

    #[test]
    fn overlapping_matches_read_the_snapshot() {
        // [K, K] matches at columns 0, 1 and 2. Stamping Empty into the
        // right cell must not stop the later matches from being seen.
        let mut g = grid(&[&[1, 1, 1, 1]]);
        let template = Template::row(&[K, K]).unwrap();
        let n = replace_all(&mut g, &template, Stamp { at: (0, 1), with: E }).unwrap();
        assert_eq!(n, 3);
        assert_eq!(g.to_codes(), vec![vec![1, 0, 0, 0]]);
    }

    #[test]
    fn respects_start_row_and_stride() {
        let mut g = grid(&[&[1], &[1], &[1], &[1], &[1]]);
        let template = Template::column(&[K]).unwrap();
        let n = replace(&mut g, &template, Stamp { at: (0, 0), with: Symbol::Purl }, 1, 2).unwrap();
        assert_eq!(n, 2);
        assert_eq!(g.to_codes(), vec![vec![1], vec![-1], vec![1], vec![-1], vec![1]]);
    }

    #[test]
    fn start_row_past_grid_is_noop() {
        let mut g = grid(&[&[0, 1], &[1, 1]]);
        let before = g.clone();
        let template = Template::column(&[E, K]).unwrap();
        let n = replace(&mut g, &template, Stamp { at: (1, 0), with: Symbol::BindOff }, 1, 1).unwrap();
        assert_eq!(n, 0);
        assert_eq!(g, before);
    }

    #[test]
    fn template_larger_than_grid_fails_fast() {
        let mut g = grid(&[&[0, 1]]);
        let template = Template::column(&[E, K]).unwrap();
        let err = replace_all(&mut g, &template, Stamp { at: (0, 0), with: K }).unwrap_err();
        assert!(matches!(err, ChartError::TemplateDoesNotFit { template_rows: 2, grid_rows: 1, .. }));
    }

    #[test]
    fn rejects_bad_arguments() {
        let mut g = grid(&[&[0, 1], &[1, 1]]);
        let template = Template::row(&[E, K]).unwrap();
        assert!(matches!(
            replace_all(&mut g, &template, Stamp { at: (0, 2), with: K }),
            Err(ChartError::InvalidTemplate(_))
        ));
        assert!(matches!(
            replace(&mut g, &template, Stamp { at: (0, 0), with: K }, 0, 0),
            Err(ChartError::InvalidStride)
        ));
        assert!(matches!(Template::new(vec![]), Err(ChartError::InvalidTemplate(_))));
        assert!(matches!(Template::new(vec![vec![E], vec![E, K]]), Err(ChartError::InvalidTemplate(_))));
    }
}
