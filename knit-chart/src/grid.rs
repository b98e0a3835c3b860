//! Stitch symbols and the rectangular grid that holds them.

use std::fmt;

use crate::error::{ChartError, Result};

/// A stitch operation shown in one chart cell.
///
/// Files store the numeric [`Symbol::code`]; the enum itself is what the rest
/// of the crate works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Symbol {
    /// No stitch in this cell.
    #[default]
    Empty,
    Knit,
    Purl,
    /// Make one (increase).
    MakeOne,
    /// Knit two together, leans right.
    K2tog,
    /// Purl two together.
    P2tog,
    /// Slip slip knit, leans left.
    Ssk,
    /// Slip slip purl.
    Ssp,
    CastOn,
    BindOff,
    /// Stitch put on hold.
    Hold,
    /// Transient: right-leaning shaping seed used during symbol derivation.
    MarkerRight,
    /// Transient: left-leaning shaping seed used during symbol derivation.
    MarkerLeft,
}

impl Symbol {
    /// Every symbol, finished ones first.
    pub fn all() -> &'static [Symbol] {
        &[
            Symbol::Empty,
            Symbol::Knit,
            Symbol::Purl,
            Symbol::MakeOne,
            Symbol::K2tog,
            Symbol::P2tog,
            Symbol::Ssk,
            Symbol::Ssp,
            Symbol::CastOn,
            Symbol::BindOff,
            Symbol::Hold,
            Symbol::MarkerRight,
            Symbol::MarkerLeft,
        ]
    }

    /// Numeric code used in CSV and workbook exports.
    pub fn code(&self) -> i8 {
        match self {
            Symbol::Empty => 0,
            Symbol::Knit => 1,
            Symbol::Purl => -1,
            Symbol::MakeOne => 2,
            Symbol::K2tog => 11,
            Symbol::P2tog => -11,
            Symbol::Ssk => 21,
            Symbol::Ssp => -21,
            Symbol::CastOn => 50,
            Symbol::BindOff => 60,
            Symbol::Hold => 70,
            Symbol::MarkerRight => -101,
            Symbol::MarkerLeft => -102,
        }
    }

    pub fn from_code(code: i64) -> Option<Symbol> {
        Symbol::all().iter().copied().find(|s| i64::from(s.code()) == code)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Empty => "empty",
            Symbol::Knit => "knit",
            Symbol::Purl => "purl",
            Symbol::MakeOne => "make-one",
            Symbol::K2tog => "k2tog",
            Symbol::P2tog => "p2tog",
            Symbol::Ssk => "ssk",
            Symbol::Ssp => "ssp",
            Symbol::CastOn => "cast-on",
            Symbol::BindOff => "bind-off",
            Symbol::Hold => "hold",
            Symbol::MarkerRight => "marker-right",
            Symbol::MarkerLeft => "marker-left",
        }
    }

    /// Chart glyph. Knit is a blank cell; markers have no glyph.
    pub fn glyph(&self) -> &'static str {
        match self {
            Symbol::Empty => "#",
            Symbol::Knit => " ",
            Symbol::Purl => "-",
            Symbol::MakeOne => "△",
            Symbol::K2tog | Symbol::P2tog => "＼",
            Symbol::Ssk | Symbol::Ssp => "／",
            Symbol::CastOn => "▲",
            Symbol::BindOff => "●",
            Symbol::Hold => "■",
            Symbol::MarkerRight | Symbol::MarkerLeft => "",
        }
    }

    /// Markers only live inside symbol derivation.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, Symbol::MarkerRight | Symbol::MarkerLeft)
    }

    /// A plain stitch with no shaping.
    #[inline]
    pub fn is_plain(&self) -> bool {
        matches!(self, Symbol::Knit | Symbol::Purl)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row-major grid of symbols. Row 0 is the top row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Symbol>,
}

impl StitchGrid {
    /// All-empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![Symbol::Empty; rows * cols] }
    }

    /// Build from rows of symbols. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Symbol>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, symbols) in rows.iter().enumerate() {
            if symbols.len() != cols {
                return Err(ChartError::RaggedGrid { row, expected: cols, found: symbols.len() });
            }
            cells.extend_from_slice(symbols);
        }
        Ok(Self { rows: rows.len(), cols, cells })
    }

    /// Build from rows of numeric codes (the export encoding).
    pub fn from_codes<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self> {
        let symbols = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .iter()
                    .map(|&code| Symbol::from_code(code).ok_or(ChartError::UnknownSymbolCode(code)))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(symbols)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at `(row, col)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Symbol {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) outside {}x{} grid", self.rows, self.cols);
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, symbol: Symbol) {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) outside {}x{} grid", self.rows, self.cols);
        self.cells[row * self.cols + col] = symbol;
    }

    pub fn row(&self, row: usize) -> &[Symbol] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [Symbol] {
        &mut self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Symbol]> {
        // chunks_exact(0) panics, and a zero-column grid has no cells anyway
        self.cells.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Shift every row down by one and put a row of `fill` on top.
    pub fn insert_row_at_top(&mut self, fill: Symbol) {
        self.cells.splice(0..0, std::iter::repeat_n(fill, self.cols));
        self.rows += 1;
    }

    /// Replace every occurrence of `from` with `to`.
    pub fn replace_symbol(&mut self, from: Symbol, to: Symbol) {
        for cell in self.cells.iter_mut().filter(|c| **c == from) {
            *cell = to;
        }
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().filter(|&&c| c == symbol).count()
    }

    /// True when no cell holds a stitch (also true for a zero-sized grid).
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == Symbol::Empty)
    }

    pub fn contains_transient(&self) -> bool {
        self.cells.iter().any(Symbol::is_transient)
    }

    /// Numeric codes, one `Vec` per row.
    pub fn to_codes(&self) -> Vec<Vec<i8>> {
        self.iter_rows().map(|row| row.iter().map(Symbol::code).collect()).collect()
    }
}

impl fmt::Display for StitchGrid {
    /// Compact text view: `.` empty, `|` knit, `-` purl, other symbols by glyph.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for symbol in row {
                let glyph = match symbol {
                    Symbol::Empty => ".",
                    Symbol::Knit => "|",
                    Symbol::MarkerRight => ">",
                    Symbol::MarkerLeft => "<",
                    other => other.glyph(),
                };
                f.write_str(glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
