//! The [`Grid`] container — a mapping from [`Position`] to cell values.
//!
//! A `Grid` unifies the coordinate bookkeeping that line-oriented puzzle
//! inputs keep needing: sparse and dense storage, fixed and dynamically
//! expanding bounds, a border offset, and an origin convention for inputs
//! whose row 0 is at the bottom. Construction goes through [`GridBuilder`],
//! either empty or by parsing equal-length text lines.

use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::mem;
use std::ops::Range;

use crate::error::GridError;
use crate::geom::Position;

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

/// Which corner of the rendered grid holds row 0.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin {
    /// Row 0 is the top line (screen convention).
    #[default]
    UpperLeft,
    /// Row 0 is the bottom line (math convention).
    LowerLeft,
}

// ---------------------------------------------------------------------------
// Watermark
// ---------------------------------------------------------------------------

/// High-water marks of inserted keys. Expands on every write, never
/// contracts — deletion leaves the extents untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Watermark {
    min_row: i32,
    max_row: i32,
    min_col: i32,
    max_col: i32,
}

impl Watermark {
    fn of(pos: Position) -> Self {
        Self {
            min_row: pos.row,
            max_row: pos.row,
            min_col: pos.col,
            max_col: pos.col,
        }
    }

    fn expand(&mut self, pos: Position) {
        self.min_row = self.min_row.min(pos.row);
        self.max_row = self.max_row.max(pos.row);
        self.min_col = self.min_col.min(pos.col);
        self.max_col = self.max_col.max(pos.col);
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A mapping from [`Position`] to cell values.
///
/// Two storage modes: *dense* grids treat reads of unstored keys as an
/// error ([`GridError::OutOfBounds`]); *sparse* grids fall back to a
/// configured default and never fail. Bounds are either fixed at
/// construction or, with [`GridBuilder::dynamic`], derived from the
/// high-water marks of inserted keys.
#[derive(Clone, Debug)]
pub struct Grid<V> {
    cells: HashMap<Position, V>,
    rows: i32,
    cols: i32,
    offset: i32,
    sparse: bool,
    origin: Origin,
    default: Option<V>,
    dynamic: bool,
    mark: Option<Watermark>,
}

impl<V> Grid<V> {
    /// Start configuring a new grid.
    pub fn builder() -> GridBuilder<V> {
        GridBuilder::new()
    }

    /// Look up a cell.
    ///
    /// Dense grids fail with [`GridError::OutOfBounds`] on unstored keys.
    /// Sparse grids fall back to the configured default (`None` when no
    /// default was set) and never fail.
    pub fn get(&self, pos: Position) -> Result<Option<&V>, GridError> {
        match self.cells.get(&pos) {
            Some(value) => Ok(Some(value)),
            None if self.sparse => Ok(self.default.as_ref()),
            None => Err(GridError::OutOfBounds(pos)),
        }
    }

    /// Insert or overwrite a cell. In dynamic-bounds mode this expands the
    /// high-water marks and re-derives `rows`/`cols`.
    pub fn set(&mut self, pos: Position, value: V) {
        self.cells.insert(pos, value);
        if self.dynamic {
            let mark = match self.mark.as_mut() {
                Some(mark) => {
                    mark.expand(pos);
                    *mark
                }
                None => *self.mark.insert(Watermark::of(pos)),
            };
            self.rows = mark.max_row - mark.min_row + 1;
            self.cols = mark.max_col - mark.min_col + 1;
        }
    }

    /// Remove a stored cell and return it.
    ///
    /// Dense grids fail with [`GridError::OutOfBounds`] when the key is
    /// absent; sparse grids return `Ok(None)`. Dynamic bounds are NOT
    /// contracted — extents keep their high-water values.
    pub fn remove(&mut self, pos: Position) -> Result<Option<V>, GridError> {
        match self.cells.remove(&pos) {
            Some(value) => Ok(Some(value)),
            None if self.sparse => Ok(None),
            None => Err(GridError::OutOfBounds(pos)),
        }
    }

    /// Whether a cell is explicitly stored at `pos`, independent of any
    /// default-value fallback.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Row extent per the active bounds mode.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Column extent per the active bounds mode.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The configured coordinate offset.
    #[inline]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// The configured origin convention.
    #[inline]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Whether absent keys fall back to the default.
    #[inline]
    pub fn is_sparse(&self) -> bool {
        self.sparse
    }

    /// Whether bounds follow the high-water marks of inserted keys.
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// The default value returned by sparse lookups of absent keys.
    #[inline]
    pub fn default_value(&self) -> Option<&V> {
        self.default.as_ref()
    }

    /// Number of explicitly stored cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cells are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Drop all stored cells. Extents and high-water marks are untouched.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// The iterable row span: high-water marks in dynamic mode, otherwise
    /// `offset..rows + offset`.
    pub fn row_range(&self) -> Range<i32> {
        if self.dynamic {
            match self.mark {
                Some(mark) => mark.min_row..mark.max_row + 1,
                None => 0..0,
            }
        } else {
            self.offset..self.rows + self.offset
        }
    }

    /// The iterable column span, analogous to [`row_range`](Grid::row_range).
    pub fn col_range(&self) -> Range<i32> {
        if self.dynamic {
            match self.mark {
                Some(mark) => mark.min_col..mark.max_col + 1,
                None => 0..0,
            }
        } else {
            self.offset..self.cols + self.offset
        }
    }

    /// Whether `pos` falls inside the current row and column spans.
    pub fn inbounds(&self, pos: Position) -> bool {
        self.row_range().contains(&pos.row) && self.col_range().contains(&pos.col)
    }

    /// The midpoint of the current extents.
    pub fn center(&self) -> Position {
        if let (true, Some(mark)) = (self.dynamic, self.mark) {
            Position::new(
                (mark.max_row - mark.min_row) / 2 + mark.min_row,
                (mark.max_col - mark.min_col) / 2 + mark.min_col,
            )
        } else {
            Position::new(self.rows / 2 + self.offset, self.cols / 2 + self.offset)
        }
    }

    /// The smallest stored key in row-major order, if any.
    pub fn first(&self) -> Option<Position> {
        self.cells.keys().min().copied()
    }

    /// Iterate over stored `(position, value)` pairs, order unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&Position, &V)> {
        self.cells.iter()
    }

    /// Iterate over stored positions, order unspecified.
    pub fn keys(&self) -> impl Iterator<Item = &Position> {
        self.cells.keys()
    }

    /// Iterate over stored values, order unspecified.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.cells.values()
    }

    /// All stored positions holding `value`, in row-major order.
    pub fn find(&self, value: &V) -> Vec<Position>
    where
        V: PartialEq,
    {
        let mut found: Vec<Position> = self
            .cells
            .iter()
            .filter(|(_, v)| *v == value)
            .map(|(pos, _)| *pos)
            .collect();
        found.sort_unstable();
        found
    }

    /// A copy of this grid's configuration with the storage emptied and the
    /// high-water history reset.
    pub fn cleared(&self) -> Self
    where
        V: Clone,
    {
        Self {
            cells: HashMap::new(),
            rows: self.rows,
            cols: self.cols,
            offset: self.offset,
            sparse: self.sparse,
            origin: self.origin,
            default: self.default.clone(),
            dynamic: self.dynamic,
            mark: None,
        }
    }

    /// Stored-or-default lookup used by rendering; total in every mode.
    fn lookup(&self, pos: Position) -> Option<&V> {
        self.cells.get(&pos).or(self.default.as_ref())
    }

    /// The cells of row `r` across the column span.
    pub fn row(&self, r: i32) -> Vec<Option<&V>> {
        self.col_range()
            .map(|c| self.lookup(Position::new(r, c)))
            .collect()
    }

    /// The cells of column `c` across the row span.
    pub fn col(&self, c: i32) -> Vec<Option<&V>> {
        self.row_range()
            .map(|r| self.lookup(Position::new(r, c)))
            .collect()
    }

    /// Render the grid as text, one character per cell, using the default
    /// rule: first character of the value's display form, space for
    /// absent cells.
    ///
    /// Lines run top to bottom per the origin convention, so a lower-left
    /// grid renders its highest row first.
    pub fn render(&self) -> String
    where
        V: fmt::Display,
    {
        self.render_with(default_rule)
    }

    /// Render with a caller-supplied single-character rule.
    pub fn render_with<F>(&self, rule: F) -> String
    where
        F: Fn(Option<&V>) -> char,
    {
        let rows: Vec<i32> = match self.origin {
            Origin::UpperLeft => self.row_range().collect(),
            Origin::LowerLeft => self.row_range().rev().collect(),
        };
        let lines: Vec<String> = rows
            .into_iter()
            .map(|r| self.render_row_with(r, &rule))
            .collect();
        lines.join("\n")
    }

    /// The rendered rows in `row_range` order (no origin flip).
    pub fn lines(&self) -> Vec<String>
    where
        V: fmt::Display,
    {
        self.row_range()
            .map(|r| self.render_row_with(r, &default_rule))
            .collect()
    }

    fn render_row_with<F>(&self, r: i32, rule: &F) -> String
    where
        F: Fn(Option<&V>) -> char,
    {
        self.col_range()
            .map(|c| rule(self.lookup(Position::new(r, c))))
            .collect()
    }
}

fn default_rule<V: fmt::Display>(value: Option<&V>) -> char {
    match value {
        Some(v) => v.to_string().chars().next().unwrap_or(' '),
        None => ' ',
    }
}

impl<V: fmt::Display> fmt::Display for Grid<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Strict structural equality: every configuration attribute and the
/// stored key/value map must match. Grids with different offsets but
/// identical rendered output are NOT equal.
impl<V: PartialEq> PartialEq for Grid<V> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.offset == other.offset
            && self.sparse == other.sparse
            && self.origin == other.origin
            && self.default == other.default
            && self.dynamic == other.dynamic
            && self.cells == other.cells
    }
}

impl<V: Eq> Eq for Grid<V> {}

impl<'a, V> IntoIterator for &'a Grid<V> {
    type Item = (&'a Position, &'a V);
    type IntoIter = hash_map::Iter<'a, Position, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

// ---------------------------------------------------------------------------
// GridBuilder
// ---------------------------------------------------------------------------

/// Configuration for a [`Grid`], consumed by one of the build methods.
///
/// `transpose` is a parse-time option only: it swaps the row/column roles
/// of the source text but is not part of the resulting grid's state (or
/// its equality).
#[derive(Debug)]
pub struct GridBuilder<V> {
    rows: i32,
    cols: i32,
    offset: i32,
    sparse: bool,
    origin: Origin,
    default: Option<V>,
    dynamic: bool,
    transpose: bool,
}

impl<V> Default for GridBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> GridBuilder<V> {
    /// Start from the default configuration: dense, fixed bounds, zero
    /// offset, upper-left origin, no default value.
    pub fn new() -> Self {
        Self {
            rows: 0,
            cols: 0,
            offset: 0,
            sparse: false,
            origin: Origin::UpperLeft,
            default: None,
            dynamic: false,
            transpose: false,
        }
    }

    /// Row extent for an empty fixed-bounds grid (parsing overrides it).
    pub fn rows(mut self, rows: i32) -> Self {
        self.rows = rows;
        self
    }

    /// Column extent for an empty fixed-bounds grid (parsing overrides it).
    pub fn cols(mut self, cols: i32) -> Self {
        self.cols = cols;
        self
    }

    /// Add `offset` to every parsed coordinate, reserving a border margin
    /// outside the parsed content.
    pub fn offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// Absent keys yield the default instead of an error.
    pub fn sparse(mut self) -> Self {
        self.sparse = true;
        self
    }

    /// Where row 0 sits in the source text.
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// The value sparse lookups fall back to for absent keys.
    pub fn default_value(mut self, value: V) -> Self {
        self.default = Some(value);
        self
    }

    /// Derive extents from the high-water marks of inserted keys.
    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    /// Swap row/column roles while parsing.
    pub fn transpose(mut self) -> Self {
        self.transpose = true;
        self
    }

    /// Build an empty grid with the configured extents.
    pub fn build(self) -> Grid<V> {
        Grid {
            cells: HashMap::new(),
            rows: self.rows,
            cols: self.cols,
            offset: self.offset,
            sparse: self.sparse,
            origin: self.origin,
            default: self.default,
            dynamic: self.dynamic,
            mark: None,
        }
    }

    /// Parse equal-length text lines, converting each character through
    /// `conv`. A `None` conversion leaves the key absent, which filters
    /// the cell out of a sparse grid.
    ///
    /// Transpose swaps row/column roles *before* the origin flip; with a
    /// lower-left origin, source line 0 maps to the highest row. The
    /// offset is applied last, to both coordinates.
    pub fn parse_lines_with<S, F>(self, lines: &[S], conv: F) -> Grid<V>
    where
        S: AsRef<str>,
        F: Fn(char) -> Option<V>,
    {
        let transpose = self.transpose;
        let offset = self.offset;
        let origin = self.origin;
        let mut grid = self.build();

        let source_rows = lines.len() as i32;
        let source_cols = match lines.first() {
            Some(line) => line.as_ref().chars().count() as i32,
            None => 0,
        };
        let (rows, cols) = if transpose {
            (source_cols, source_rows)
        } else {
            (source_rows, source_cols)
        };
        grid.rows = rows;
        grid.cols = cols;

        for (li, line) in lines.iter().enumerate() {
            for (ci, ch) in line.as_ref().chars().enumerate() {
                let (mut r, mut c) = (li as i32, ci as i32);
                if transpose {
                    mem::swap(&mut r, &mut c);
                }
                if origin == Origin::LowerLeft {
                    r = rows - 1 - r;
                }
                if let Some(value) = conv(ch) {
                    grid.set(Position::new(r + offset, c + offset), value);
                }
            }
        }
        grid
    }

    /// Parse a multi-line string through `conv`; leading and trailing
    /// blank space is trimmed before splitting on newlines.
    pub fn parse_with<F>(self, text: &str, conv: F) -> Grid<V>
    where
        F: Fn(char) -> Option<V>,
    {
        let lines: Vec<&str> = text.trim().split('\n').collect();
        self.parse_lines_with(&lines, conv)
    }
}

impl GridBuilder<char> {
    /// Parse equal-length text lines, storing every character as-is.
    pub fn parse_lines<S: AsRef<str>>(self, lines: &[S]) -> Grid<char> {
        self.parse_lines_with(lines, Some)
    }

    /// Parse a multi-line string, storing every character as-is.
    pub fn parse(self, text: &str) -> Grid<char> {
        self.parse_with(text, Some)
    }
}

/// Conversion factory mapping one designated character to absent and
/// every other character to itself. The usual way to drop filler cells
/// from a sparse grid:
///
/// ```
/// use quadrille_core::{Grid, blank};
///
/// let grid = Grid::builder().sparse().parse_with("..#\n.#.", blank('.'));
/// assert_eq!(grid.len(), 2);
/// ```
pub fn blank(ch: char) -> impl Fn(char) -> Option<char> {
    move |c| if c == ch { None } else { Some(c) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{DOWN, RIGHT};

    fn dense_2x3() -> Grid<char> {
        Grid::builder().parse_lines(&["abc", "def"])
    }

    // -----------------------------------------------------------------------
    // Storage modes
    // -----------------------------------------------------------------------

    #[test]
    fn dense_parse_and_get() {
        let g = dense_2x3();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.len(), 6);
        assert_eq!(g.get(Position::new(0, 0)), Ok(Some(&'a')));
        assert_eq!(g.get(Position::new(1, 2)), Ok(Some(&'f')));
    }

    #[test]
    fn dense_absent_key_is_an_error() {
        let g = dense_2x3();
        let missing = Position::new(5, 5);
        assert_eq!(g.get(missing), Err(GridError::OutOfBounds(missing)));
    }

    #[test]
    fn dense_remove_absent_key_is_an_error() {
        let mut g = dense_2x3();
        let p = Position::new(0, 0);
        assert_eq!(g.remove(p), Ok(Some('a')));
        // Removed once, the key is gone for good.
        assert_eq!(g.remove(p), Err(GridError::OutOfBounds(p)));
        assert_eq!(g.get(p), Err(GridError::OutOfBounds(p)));
    }

    #[test]
    fn sparse_absent_key_yields_default() {
        let g: Grid<char> = Grid::builder()
            .sparse()
            .default_value('.')
            .parse_with("#", blank('.'));
        assert_eq!(g.get(Position::new(9, 9)), Ok(Some(&'.')));
    }

    #[test]
    fn sparse_without_default_yields_none() {
        let g: Grid<char> = Grid::builder().sparse().build();
        assert_eq!(g.get(Position::new(0, 0)), Ok(None));
    }

    #[test]
    fn sparse_remove_absent_key_is_a_noop() {
        let mut g: Grid<char> = Grid::builder().sparse().build();
        assert_eq!(g.remove(Position::new(3, 3)), Ok(None));
    }

    #[test]
    fn conversion_filters_sparse_cells() {
        let g = Grid::builder().sparse().parse_with("..#\n#..", blank('.'));
        assert_eq!(g.len(), 2);
        assert!(g.contains(Position::new(0, 2)));
        assert!(g.contains(Position::new(1, 0)));
        assert!(!g.contains(Position::new(0, 0)));
        // Extents still reflect the full source text.
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 3);
    }

    #[test]
    fn conversion_can_map_to_values() {
        let g: Grid<u32> = Grid::builder()
            .sparse()
            .default_value(0)
            .parse_lines_with(&["@.@", ".@."], |ch| (ch == '@').then_some(1));
        assert_eq!(g.len(), 3);
        assert_eq!(g.get(Position::new(0, 0)), Ok(Some(&1)));
        assert_eq!(g.get(Position::new(0, 1)), Ok(Some(&0)));
    }

    // -----------------------------------------------------------------------
    // Offset / origin / transpose
    // -----------------------------------------------------------------------

    #[test]
    fn offset_shifts_every_coordinate() {
        let g = Grid::builder().offset(1).parse_lines(&["ab", "cd"]);
        assert_eq!(g.get(Position::new(1, 1)), Ok(Some(&'a')));
        assert_eq!(g.get(Position::new(2, 2)), Ok(Some(&'d')));
        assert_eq!(g.row_range(), 1..3);
        assert_eq!(g.col_range(), 1..3);
        // The margin outside the parsed content is absent.
        assert!(!g.contains(Position::ZERO));
    }

    #[test]
    fn lower_left_assigns_rows_bottom_up() {
        let g = Grid::builder()
            .origin(Origin::LowerLeft)
            .parse_lines(&["A", "B", "C"]);
        assert_eq!(g.get(Position::new(2, 0)), Ok(Some(&'A')));
        assert_eq!(g.get(Position::new(1, 0)), Ok(Some(&'B')));
        assert_eq!(g.get(Position::new(0, 0)), Ok(Some(&'C')));
    }

    #[test]
    fn lower_left_with_offset() {
        let g = Grid::builder()
            .origin(Origin::LowerLeft)
            .offset(2)
            .parse_lines(&["A", "B", "C"]);
        assert_eq!(g.get(Position::new(4, 2)), Ok(Some(&'A')));
        assert_eq!(g.get(Position::new(2, 2)), Ok(Some(&'C')));
        assert_eq!(g.row_range(), 2..5);
    }

    #[test]
    fn transpose_swaps_axes() {
        let g = Grid::builder().transpose().parse_lines(&["ab", "cd"]);
        assert_eq!(g.get(Position::new(0, 0)), Ok(Some(&'a')));
        assert_eq!(g.get(Position::new(1, 0)), Ok(Some(&'b')));
        assert_eq!(g.get(Position::new(0, 1)), Ok(Some(&'c')));
        assert_eq!(g.get(Position::new(1, 1)), Ok(Some(&'d')));
    }

    #[test]
    fn transpose_applies_before_origin_flip() {
        // 2x3 source becomes 3x2; the flip then runs over 3 rows.
        let g = Grid::builder()
            .transpose()
            .origin(Origin::LowerLeft)
            .parse_lines(&["abc", "def"]);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 2);
        // 'a' is source (0,0) -> transposed (0,0) -> flipped row 2.
        assert_eq!(g.get(Position::new(2, 0)), Ok(Some(&'a')));
        // 'f' is source (1,2) -> transposed (2,1) -> flipped row 0.
        assert_eq!(g.get(Position::new(0, 1)), Ok(Some(&'f')));
    }

    // -----------------------------------------------------------------------
    // Dynamic bounds
    // -----------------------------------------------------------------------

    #[test]
    fn dynamic_bounds_follow_writes() {
        let mut g: Grid<char> = Grid::builder().sparse().dynamic().build();
        assert_eq!(g.rows(), 0);
        assert_eq!(g.row_range(), 0..0);

        g.set(Position::new(2, 3), '#');
        assert_eq!(g.rows(), 1);
        assert_eq!(g.cols(), 1);
        assert_eq!(g.row_range(), 2..3);

        g.set(Position::new(5, -1), '#');
        assert_eq!(g.rows(), 4);
        assert_eq!(g.cols(), 5);
        assert_eq!(g.row_range(), 2..6);
        assert_eq!(g.col_range(), -1..4);
    }

    #[test]
    fn dynamic_bounds_never_contract() {
        let mut g: Grid<char> = Grid::builder().sparse().dynamic().build();
        g.set(Position::new(0, 0), '#');
        g.set(Position::new(9, 9), '#');
        assert_eq!(g.rows(), 10);

        g.remove(Position::new(9, 9)).unwrap();
        assert_eq!(g.rows(), 10);
        assert_eq!(g.row_range(), 0..10);
    }

    #[test]
    fn clear_keeps_high_water_extents() {
        let mut g: Grid<char> = Grid::builder().sparse().dynamic().build();
        g.set(Position::new(4, 4), '#');
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.rows(), 5);
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    #[test]
    fn render_round_trips_dense_input() {
        let text = "abc\ndef";
        let g = Grid::builder().parse(text);
        assert_eq!(g.render(), text);
    }

    #[test]
    fn render_round_trips_with_offset() {
        let text = "abc\ndef";
        let g = Grid::builder().offset(3).parse(text);
        assert_eq!(g.render(), text);
    }

    #[test]
    fn render_round_trips_lower_left() {
        let text = "abc\ndef";
        let g = Grid::builder().origin(Origin::LowerLeft).parse(text);
        assert_eq!(g.render(), text);
    }

    #[test]
    fn render_round_trips_lower_left_with_offset() {
        let text = "ab\ncd\nef";
        let g = Grid::builder()
            .origin(Origin::LowerLeft)
            .offset(2)
            .parse(text);
        assert_eq!(g.render(), text);
    }

    #[test]
    fn render_of_transposed_grid_is_the_transposed_text() {
        let g = Grid::builder().transpose().parse("abc\ndef");
        assert_eq!(g.render(), "ad\nbe\ncf");
    }

    #[test]
    fn render_uses_default_for_absent_sparse_cells() {
        let g = Grid::builder()
            .sparse()
            .default_value('.')
            .parse_with("#.#\n.#.", blank('.'));
        assert_eq!(g.render(), "#.#\n.#.");
    }

    #[test]
    fn render_uses_space_when_no_default_is_set() {
        let g = Grid::builder().sparse().parse_with("#.#", blank('.'));
        assert_eq!(g.render(), "# #");
    }

    #[test]
    fn render_with_custom_rule() {
        let g: Grid<u32> = Grid::builder()
            .sparse()
            .parse_lines_with(&["@@.", ".@@"], |ch| (ch == '@').then_some(1));
        let out = g.render_with(|v| if v.is_some() { 'x' } else { '_' });
        assert_eq!(out, "xx_\n_xx");
    }

    #[test]
    fn render_first_char_of_display_form() {
        let mut g: Grid<u32> = Grid::builder().rows(1).cols(2).build();
        g.set(Position::new(0, 0), 42);
        g.set(Position::new(0, 1), 7);
        assert_eq!(g.render(), "47");
    }

    #[test]
    fn lines_ignore_the_origin_flip() {
        let g = Grid::builder().origin(Origin::LowerLeft).parse("ab\ncd");
        // Row 0 first, which for lower-left holds the last source line.
        assert_eq!(g.lines(), vec!["cd".to_string(), "ab".to_string()]);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[test]
    fn find_returns_matches_in_row_major_order() {
        let g = Grid::builder().parse("aba\nbab");
        assert_eq!(
            g.find(&'a'),
            vec![
                Position::new(0, 0),
                Position::new(0, 2),
                Position::new(1, 1),
            ]
        );
        assert_eq!(g.find(&'z'), vec![]);
    }

    #[test]
    fn first_is_the_smallest_stored_key() {
        let g = Grid::builder().sparse().parse_with(".#.\n#..", blank('.'));
        assert_eq!(g.first(), Some(Position::new(0, 1)));
        let empty: Grid<char> = Grid::builder().sparse().build();
        assert_eq!(empty.first(), None);
    }

    #[test]
    fn row_and_col_span_the_ranges() {
        let g = dense_2x3();
        let top: Vec<Option<&char>> = g.row(0);
        assert_eq!(top, vec![Some(&'a'), Some(&'b'), Some(&'c')]);
        let left: Vec<Option<&char>> = g.col(0);
        assert_eq!(left, vec![Some(&'a'), Some(&'d')]);
    }

    #[test]
    fn inbounds_honors_offset() {
        let g = Grid::builder().offset(1).parse("ab\ncd");
        assert!(g.inbounds(Position::new(1, 1)));
        assert!(g.inbounds(Position::new(2, 2)));
        assert!(!g.inbounds(Position::ZERO));
        assert!(!g.inbounds(Position::new(3, 1)));
    }

    #[test]
    fn center_of_fixed_and_dynamic_grids() {
        let g = Grid::builder().parse("abc\ndef\nghi");
        assert_eq!(g.center(), Position::new(1, 1));

        let mut d: Grid<char> = Grid::builder().sparse().dynamic().build();
        d.set(Position::new(2, 2), '#');
        d.set(Position::new(6, 8), '#');
        assert_eq!(d.center(), Position::new(4, 5));
    }

    #[test]
    fn movement_composes_with_lookups() {
        let g = dense_2x3();
        let start = Position::ZERO;
        assert_eq!(g.get(start + RIGHT), Ok(Some(&'b')));
        assert_eq!(g.get(start + DOWN + RIGHT + RIGHT), Ok(Some(&'f')));
    }

    // -----------------------------------------------------------------------
    // Equality / copies
    // -----------------------------------------------------------------------

    #[test]
    fn equality_is_structural() {
        let a = Grid::builder().parse("ab\ncd");
        let b = Grid::builder().parse("ab\ncd");
        assert_eq!(a, b);

        let mut c = Grid::builder().parse("ab\ncd");
        c.set(Position::ZERO, 'x');
        assert_ne!(a, c);
    }

    #[test]
    fn equal_content_with_different_offsets_is_not_equal() {
        let a = Grid::builder().parse("ab");
        let b = Grid::builder().offset(1).parse("ab");
        assert_eq!(a.render(), b.render());
        assert_ne!(a, b);
    }

    #[test]
    fn differing_defaults_are_not_equal() {
        let a: Grid<char> = Grid::builder().sparse().default_value('.').build();
        let b: Grid<char> = Grid::builder().sparse().default_value('#').build();
        assert_ne!(a, b);
    }

    #[test]
    fn cleared_keeps_configuration_drops_cells() {
        let g = Grid::builder()
            .sparse()
            .offset(1)
            .default_value('.')
            .parse_with("#.\n.#", blank('.'));
        let empty = g.cleared();
        assert!(empty.is_empty());
        assert_eq!(empty.rows(), g.rows());
        assert_eq!(empty.offset(), g.offset());
        assert_eq!(empty.default_value(), Some(&'.'));
        assert_ne!(g, empty);

        let copy = g.clone();
        assert_eq!(g, copy);
    }

    #[test]
    fn iteration_covers_stored_cells() {
        let g = Grid::builder().sparse().parse_with("#.#", blank('.'));
        let mut keys: Vec<Position> = g.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![Position::new(0, 0), Position::new(0, 2)]);
        assert_eq!(g.values().count(), 2);
        assert_eq!((&g).into_iter().count(), 2);
    }
}
