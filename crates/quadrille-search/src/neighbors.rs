use quadrille_core::{DIAGONAL, ORTHOGONAL, Position, SURROUNDING};

/// Cached neighbor enumeration helper.
///
/// Enumerates the cardinal (4-way), diagonal, or surrounding (8-way)
/// neighbors of a position, filtered by a predicate, reusing one internal
/// buffer across calls.
pub struct Neighbors {
    buf: Vec<Position>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// The 4-directional (cardinal) neighbors of `pos` for which `keep`
    /// returns `true`.
    pub fn cardinal(&mut self, pos: Position, keep: impl Fn(Position) -> bool) -> &[Position] {
        self.collect(pos, &ORTHOGONAL, keep)
    }

    /// The 4 diagonal neighbors of `pos` for which `keep` returns `true`.
    pub fn diagonal(&mut self, pos: Position, keep: impl Fn(Position) -> bool) -> &[Position] {
        self.collect(pos, &DIAGONAL, keep)
    }

    /// All 8 neighbors of `pos` for which `keep` returns `true`.
    pub fn all(&mut self, pos: Position, keep: impl Fn(Position) -> bool) -> &[Position] {
        self.collect(pos, &SURROUNDING, keep)
    }

    fn collect(
        &mut self,
        pos: Position,
        directions: &[Position],
        keep: impl Fn(Position) -> bool,
    ) -> &[Position] {
        self.buf.clear();
        for &d in directions {
            let next = pos + d;
            if keep(next) {
                self.buf.push(next);
            }
        }
        &self.buf
    }
}
