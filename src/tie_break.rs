/// Which predecessor produced a cell's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From `(row - 1, col - 1)`: both sequences advance.
    Diagonal,
    /// From `(row - 1, col)`: only the second sequence advances.
    Up,
    /// From `(row, col - 1)`: only the first sequence advances.
    Left,
}

impl Direction {
    /// Order in which tied candidates are preferred.
    pub const PRIORITY: [Direction; 3] = [Direction::Diagonal, Direction::Up, Direction::Left];
}

/// Picks the best of the three recurrence candidates.
///
/// The returned score is always the true maximum. On ties the first
/// direction in [`Direction::PRIORITY`] that reaches it wins, so the
/// reconstructed alignment only depends on the inputs.
#[inline]
pub fn select(diagonal: i64, up: i64, left: i64) -> (i64, Direction) {
    let candidate = |direction: Direction| match direction {
        Direction::Diagonal => diagonal,
        Direction::Up => up,
        Direction::Left => left,
    };

    let mut best = (candidate(Direction::PRIORITY[0]), Direction::PRIORITY[0]);
    for direction in Direction::PRIORITY.into_iter().skip(1) {
        let value = candidate(direction);
        if value > best.0 {
            best = (value, direction);
        }
    }
    best
}
