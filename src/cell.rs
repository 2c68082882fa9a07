/// The state of a single automaton cell.
///
/// A cell that just fired is `Refractory` for exactly one generation, so the three states fully
/// describe the automaton. There is no hidden history.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// May fire if exactly two Moore neighbours are firing
    #[default]
    Ready,

    /// Fired last generation, returns to `Ready` next generation
    Refractory,

    /// Becomes `Refractory` next generation
    Firing,
}

impl Cell {
    pub const ALL: [Cell; 3] = [Cell::Ready, Cell::Refractory, Cell::Firing];

    /// Glyph used by the plain text dump of a world
    pub const fn glyph(self) -> char {
        match self {
            Cell::Ready => '`',
            Cell::Refractory => '*',
            Cell::Firing => '@',
        }
    }

    /// Inverse of [`Cell::glyph`]. `.` is also accepted as `Ready`, since it's easier to type.
    pub const fn from_glyph(c: char) -> Option<Cell> {
        match c {
            '`' | '.' => Some(Cell::Ready),
            '*' => Some(Cell::Refractory),
            '@' => Some(Cell::Firing),
            _ => None,
        }
    }

    pub fn is_firing(self) -> bool {
        self == Cell::Firing
    }
}
