use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::Cell;
use crate::rules::Snapshot;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("({x}, {y}) is outside of the {width}x{height} world")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("A {width}x{height} world holds {expected} cells, but got {got}")]
    CellCount {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    #[error("Row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Unrecognized cell glyph '{0}'")]
    InvalidGlyph(char),

    #[error("A {width}x{height} world exceeds the limit of {} cells", MAX_CELLS)]
    TooLarge { width: usize, height: usize },
}

/// Upper bound on `width * height`. Each world holds two buffers of this many cells.
pub const MAX_CELLS: usize = 1 << 28;

/// Number of cells in a `width` by `height` world
pub fn cell_count(width: usize, height: usize) -> Result<usize, WorldError> {
    width
        .checked_mul(height)
        .filter(|&n| n <= MAX_CELLS)
        .ok_or(WorldError::TooLarge { width, height })
}

/// Number of cells in each state
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Census {
    pub ready: usize,
    pub refractory: usize,
    pub firing: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.ready + self.refractory + self.firing
    }
}

/// A fixed size grid of [`Cell`]s. The grid does not wrap around.
#[derive(Debug, Clone)]
pub struct World {
    width: usize,
    height: usize,

    /// The current generation, stored row-major
    cells: Vec<Cell>,

    /// Back buffer that the next generation is written into. Its contents are meaningless between
    /// generations.
    next: Vec<Cell>,

    /// Number of generations advanced since creation
    generation: u64,
}

impl World {
    /// Create a new world where every cell is [`Cell::Ready`]
    pub fn new(width: usize, height: usize) -> Result<Self, WorldError> {
        let n = cell_count(width, height)?;

        Ok(Self {
            width,
            height,
            cells: vec![Cell::Ready; n],
            next: vec![Cell::Ready; n],
            generation: 0,
        })
    }

    /// Create a world from row-major `cells`
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, WorldError> {
        let expected = cell_count(width, height)?;

        if cells.len() != expected {
            return Err(WorldError::CellCount {
                width,
                height,
                expected,
                got: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            next: cells.clone(),
            cells,
            generation: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current generation in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell, WorldError> {
        let i = self.index(x, y)?;

        Ok(self.cells[i])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), WorldError> {
        let i = self.index(x, y)?;
        self.cells[i] = cell;

        Ok(())
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Every `(x, y, cell)` triple of the current generation, row by row
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let w = self.width.max(1);

        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % w, i / w, cell))
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();

        for &cell in &self.cells {
            match cell {
                Cell::Ready => census.ready += 1,
                Cell::Refractory => census.refractory += 1,
                Cell::Firing => census.firing += 1,
            }
        }

        census
    }

    /// Read-only view of the current generation
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.cells, self.width, self.height)
    }

    /// Split into the current generation and the back buffer the next one is written into
    pub(crate) fn buffers(&mut self) -> (Snapshot<'_>, &mut [Cell]) {
        let snapshot = Snapshot::new(&self.cells, self.width, self.height);

        (snapshot, self.next.as_mut_slice())
    }

    /// Make the back buffer the current generation
    pub(crate) fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, WorldError> {
        if x >= self.width || y >= self.height {
            return Err(WorldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok(y * self.width + x)
    }
}

/// Worlds are equal when their dimensions and current cells are. The generation counter is not
/// compared.
impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for World {}

/// One row per line, cells separated by a space
impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }

                write!(f, "{}", cell.glyph())?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

/// Parses the format written by `Display`. Whitespace within a row is ignored, as are blank
/// lines.
impl FromStr for World {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;

        for line in s.lines().filter(|line| !line.trim().is_empty()) {
            let before = cells.len();

            for c in line.chars().filter(|c| !c.is_whitespace()) {
                let cell = Cell::from_glyph(c).ok_or(WorldError::InvalidGlyph(c))?;
                cells.push(cell);
            }

            let got = cells.len() - before;
            let expected = *width.get_or_insert(got);

            if got != expected {
                return Err(WorldError::RaggedRow {
                    row: height,
                    expected,
                    got,
                });
            }

            height += 1;
        }

        World::from_cells(width.unwrap_or(0), height, cells)
    }
}
