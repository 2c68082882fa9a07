//! The Brian's Brain rule.
//!
//! 1. A `Ready` cell fires if exactly two of its Moore neighbours are firing.
//! 2. A `Firing` cell becomes `Refractory`, and a `Refractory` cell becomes `Ready`.
//!
//! All cells of a generation are updated simultaneously. Transitions only ever read a
//! [`Snapshot`] of the previous generation, never the buffer being written.

use crate::cell::Cell;
use crate::world::World;

/// Number of firing neighbours that ignites a ready cell
pub const IGNITION_COUNT: u8 = 2;

/// A read-only view of one generation
#[derive(Clone, Copy)]
pub struct Snapshot<'a> {
    cells: &'a [Cell],
    width: usize,
    height: usize,
}

impl<'a> Snapshot<'a> {
    pub fn new(cells: &'a [Cell], width: usize, height: usize) -> Self {
        debug_assert_eq!(cells.len(), width * height);

        Self {
            cells,
            width,
            height,
        }
    }

    /// The cell at `(x, y)`, or `None` if it lies outside of the grid
    pub fn at(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.cells[y * self.width + x])
    }
}

/// Count the firing cells in the 3x3 block centered on `(x, y)`.
///
/// Positions outside the grid are skipped, so corner cells only ever see 3 neighbours and edge
/// cells 5. The center itself is part of the scan. This never affects the rule, since it is only
/// consulted for `Ready` cells, and a `Ready` center can't count as firing.
pub fn count_firing_neighbors(snapshot: Snapshot<'_>, x: usize, y: usize) -> u8 {
    let mut count = 0;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let (Some(cx), Some(cy)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };

            if snapshot.at(cx, cy) == Some(Cell::Firing) {
                count += 1;
            }
        }
    }

    count
}

/// The state of `(x, y)` in the generation after `snapshot`
pub fn transition(snapshot: Snapshot<'_>, x: usize, y: usize) -> Cell {
    match snapshot.at(x, y) {
        Some(Cell::Ready) if count_firing_neighbors(snapshot, x, y) == IGNITION_COUNT => {
            Cell::Firing
        }
        Some(Cell::Ready) | None => Cell::Ready,
        Some(Cell::Firing) => Cell::Refractory,
        Some(Cell::Refractory) => Cell::Ready,
    }
}

/// Advance `world` by one generation
pub fn advance(world: &mut World) {
    let (width, height) = (world.width(), world.height());
    let (snapshot, next) = world.buffers();

    for y in 0..height {
        for x in 0..width {
            next[y * width + x] = transition(snapshot, x, y);
        }
    }

    world.swap_buffers();
}
