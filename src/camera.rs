use std::fmt;

use crossterm::style::Color;

use crate::ScreenSize;
use crate::cell::Cell;
use crate::world::World;

/// What a single terminal cell is painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub color: Color,
    pub glyph: char,
}

/// Maps cell states to paints. `Ready` cells are left unpainted and show the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub firing: Paint,
    pub refractory: Paint,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            firing: Paint {
                color: Color::Green,
                glyph: '█',
            },
            refractory: Paint {
                color: Color::Blue,
                glyph: '█',
            },
        }
    }
}

impl Palette {
    pub fn paint(&self, cell: Cell) -> Option<Paint> {
        match cell {
            Cell::Ready => None,
            Cell::Refractory => Some(self.refractory),
            Cell::Firing => Some(self.firing),
        }
    }
}

pub struct Camera {
    /// The pixel buffer. One entry per terminal cell, `None` where nothing is painted.
    pb: Vec<Option<Paint>>,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,

    /// Side length of an automaton cell, in pixels
    cell_size: usize,

    /// Blank pixels left between neighbouring cells
    line_width: usize,

    palette: Palette,
}

impl Camera {
    pub fn new(
        cols: ScreenSize,
        rows: ScreenSize,
        cell_size: ScreenSize,
        line_width: ScreenSize,
        palette: Palette,
    ) -> Self {
        let (w, h) = (cols as usize, rows as usize);

        Self {
            pb: vec![None; w * h],
            w,
            h,
            cell_size: cell_size as usize,
            line_width: line_width as usize,
            palette,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Resize the pixel buffer, clearing it
    pub fn resize(&mut self, cols: ScreenSize, rows: ScreenSize) {
        self.w = cols as usize;
        self.h = rows as usize;

        self.pb = vec![None; self.w * self.h];
    }

    /// Reset the pixel buffer
    pub fn reset(&mut self) {
        self.pb.fill(None);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Paint> {
        if x >= self.w || y >= self.h {
            return None;
        }

        self.pb[self.xy_from(x, y)]
    }

    /// Paints a square of side `s` with its top left corner at `(x, y)`. Anything outside the
    /// buffer is clipped.
    pub fn draw_square(&mut self, x: usize, y: usize, s: usize, paint: Paint) {
        let x_end = (x + s).min(self.w);
        let y_end = (y + s).min(self.h);

        for y in y..y_end {
            for x in x..x_end {
                let i = self.xy_from(x, y);
                self.pb[i] = Some(paint);
            }
        }
    }

    /// Paint every non-ready cell of `world`. Each cell takes up a `cell_size` square, minus
    /// `line_width` on its right and bottom edges.
    pub fn draw(&mut self, world: &World) {
        let s = self.cell_size.saturating_sub(self.line_width);

        if s == 0 {
            return;
        }

        for (x, y, cell) in world.iter() {
            let (px, py) = (x * self.cell_size, y * self.cell_size);

            if px >= self.w || py >= self.h {
                continue;
            }

            if let Some(paint) = self.palette.paint(cell) {
                self.draw_square(px, py, s, paint);
            }
        }
    }

    /// Rows of the pixel buffer, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Paint>]> {
        self.pb.chunks(self.w.max(1))
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
}

/// Plain dump of the pixel buffer, `.` for unpainted pixels
impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for px in row {
                let c = px.map_or('.', |paint| paint.glyph);
                write!(f, "{c}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crossterm::style::Color;

    use super::Camera;
    use super::Paint;
    use super::Palette;
    use crate::cell::Cell;
    use crate::world::World;

    fn palette() -> Palette {
        Palette {
            firing: Paint {
                color: Color::Green,
                glyph: '@',
            },
            refractory: Paint {
                color: Color::Blue,
                glyph: '*',
            },
        }
    }

    #[test]
    fn default_palette() {
        let palette = Palette::default();

        assert_eq!(palette.paint(Cell::Ready), None);
        assert_eq!(palette.paint(Cell::Firing).map(|p| p.color), Some(Color::Green));
        assert_eq!(palette.paint(Cell::Refractory).map(|p| p.color), Some(Color::Blue));
    }

    #[test]
    fn cells_with_gaps() {
        let world: World = "@ ` *\n` * @".parse().unwrap();
        let mut cam = Camera::new(9, 6, 3, 1, palette());

        cam.draw(&world);

        insta::assert_snapshot!(cam.to_string(), @r"
        @@....**.
        @@....**.
        .........
        ...**.@@.
        ...**.@@.
        .........
        ");
    }

    #[test]
    fn one_pixel_per_cell() {
        let world: World = "@ *\n* @".parse().unwrap();
        let mut cam = Camera::new(2, 2, 1, 0, palette());

        cam.draw(&world);

        assert_eq!(cam.to_string(), "@*\n*@\n");
    }

    #[test]
    fn clipped_to_viewport() {
        let world: World = "` ` @\n` ` `\n@ ` `".parse().unwrap();
        let mut cam = Camera::new(5, 5, 2, 0, palette());

        cam.draw(&world);

        // (2, 0) only partly fits, and (0, 2) loses its bottom row
        insta::assert_snapshot!(cam.to_string(), @r"
        ....@
        ....@
        .....
        .....
        @@...
        ");
    }

    #[test]
    fn reset_and_resize() {
        let world: World = "@".parse().unwrap();
        let mut cam = Camera::new(1, 1, 1, 0, palette());

        cam.draw(&world);
        assert!(cam.pixel(0, 0).is_some());

        cam.reset();
        assert_eq!(cam.pixel(0, 0), None);

        cam.resize(3, 2);
        assert_eq!((cam.width(), cam.height()), (3, 2));
        assert_eq!(cam.rows().count(), 2);
        assert_eq!(cam.pixel(5, 5), None);
    }

    #[test]
    fn gap_as_wide_as_cell_draws_nothing() {
        let world: World = "@".parse().unwrap();
        let mut cam = Camera::new(2, 2, 1, 1, palette());

        cam.draw(&world);

        assert_eq!(cam.to_string(), "..\n..\n");
    }
}
