//! embedded-graphics drawing target over a frame grid.
//!
//! `x` is the matrix column, `y` the row. Pixels outside the matrix are
//! silently clipped.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use super::color::Rgb12;
use super::store::Grid;
use crate::config::{COLS, ROWS};
use crate::grid::Position;

/// Renderer writing into a grid that is not currently being scanned.
pub struct Canvas<'a> {
    grid: &'a mut Grid,
}

impl<'a> Canvas<'a> {
    pub fn new(grid: &'a mut Grid) -> Self { Self { grid } }

    /// Set one cell by playfield position.
    #[inline]
    pub fn put(
        &mut self,
        pos: Position,
        color: Rgb888,
    ) {
        self.set_pixel(pos.col as i32, pos.row as i32, color.into());
    }

    /// Read back a cell.
    pub fn get(
        &self,
        pos: Position,
    ) -> Option<Rgb12> {
        self.grid.get(pos.row as usize)?.get(pos.col as usize).copied()
    }

    #[inline]
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb12,
    ) {
        if x >= 0 && (x as usize) < COLS && y >= 0 && (y as usize) < ROWS {
            self.grid[y as usize][x as usize] = color;
        }
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size { Size::new(COLS as u32, ROWS as u32) }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let px = Rgb12::from(color);
        for row in self.grid.iter_mut() {
            row.fill(px);
        }
        Ok(())
    }
}
