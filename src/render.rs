//! Screen rendering for every game state.
//!
//! # Screens
//!
//! | State | Content |
//! |-------|---------|
//! | Idle | Snake icon on top, difficulty bar with a marker under the selection |
//! | Running | Fruits, snake body, snake head |
//! | Won | "W" glyph |
//! | Lost | "L" glyph |
//!
//! All drawing goes through [`Canvas`], which is always the grid not being
//! scanned, and the frame writer clears it before every call.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Polyline, Rectangle};

use crate::frame::Canvas;
use crate::game::{Difficulty, FruitKind, Game, GameState};

// =============================================================================
// Colors
// =============================================================================

pub const SNAKE_BODY: Rgb888 = Rgb888::new(255, 200, 0);
pub const SNAKE_HEAD: Rgb888 = Rgb888::new(255, 80, 0);
pub const FOOD: Rgb888 = Rgb888::new(0, 255, 0);
pub const HAZARD: Rgb888 = Rgb888::new(255, 0, 0);
pub const MARKER: Rgb888 = Rgb888::new(0, 0, 255);
/// Unselected difficulty levels.
pub const DIM: Rgb888 = Rgb888::new(24, 24, 24);
pub const WON: Rgb888 = FOOD;
pub const LOST: Rgb888 = HAZARD;

// =============================================================================
// Layout
// =============================================================================

/// Left column of the first difficulty block.
const LEVEL_X: i32 = 3;
/// Horizontal distance between difficulty blocks.
const LEVEL_STEP: i32 = 4;
const LEVEL_Y: i32 = 4;
const MARKER_Y: i32 = 7;

/// Per-level colour, Easy first.
const LEVEL_COLORS: [Rgb888; 3] = [FOOD, SNAKE_HEAD, HAZARD];

const W_GLYPH: [Point; 6] = [
    Point::new(3, 0),
    Point::new(5, 7),
    Point::new(7, 2),
    Point::new(8, 2),
    Point::new(10, 7),
    Point::new(12, 0),
];

const L_GLYPH: [Point; 3] = [Point::new(5, 0), Point::new(5, 7), Point::new(10, 7)];

// =============================================================================
// Screens
// =============================================================================

/// Draw the screen for the game's current state.
pub fn draw(
    game: &Game,
    canvas: &mut Canvas<'_>,
) {
    match game.state() {
        GameState::Idle => draw_idle(game.difficulty(), canvas),
        GameState::Running => draw_running(game, canvas),
        GameState::Won => draw_glyph(&W_GLYPH, WON, canvas),
        GameState::Lost => draw_glyph(&L_GLYPH, LOST, canvas),
    }
}

/// Menu: a small snake chasing a fruit and the difficulty selector.
pub fn draw_idle(
    selected: Difficulty,
    canvas: &mut Canvas<'_>,
) {
    let stroke = PrimitiveStyle::with_stroke(SNAKE_BODY, 1);
    Line::new(Point::new(2, 1), Point::new(8, 1)).into_styled(stroke).draw(canvas).ok();
    Pixel(Point::new(9, 1), SNAKE_HEAD).draw(canvas).ok();
    Pixel(Point::new(12, 1), FOOD).draw(canvas).ok();

    let selected_idx = level_index(selected);
    for (i, color) in LEVEL_COLORS.iter().enumerate() {
        let x = LEVEL_X + LEVEL_STEP * i as i32;
        let fill = if i <= selected_idx { *color } else { DIM };
        Rectangle::new(Point::new(x, LEVEL_Y), Size::new(2, 2))
            .into_styled(PrimitiveStyle::with_fill(fill))
            .draw(canvas)
            .ok();
    }

    let x = LEVEL_X + LEVEL_STEP * selected_idx as i32;
    Line::new(Point::new(x, MARKER_Y), Point::new(x + 1, MARKER_Y))
        .into_styled(PrimitiveStyle::with_stroke(MARKER, 1))
        .draw(canvas)
        .ok();
}

/// Playfield: fruits under the snake, head drawn last.
pub fn draw_running(
    game: &Game,
    canvas: &mut Canvas<'_>,
) {
    for fruit in game.fruits().iter() {
        let color = match fruit.kind {
            FruitKind::Normal => FOOD,
            FruitKind::Hazard => HAZARD,
        };
        canvas.put(fruit.pos, color);
    }
    for &pos in game.snake().segments().skip(1) {
        canvas.put(pos, SNAKE_BODY);
    }
    canvas.put(game.snake().head(), SNAKE_HEAD);
}

fn draw_glyph(
    points: &[Point],
    color: Rgb888,
    canvas: &mut Canvas<'_>,
) {
    Polyline::new(points)
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(canvas)
        .ok();
}

fn level_index(difficulty: Difficulty) -> usize {
    Difficulty::ALL.iter().position(|&d| d == difficulty).unwrap_or(0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{BLANK_GRID, Grid, Rgb12};

    fn render(f: impl FnOnce(&mut Canvas<'_>)) -> Grid {
        let mut grid = BLANK_GRID;
        f(&mut Canvas::new(&mut grid));
        grid
    }

    fn at(
        grid: &Grid,
        x: i32,
        y: i32,
    ) -> Rgb12 {
        grid[y as usize][x as usize]
    }

    #[test]
    fn test_idle_marks_selected_level() {
        for (i, d) in Difficulty::ALL.into_iter().enumerate() {
            let grid = render(|c| draw_idle(d, c));
            let x = LEVEL_X + LEVEL_STEP * i as i32;
            assert_eq!(at(&grid, x, MARKER_Y), Rgb12::from(MARKER));
            assert_eq!(at(&grid, x + 1, MARKER_Y), Rgb12::from(MARKER));
            let markers = grid[MARKER_Y as usize].iter().filter(|px| !px.is_off()).count();
            assert_eq!(markers, 2, "{d:?}");
        }
    }

    #[test]
    fn test_idle_fills_levels_up_to_selection() {
        let grid = render(|c| draw_idle(Difficulty::Medium, c));
        assert_eq!(at(&grid, LEVEL_X, LEVEL_Y), Rgb12::from(LEVEL_COLORS[0]));
        assert_eq!(at(&grid, LEVEL_X + LEVEL_STEP, LEVEL_Y + 1), Rgb12::from(LEVEL_COLORS[1]));
        assert_eq!(at(&grid, LEVEL_X + 2 * LEVEL_STEP, LEVEL_Y), Rgb12::from(DIM));
    }

    #[test]
    fn test_running_draws_snake() {
        let mut game = Game::new();
        let controls = crate::Controls::new();
        game.reinit(Difficulty::Easy, &controls);
        let grid = render(|c| draw_running(&game, c));

        let head = game.snake().head();
        assert_eq!(grid[head.row as usize][head.col as usize], Rgb12::from(SNAKE_HEAD));
        for pos in game.snake().segments().skip(1) {
            assert_eq!(grid[pos.row as usize][pos.col as usize], Rgb12::from(SNAKE_BODY));
        }
        let lit = grid.iter().flatten().filter(|px| !px.is_off()).count();
        assert_eq!(lit, game.snake().len());
        assert!(grid[0][0].is_off());
    }

    #[test]
    fn test_glyphs() {
        let won = render(|c| draw_glyph(&W_GLYPH, WON, c));
        assert_eq!(at(&won, 3, 0), Rgb12::from(WON));
        assert_eq!(at(&won, 12, 0), Rgb12::from(WON));
        assert!(won.iter().flatten().all(|px| px.is_off() || *px == Rgb12::from(WON)));

        let lost = render(|c| draw_glyph(&L_GLYPH, LOST, c));
        assert_eq!(at(&lost, 5, 0), Rgb12::from(LOST));
        assert_eq!(at(&lost, 10, 7), Rgb12::from(LOST));
        assert!(at(&lost, 10, 0).is_off());
    }

    #[test]
    fn test_draw_dispatches_on_state() {
        let game = Game::new();
        let idle = render(|c| draw(&game, c));
        assert_eq!(idle, render(|c| draw_idle(Difficulty::Easy, c)));
    }
}
