//! The game state machine.
//!
//! [`Game::tick`] is called once per game tick from a single context. It takes
//! the pending requests from [`Controls`], advances the simulation, draws the
//! frame and publishes the new state back so the buttons route correctly.

use super::difficulty::{Difficulty, DifficultyProfile};
use super::fruit::{Expired, FruitKind, FruitPool};
use super::snake::{LengthChange, Snake};
use super::state::GameState;
use crate::config::{COLS, ROWS};
use crate::frame::FrameWriter;
use crate::grid::Position;
use crate::input::Controls;
use crate::render;
use crate::rng::RandomSource;

/// Random positions tried before a spawn is skipped for this tick.
pub const PLACEMENT_ATTEMPTS: u16 = 1000;

/// What one tick did, for the caller to log.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct TickReport {
    /// `(from, to)` when the state changed.
    pub transition: Option<(GameState, GameState)>,
    /// New difficulty when it was changed on the idle screen.
    pub difficulty: Option<Difficulty>,
    /// The snake moved this tick.
    pub moved: bool,
    pub eaten: Option<FruitKind>,
    /// Fruits placed this tick.
    pub spawned: u8,
    pub expired: Expired,
    /// The previous frame was still waiting for the scan, so nothing was drawn.
    pub frame_dropped: bool,
}

impl TickReport {
    /// The game left Idle or a terminal screen for a fresh run.
    pub fn started(&self) -> bool { matches!(self.transition, Some((_, GameState::Running))) }
}

/// Snake, fruits, difficulty and state, owned by the tick context.
#[derive(Clone, Debug)]
pub struct Game {
    state: GameState,
    profile: &'static DifficultyProfile,
    snake: Snake,
    fruits: FruitPool,
    /// Segments still to add (positive) or remove (negative), one per move.
    pending_len: i16,
    move_timer: u16,
    food_timer: u16,
    hazard_timer: u16,
}

impl Game {
    /// Idle at Easy with the starting snake.
    pub fn new() -> Self {
        Self {
            state: GameState::Idle,
            profile: Difficulty::Easy.profile(),
            snake: Snake::starting(),
            fruits: FruitPool::new(),
            pending_len: 0,
            move_timer: 0,
            food_timer: 0,
            hazard_timer: 0,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn state(&self) -> GameState { self.state }

    pub fn difficulty(&self) -> Difficulty { self.profile.difficulty }

    pub fn profile(&self) -> &'static DifficultyProfile { self.profile }

    pub fn snake(&self) -> &Snake { &self.snake }

    pub fn fruits(&self) -> &FruitPool { &self.fruits }

    pub fn pending_len(&self) -> i16 { self.pending_len }

    // -------------------------------------------------------------------------
    // Entry points
    // -------------------------------------------------------------------------

    /// Advance one tick and draw the result into `frames`.
    pub fn tick(
        &mut self,
        controls: &Controls,
        rng: &mut impl RandomSource,
        frames: &mut FrameWriter<'_>,
    ) -> TickReport {
        let mut report = self.step(controls, rng);
        let entered_from_idle = matches!(report.transition, Some((GameState::Idle, GameState::Running)));
        let drawn = if entered_from_idle {
            // Start publishes a blank frame before the first move.
            frames.draw(|_| ())
        } else {
            frames.draw(|canvas| render::draw(self, canvas))
        };
        report.frame_dropped = drawn.is_none();
        report
    }

    /// Advance one tick without drawing.
    pub fn step(
        &mut self,
        controls: &Controls,
        rng: &mut impl RandomSource,
    ) -> TickReport {
        let mut report = TickReport::default();
        let requests = controls.take_requests();

        match self.state {
            GameState::Idle => {
                if requests.prev_difficulty {
                    self.select(self.difficulty().prev(), &mut report);
                }
                if requests.next_difficulty {
                    self.select(self.difficulty().next(), &mut report);
                }
                if requests.start {
                    self.reinit(self.difficulty(), controls);
                    self.transition(GameState::Running, &mut report);
                }
            }
            GameState::Running => self.run(controls, rng, &mut report),
            GameState::Won | GameState::Lost => {
                if requests.to_idle {
                    self.reinit(Difficulty::Easy, controls);
                    self.transition(GameState::Idle, &mut report);
                } else if requests.restart {
                    self.reinit(self.difficulty(), controls);
                    self.transition(GameState::Running, &mut report);
                }
            }
        }

        controls.publish_state(self.state);
        report
    }

    /// Reset snake, fruits, timers and the direction queue for `difficulty`.
    /// The state is left unchanged.
    pub fn reinit(
        &mut self,
        difficulty: Difficulty,
        controls: &Controls,
    ) {
        self.profile = difficulty.profile();
        self.snake = Snake::starting();
        self.fruits.clear();
        self.pending_len = 0;
        self.move_timer = 0;
        self.food_timer = 0;
        self.hazard_timer = 0;
        controls.reset(self.snake.heading());
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn transition(
        &mut self,
        to: GameState,
        report: &mut TickReport,
    ) {
        if self.state.can_transition(to) {
            report.transition = Some((self.state, to));
            self.state = to;
        }
    }

    fn select(
        &mut self,
        difficulty: Difficulty,
        report: &mut TickReport,
    ) {
        self.profile = difficulty.profile();
        report.difficulty = Some(difficulty);
    }

    fn run(
        &mut self,
        controls: &Controls,
        rng: &mut impl RandomSource,
        report: &mut TickReport,
    ) {
        self.move_timer += 1;
        if self.move_timer >= self.profile.move_period {
            self.move_timer = 0;
            let dir = controls.next_heading();
            let change = LengthChange::from_pending(self.pending_len);
            self.pending_len -= self.pending_len.signum();
            let head = self.snake.advance(dir, change);
            report.moved = true;

            if let Some(outcome) = self.judge() {
                self.transition(outcome, report);
                return;
            }
            if let Some(kind) = self.fruits.take_at(head) {
                self.pending_len += match kind {
                    FruitKind::Normal => i16::from(self.profile.growth),
                    FruitKind::Hazard => -i16::from(self.profile.shrink),
                };
                report.eaten = Some(kind);
            }
        }

        report.expired = self.fruits.expire_tick();
        report.spawned = self.spawn(rng);
    }

    /// Terminal outcome after a move, checked in priority order.
    fn judge(&self) -> Option<GameState> {
        let len = self.snake.len();
        if len < self.profile.min_len {
            Some(GameState::Lost)
        } else if len > self.profile.winning_len {
            Some(GameState::Won)
        } else if self.snake.bites_itself() {
            Some(GameState::Lost)
        } else {
            None
        }
    }

    fn spawn(
        &mut self,
        rng: &mut impl RandomSource,
    ) -> u8 {
        let mut spawned = 0;

        self.food_timer += 1;
        if self.food_timer >= self.profile.food_period {
            self.food_timer = 0;
            spawned += u8::from(self.try_spawn(FruitKind::Normal, rng));
        }

        self.hazard_timer += 1;
        if self.hazard_timer >= self.profile.hazard_period {
            self.hazard_timer = 0;
            spawned += u8::from(self.try_spawn(FruitKind::Hazard, rng));
        }

        spawned
    }

    fn try_spawn(
        &mut self,
        kind: FruitKind,
        rng: &mut impl RandomSource,
    ) -> bool {
        let p = self.profile;
        let (max, chance, ttl) = match kind {
            FruitKind::Normal => (p.max_food, p.food_chance, p.food_ttl),
            FruitKind::Hazard => (p.max_hazard, p.hazard_chance, p.hazard_ttl),
        };
        if self.fruits.count(kind) >= usize::from(max) || !rng.roll_percent(chance) {
            return false;
        }
        match self.free_cell(rng) {
            Some(pos) => self.fruits.spawn(pos, kind, ttl),
            None => false,
        }
    }

    /// Rejection-sample a cell free of snake and fruit.
    fn free_cell(
        &self,
        rng: &mut impl RandomSource,
    ) -> Option<Position> {
        (0..PLACEMENT_ATTEMPTS).find_map(|_| {
            let row = rng.range_inclusive(0, ROWS as u32 - 1) as u8;
            let col = rng.range_inclusive(0, COLS as u32 - 1) as u8;
            let pos = Position::new(row, col);
            (!self.snake.occupies(pos) && !self.fruits.occupies(pos)).then_some(pos)
        })
    }
}

impl Default for Game {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameStore;
    use crate::grid::Direction::{self, Down, Left, Right, Up};
    use crate::rng::XorShift32;

    /// Replays `values` cyclically, clamped into the requested range.
    struct Script {
        values: Vec<u32>,
        next: usize,
    }

    impl Script {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }

        /// Every spawn roll fails.
        fn never() -> Self { Self::new(&[99]) }
    }

    impl RandomSource for Script {
        fn range_inclusive(
            &mut self,
            min: u32,
            max: u32,
        ) -> u32 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v.clamp(min, max)
        }
    }

    fn running(
        difficulty: Difficulty,
        snake: Snake,
    ) -> (Game, Controls) {
        let controls = Controls::new();
        let mut game = Game::new();
        game.reinit(difficulty, &controls);
        controls.reset(snake.heading());
        game.snake = snake;
        game.state = GameState::Running;
        controls.publish_state(GameState::Running);
        (game, controls)
    }

    /// Step until the snake has moved once, returning the moving tick's report.
    fn step_move(
        game: &mut Game,
        controls: &Controls,
        rng: &mut impl RandomSource,
    ) -> TickReport {
        for _ in 0..game.profile.move_period {
            let report = game.step(controls, rng);
            if report.moved {
                return report;
            }
        }
        panic!("snake did not move within one move period");
    }

    fn row_snake(
        len: u8,
        row: u8,
        head_col: u8,
    ) -> Snake {
        Snake::new((0..len).map(|i| Position::new(row, head_col - i)), Right)
    }

    /// 30 segments: row 1 from column 13 back to 0, then all of row 0.
    fn long_snake(heading: Direction) -> Snake {
        let lower = (0..14u8).rev().map(|c| Position::new(1, c));
        let upper = (0..COLS as u8).map(|c| Position::new(0, c));
        Snake::new(lower.chain(upper), heading)
    }

    #[test]
    fn test_moves_every_move_period() {
        let (mut game, controls) = running(Difficulty::Easy, Snake::starting());
        let mut rng = Script::never();
        let head = game.snake().head();
        for _ in 0..Difficulty::Easy.profile().move_period - 1 {
            assert!(!game.step(&controls, &mut rng).moved);
        }
        assert!(game.step(&controls, &mut rng).moved);
        assert_eq!(game.snake().head(), head.step(Right));
    }

    #[test]
    fn test_queued_direction_is_used() {
        let (mut game, controls) = running(Difficulty::Medium, Snake::starting());
        let mut rng = Script::never();
        let head = game.snake().head();
        controls.on_button(Up, 0);
        step_move(&mut game, &controls, &mut rng);
        assert_eq!(game.snake().head(), head.step(Up));
        step_move(&mut game, &controls, &mut rng);
        assert_eq!(game.snake().head(), head.step(Up).step(Up));
    }

    #[test]
    fn test_normal_fruit_grows_one_per_move() {
        let (mut game, controls) = running(Difficulty::Easy, row_snake(6, 3, 7));
        let mut rng = Script::never();
        game.fruits.spawn(Position::new(3, 8), FruitKind::Normal, 500);

        let report = step_move(&mut game, &controls, &mut rng);
        assert_eq!(report.eaten, Some(FruitKind::Normal));
        assert_eq!(game.pending_len(), 2);
        assert_eq!(game.snake().len(), 6);
        assert_eq!(game.fruits().count(FruitKind::Normal), 0);

        step_move(&mut game, &controls, &mut rng);
        assert_eq!(game.snake().len(), 7);
        step_move(&mut game, &controls, &mut rng);
        assert_eq!(game.snake().len(), 8);
        step_move(&mut game, &controls, &mut rng);
        assert_eq!(game.snake().len(), 8);
        assert_eq!(game.pending_len(), 0);
    }

    #[test]
    fn test_hazard_at_min_length_loses() {
        let (mut game, controls) = running(Difficulty::Easy, row_snake(4, 3, 7));
        let mut rng = Script::never();
        game.fruits.spawn(Position::new(3, 8), FruitKind::Hazard, 500);

        let report = step_move(&mut game, &controls, &mut rng);
        assert_eq!(report.eaten, Some(FruitKind::Hazard));
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.snake().len(), 4);

        let report = step_move(&mut game, &controls, &mut rng);
        assert_eq!(game.snake().len(), 3);
        assert_eq!(report.transition, Some((GameState::Running, GameState::Lost)));
        assert_eq!(controls.state(), GameState::Lost);
    }

    #[test]
    fn test_exceeding_winning_length_wins() {
        let (mut game, controls) = running(Difficulty::Easy, long_snake(Right));
        let mut rng = Script::never();
        game.pending_len = 1;
        let report = step_move(&mut game, &controls, &mut rng);
        assert_eq!(game.snake().len(), 31);
        assert_eq!(report.transition, Some((GameState::Running, GameState::Won)));
    }

    #[test]
    fn test_win_checked_before_self_collision() {
        let (mut game, controls) = running(Difficulty::Easy, long_snake(Up));
        let mut rng = Script::never();
        game.pending_len = 1;
        step_move(&mut game, &controls, &mut rng);
        assert!(game.snake().bites_itself());
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn test_self_collision_loses() {
        let snake = Snake::new(
            [
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
                Position::new(2, 0),
            ],
            Down,
        );
        let (mut game, controls) = running(Difficulty::Easy, snake);
        let mut rng = Script::never();
        let report = step_move(&mut game, &controls, &mut rng);
        assert_eq!(report.transition, Some((GameState::Running, GameState::Lost)));
    }

    #[test]
    fn test_spawn_rejects_occupied_cells() {
        let (mut game, controls) = running(Difficulty::Easy, Snake::starting());
        // Roll succeeds, first sample lands on the snake, second is free.
        let mut rng = Script::new(&[0, 4, 12, 0, 0]);
        let period = Difficulty::Easy.profile().food_period;
        let mut spawned = 0;
        for _ in 0..period {
            spawned += game.step(&controls, &mut rng).spawned;
        }
        assert_eq!(spawned, 1);
        assert!(game.fruits().occupies(Position::new(0, 0)));
        assert_eq!(game.fruits().count(FruitKind::Normal), 1);
    }

    #[test]
    fn test_spawn_gives_up_when_no_cell_is_free() {
        let (mut game, controls) = running(Difficulty::Easy, Snake::starting());
        game.fruits.spawn(Position::new(4, 4), FruitKind::Hazard, 1000);
        // Roll succeeds, then every sample lands on the hazard.
        let mut rng = Script::new(&[4]);
        let mut spawned = 0;
        for _ in 0..Difficulty::Easy.profile().food_period {
            spawned += game.step(&controls, &mut rng).spawned;
        }
        assert_eq!(spawned, 0);
        assert_eq!(game.fruits().count(FruitKind::Normal), 0);
        assert_eq!(game.fruits().iter().count(), 1);
    }

    #[test]
    fn test_spawn_respects_max_count() {
        let (mut game, controls) = running(Difficulty::Hard, Snake::starting());
        let mut rng = XorShift32::new(7);
        game.fruits.spawn(Position::new(0, 0), FruitKind::Normal, 1000);
        for _ in 0..Difficulty::Hard.profile().food_period * 4 {
            game.step(&controls, &mut rng);
            if game.state() != GameState::Running {
                break;
            }
            assert!(game.fruits().count(FruitKind::Normal) <= 1);
            assert!(game.fruits().count(FruitKind::Hazard) <= 3);
        }
    }

    #[test]
    fn test_fruit_expires_while_running() {
        let (mut game, controls) = running(Difficulty::Easy, Snake::starting());
        let mut rng = Script::never();
        game.fruits.spawn(Position::new(0, 0), FruitKind::Hazard, 2);
        assert_eq!(game.step(&controls, &mut rng).expired.hazard, 0);
        assert_eq!(game.step(&controls, &mut rng).expired.hazard, 1);
        assert_eq!(game.fruits().count(FruitKind::Hazard), 0);
    }

    #[test]
    fn test_idle_cycles_difficulty() {
        let controls = Controls::new();
        let mut game = Game::new();
        let mut rng = Script::never();

        controls.on_button(Right, 0);
        assert_eq!(game.step(&controls, &mut rng).difficulty, Some(Difficulty::Medium));
        controls.on_button(Left, 1000);
        game.step(&controls, &mut rng);
        controls.on_button(Left, 2000);
        game.step(&controls, &mut rng);
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.state(), GameState::Idle);
    }

    #[test]
    fn test_start_enters_running() {
        let controls = Controls::new();
        let mut game = Game::new();
        let mut rng = Script::never();
        controls.on_button(Right, 0);
        game.step(&controls, &mut rng);
        controls.on_button(Down, 1000);
        let report = game.step(&controls, &mut rng);
        assert!(report.started());
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.difficulty(), Difficulty::Medium);
        assert_eq!(controls.state(), GameState::Running);
    }

    #[test]
    fn test_terminal_gestures() {
        let (mut game, controls) = running(Difficulty::Hard, Snake::starting());
        let mut rng = Script::never();
        game.state = GameState::Lost;
        controls.publish_state(GameState::Lost);

        controls.on_button(Up, 0);
        assert_eq!(game.step(&controls, &mut rng).transition, None);
        controls.on_button(Up, 200);
        let report = game.step(&controls, &mut rng);
        assert_eq!(report.transition, Some((GameState::Lost, GameState::Running)));
        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.snake().len(), crate::game::snake::START_LEN);

        game.state = GameState::Won;
        controls.publish_state(GameState::Won);
        controls.on_button(Down, 400);
        controls.on_button(Down, 600);
        let report = game.step(&controls, &mut rng);
        assert_eq!(report.transition, Some((GameState::Won, GameState::Idle)));
        assert_eq!(game.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_reinit_resets_everything() {
        let (mut game, controls) = running(Difficulty::Medium, row_snake(4, 0, 5));
        game.fruits.spawn(Position::new(6, 6), FruitKind::Normal, 10);
        game.pending_len = -3;
        controls.on_button(Up, 0);
        game.reinit(Difficulty::Easy, &controls);
        assert_eq!(game.snake().len(), crate::game::snake::START_LEN);
        assert_eq!(game.fruits().iter().count(), 0);
        assert_eq!(game.pending_len(), 0);
        assert_eq!(controls.queued(), 0);
        assert_eq!(game.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_tick_publishes_frames() {
        let mut store = FrameStore::new();
        let (mut writer, mut scanner) = store.split();
        let controls = Controls::new();
        let mut game = Game::new();
        let mut rng = Script::never();

        assert!(!game.tick(&controls, &mut rng, &mut writer).frame_dropped);
        // Not yet scanned: the next frame is dropped.
        assert!(game.tick(&controls, &mut rng, &mut writer).frame_dropped);
        scanner.maybe_swap_at_boundary(0);
        assert!(scanner.display_grid().iter().flatten().any(|px| !px.is_off()));

        controls.on_button(Up, 0);
        let report = game.tick(&controls, &mut rng, &mut writer);
        assert!(report.started() && !report.frame_dropped);
        scanner.maybe_swap_at_boundary(0);
        assert!(scanner.display_grid().iter().flatten().all(|px| px.is_off()));
        assert_eq!(store.stats().dropped, 1);
    }
}
