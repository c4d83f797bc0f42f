//! Snake game: difficulty profiles, the snake body, fruit slots and the
//! tick-driven state machine that ties them together.

pub mod difficulty;
mod engine;
pub mod fruit;
pub mod snake;
mod state;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use engine::{Game, PLACEMENT_ATTEMPTS, TickReport};
pub use fruit::{Expired, Fruit, FruitKind, FruitPool};
pub use snake::{LengthChange, START_LEN, Snake};
pub use state::{GameState, TRANSITIONS};
