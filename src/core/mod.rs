//! Small value types shared by the engine and the bundled games.

pub mod player;
pub mod rng;

pub use player::PlayerId;
pub use rng::SearchRng;
