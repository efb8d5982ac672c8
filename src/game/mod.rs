//! Simulation core. Everything here is renderer-free and advances one tick
//! per [`Engine::poll`] call; the terminal driver talks to it only through
//! the read accessors.

pub mod ball;
pub mod car;
pub mod engine;
pub mod field;
pub mod input;
pub mod pos;
pub mod tile;

pub use ball::{Ball, BallKind, BallState};
pub use car::Car;
pub use engine::{Engine, FIELD_HEIGHT, FIELD_WIDTH, ROSTER_SIZE};
pub use field::{Field, Hole, HOLE_DIST};
pub use input::Keys;
pub use pos::{Dir, Pos};
pub use tile::{Tile, WallShape};
