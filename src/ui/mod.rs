pub mod effects;
pub mod render;

pub use effects::ClearFlash;
pub use render::{RowFlash, draw_game};
