pub mod game_state;
pub mod scoring;
pub mod geometry;
pub mod image;
pub mod rules;
pub mod game_events;

// Re-export main components
pub use game_state::*;
pub use scoring::*;
pub use geometry::*;
pub use image::*;
pub use rules::*;
pub use game_events::*;
