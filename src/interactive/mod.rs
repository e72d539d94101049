//! Interactive TUI interface

mod app;
mod rendering;

pub use app::{App, Message, MessageStyle, SharedGateway, Statistics, run_tui};
pub use rendering::{clue_tile_at, layout, tile_areas};
