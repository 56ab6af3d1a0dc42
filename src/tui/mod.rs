//! Terminal front end for the selector: key mapping, frame drawing and the
//! stderr-backed surface the session renders to.

mod highlight;
mod input;
mod render;
mod terminal;
mod theme;

pub use input::{KeyboardInput, POLL_INTERVAL, map_key};
pub use render::{CHROME_ROWS, DrawOptions, draw, result_rows};
pub use terminal::TerminalSurface;
pub use theme::{SLATE, Theme};
