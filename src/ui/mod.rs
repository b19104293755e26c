//! Console output for fetched resources

mod console;
pub mod render;

pub use console::{BufferConsole, Console, StdoutConsole};
pub use render::{
    render_character, render_films, render_planets, render_starships, render_vehicle,
};
