pub mod axes;
pub mod canvas;
pub mod window;

use crate::{error::Result, figure::Figure};

pub use axes::{Viewport, format_tick, nice_ticks};
pub use canvas::{Canvas, PngBackend, load_system_font};
pub use window::WindowBackend;

/// Turns a finished figure into output
pub trait PlotBackend {
    fn render(&mut self, figure: &Figure) -> Result<()>;
}
