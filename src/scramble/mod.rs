mod glyphs;
mod grid;
mod state;
mod timing;

pub use glyphs::LetterCase;
pub use grid::{Cell, CellGrid, RenderTarget, Row, ensure_grid_size, render, word_start};
pub use state::{AnimationState, Phase};
pub use timing::{DISPLAY_CADENCE, FrameThrottle, PollableState, StopHandle, Ticker};
