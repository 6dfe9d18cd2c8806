//! Segmented one-time-code entry.

mod render;
mod state;
mod update;

pub use render::{CODE_INPUT_HEIGHT, code_input_width, render_code_input};
pub use state::{CodeInputState, DEFAULT_CODE_LENGTH};
pub use update::{CodeInputAction, handle_key, handle_paste};
