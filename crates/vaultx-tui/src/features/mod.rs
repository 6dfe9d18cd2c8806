//! Feature slices for the TUI (state/update/render per slice).

pub mod code_input;
pub mod field;
pub mod shell;
pub mod verification;
