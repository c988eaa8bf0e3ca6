//! Utility modules

pub mod text;

pub use text::{char_col_to_visual_col, leading_whitespace_len};
