//! Update functions - every buffer mutation the core performs flows
//! through here.

mod newline;

pub use newline::{
    insert_newlines_and_indent, plan_steps, sorted_selection_indices, NewlineReport, NewlineStep,
};
