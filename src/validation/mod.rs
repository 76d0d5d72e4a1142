//! Validation of multi-field forms that the derive rules cannot express

pub mod poll;

pub use poll::{PollForm, PollValidator, parse_ending_date, parse_items};
