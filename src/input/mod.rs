//! Human-entered inputs: text parsers and saved field values

pub mod parse;
mod raw;

pub use parse::{parse_amount, parse_duration, parse_rate_list, parse_toggle, ParseError};
pub use raw::{InputError, RawInputs};
