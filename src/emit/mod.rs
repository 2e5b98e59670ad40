//! Go source emission for the collected asset table.
//!
//! Quoting lives in its own submodule so the byte-exact escaping rules can be
//! tested apart from the file layout and output lifecycle.

mod quote;
mod source;

pub use quote::go_quote;
pub use source::{GENERATOR_NAME, dedup_last_wins, render_into, render_source, write_source};
