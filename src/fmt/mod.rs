//! Pretty-printing of terms.
//!
//! `Display` for [`Term`](crate::term::Term) renders CBS notation, which the
//! term reader accepts back.

pub mod term;

pub use term::format_term;
