//! Single-pass structural scan of pattern text.
//!
//! - `mode` - lexical sub-modes (escapes, character classes, comments, condition refs)
//! - `stack` - open-group frames and their bulk downgrades
//! - `analyzer` - the driver applying alternation and quantifier scoping
//!
//! The scan never rejects a pattern; validity is the compiler's call (see `bridge`).

mod analyzer;
mod mode;
mod stack;


pub use analyzer::scan;
