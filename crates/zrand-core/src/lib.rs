//! zrand-core: composable random byte-sequence generation
//!
//! Callers describe output as a tree of operations, then evaluate the tree once
//! against a single batch of secure random bytes:
//! ```text
//! literal(bytes)        fixed bytes
//! concat([op, ...])     outputs end to end
//! select(op, n)         n draws with replacement from op's output (≤ 256 bytes)
//! shuffle(op)           op's output, permuted in place
//! ```
//!
//! Every operation reports the output, scratch and randomness bytes it needs
//! ([`Requirements`]), so the driver allocates exactly once and draws all
//! randomness up front.

pub mod alphabet;
pub mod driver;
pub mod error;
pub mod op;
pub mod recipe;

pub use alphabet::{letters, password, LOWERS, NUMERICS, UPPERS};
pub use bstr::BString;
pub use driver::{build, build_string, build_string_with, build_with};
pub use error::{Region, ZrandError, ZrandResult};
pub use op::{Op, OpKind, Requirements, MAX_SOURCE_LEN};
pub use recipe::{builtin, builtins, Alphabet, Recipe, SelectRecipe};
