//! Argument signatures
//!
//! Macros and environments declare their arguments with an xparse-style descriptor
//! string such as `"s o m"` or `"!o d()"`. This module parses those strings into
//! [`Signature`]s, prints them back, and memoizes parses process-wide.
//!
//! Grammar (descriptors separated by spaces, each optionally prefixed by `!` then `+`):
//!
//! | descriptor        | meaning                                    |
//! |-------------------|--------------------------------------------|
//! | `m`               | mandatory, `{...}` or a single token       |
//! | `o` / `O{dflt}`   | optional `[...]`                           |
//! | `s`               | optional star                              |
//! | `t<c>`            | optional token `c`                         |
//! | `r<o><c>` / `R<o><c>{dflt}` | required, custom delimiters      |
//! | `d<o><c>` / `D<o><c>{dflt}` | optional, custom delimiters      |
//!
//! `!` suppresses skipping whitespace before the argument; `+` marks a long argument
//! and changes nothing structurally. Parsing never fails: unknown characters are
//! skipped and recorded as diagnostics.

pub mod cache;
pub mod parser;
pub mod spec;

pub use cache::parse_signature;
pub use parser::parse_signature_uncached;
pub use spec::{ArgSpec, ArgSpecKind, Signature, SignatureDiagnostic};

use std::collections::HashMap;
use std::sync::Arc;

/// Parsed signatures by macro or environment name.
pub type SignatureMap = HashMap<String, Arc<Signature>>;

/// Canonical descriptor string of a signature.
pub fn print_signature(signature: &Signature) -> String {
    signature.to_string()
}
