//! LaTeX-like markup: tree model, parsing, and printing.

pub mod alignment;
pub mod assembling;
pub mod ast;
pub mod catalog;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod printer;
pub mod signature;
pub mod testing;
pub mod transforms;
pub mod walker;

pub use ast::{Argument, Node, Root};
pub use catalog::Catalog;
pub use formats::raw::{print_raw, print_raw_node};
pub use parsing::{parse, parse_math, parse_minimal, parse_with, ParseError, ParseOptions};
pub use printer::{format_source, format_tree, FormatOptions};
