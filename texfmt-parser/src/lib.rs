//! # texfmt-parser
//!
//! Parser and pretty-printer for LaTeX-like markup.
//!
//! The crate turns source text into a typed tree ([`latex::ast`]), attaches macro and
//! environment arguments according to xparse-style signatures, annotates render
//! metadata, and prints the result either losslessly ([`latex::print_raw`]) or as
//! width-constrained, canonically formatted source ([`latex::format_source`]).
//!
//! Layout
//!
//! src/latex
//!   ├── ast          Node types and render metadata
//!   ├── lexing       logos tokenizer
//!   ├── parsing      Raw tree construction
//!   ├── signature    Argument specification parser and cache
//!   ├── catalog      Built-in macro/environment tables
//!   ├── walker       Context-propagating traversal
//!   ├── assembling   Tree-to-tree passes (arguments, render info, content hooks, trimming)
//!   ├── alignment    Row/column splitting and padding for aligned bodies
//!   ├── printer      Document model, construction and resolution
//!   ├── formats      Raw (lossless) printing
//!   └── transforms   Composable pipelines
//!
//! For test helpers see the [testing module](latex::testing).

pub mod latex;
