//! Tree model
//!
//! Every construct of the markup is a [`Node`]. Sibling lists (`Vec<Node>`) are in literal
//! document order. Trees are plain data: they carry no behavior beyond helpers and
//! serialize with an internal `type` tag so external tools can consume them.
//!
//! Arguments are attached after parsing (see [`crate::latex::assembling`]). Until then
//! `args` is `None`; afterwards it holds one [`Argument`] per signature descriptor, with
//! missing optional arguments represented by [`Argument::absent`].

pub mod node;
pub mod render_info;
pub mod trim;

pub use node::{
    Argument, Comment, Environment, EnvironmentKind, Macro, Math, MathKind, Node, Root, Script,
    Verbatim, VerbatimKind,
};
pub use render_info::{EnvironmentRenderInfo, MacroRenderInfo};
pub use trim::{trim, trim_end, trim_start};
