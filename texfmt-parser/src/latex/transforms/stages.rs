//! Individual transformation stages
//!
//! Each stage implements [`Runnable`](super::Runnable). The tree-to-tree assembling
//! passes are re-exported here so pipelines can be built from one import.

pub mod parsing;
pub mod printing;
pub mod tokenization;

pub use crate::latex::assembling::{
    AnnotateRenderInfo, AttachArguments, ProcessEnvironmentContent, TrimBoundaries,
};
pub use parsing::{MathParsing, RawParsing};
pub use printing::{Formatting, RawPrinting};
pub use tokenization::Tokenization;
