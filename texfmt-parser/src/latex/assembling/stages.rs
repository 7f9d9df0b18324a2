//! Individual assembling stages
//!
//! Each stage implements the `Runnable` trait over [`Root`](crate::latex::ast::Root) and
//! wraps a plain function that does the work in place.

pub mod attach_arguments;
pub mod environment_content;
pub mod render_info;
pub mod trim_boundaries;

pub use attach_arguments::AttachArguments;
pub use environment_content::ProcessEnvironmentContent;
pub use render_info::AnnotateRenderInfo;
pub use trim_boundaries::TrimBoundaries;
