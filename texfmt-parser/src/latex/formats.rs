//! Output formats that do not go through the document model.

pub mod raw;
