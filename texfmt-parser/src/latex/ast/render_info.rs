//! Render metadata
//!
//! Printing hints copied onto macro and environment nodes by the render-info pass.
//! They come from the [`Catalog`](crate::latex::catalog::Catalog) and are plain
//! structs so the printer can match on them exhaustively.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MacroRenderInfo {
    /// Overrides the math-mode flag for the macro's arguments (`\text` sets `false`)
    pub in_math_mode: Option<bool>,
    /// Wrapped continuation lines are indented one level under the macro
    pub hanging_indent: bool,
    /// Arguments flow into the surrounding paragraph instead of nesting
    pub in_par_mode: bool,
    /// Forces a line break before the macro
    pub break_before: bool,
    /// Forces a line break after the macro
    pub break_after: bool,
}

impl MacroRenderInfo {
    pub fn is_empty(&self) -> bool {
        *self == MacroRenderInfo::default()
    }

    /// Overlays `other` on top of `self`. Set flags win, and a declared math mode
    /// replaces the current one.
    pub fn merge(&mut self, other: &MacroRenderInfo) {
        self.in_math_mode = other.in_math_mode.or(self.in_math_mode);
        self.hanging_indent |= other.hanging_indent;
        self.in_par_mode |= other.in_par_mode;
        self.break_before |= other.break_before;
        self.break_after |= other.break_after;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentRenderInfo {
    pub in_math_mode: Option<bool>,
    /// Body is a `&`/`\\` table whose columns get aligned
    pub aligned_content: bool,
    /// The catalog's body processor has already run on this node
    pub body_processed: bool,
}

impl EnvironmentRenderInfo {
    pub fn is_empty(&self) -> bool {
        *self == EnvironmentRenderInfo::default()
    }

    pub fn merge(&mut self, other: &EnvironmentRenderInfo) {
        self.in_math_mode = other.in_math_mode.or(self.in_math_mode);
        self.aligned_content |= other.aligned_content;
        self.body_processed |= other.body_processed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_existing_flags() {
        let mut info = MacroRenderInfo {
            in_par_mode: true,
            ..Default::default()
        };
        info.merge(&MacroRenderInfo {
            hanging_indent: true,
            in_math_mode: Some(false),
            ..Default::default()
        });
        assert!(info.in_par_mode);
        assert!(info.hanging_indent);
        assert_eq!(info.in_math_mode, Some(false));
    }

    #[test]
    fn test_merge_without_math_mode_keeps_current() {
        let mut info = EnvironmentRenderInfo {
            in_math_mode: Some(true),
            body_processed: true,
            ..Default::default()
        };
        info.merge(&EnvironmentRenderInfo::default());
        assert_eq!(info.in_math_mode, Some(true));
        assert!(!info.aligned_content);
        assert!(info.body_processed);
    }
}
