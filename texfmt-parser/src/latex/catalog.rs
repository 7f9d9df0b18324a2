//! Macro and environment catalog
//!
//! Static knowledge about names: argument signatures, render metadata, and how an
//! environment's body is parsed and post-processed. The built-in table lives in
//! [`latex2e`]; callers extend it with [`Catalog::define_macro`] and
//! [`Catalog::define_environment`].

pub mod latex2e;

use crate::latex::ast::{EnvironmentRenderInfo, MacroRenderInfo};
use crate::latex::signature::{parse_signature, SignatureMap};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// The built-in catalog, shared by the default pipelines.
pub static LATEX2E: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(Catalog::latex2e()));

/// Post-processing applied to an environment body after arguments are attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContentProcessor {
    #[default]
    None,
    /// Trim whitespace and paragraph breaks at both ends of the body
    TrimWhitespace,
    /// Restructure a body of `\item`-like macros, one paragraph per item
    ListBody { item: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroInfo {
    pub signature: Option<String>,
    pub render_info: MacroRenderInfo,
}

impl MacroInfo {
    pub fn new(signature: &str) -> Self {
        MacroInfo {
            signature: Some(signature.to_string()),
            render_info: MacroRenderInfo::default(),
        }
    }

    pub fn hanging_indent(mut self) -> Self {
        self.render_info.hanging_indent = true;
        self
    }

    pub fn in_par_mode(mut self) -> Self {
        self.render_info.in_par_mode = true;
        self
    }

    pub fn in_math_mode(mut self, math: bool) -> Self {
        self.render_info.in_math_mode = Some(math);
        self
    }

    pub fn break_before(mut self) -> Self {
        self.render_info.break_before = true;
        self
    }

    pub fn break_after(mut self) -> Self {
        self.render_info.break_after = true;
        self
    }

    pub fn break_around(self) -> Self {
        self.break_before().break_after()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentInfo {
    pub signature: Option<String>,
    pub render_info: EnvironmentRenderInfo,
    /// Body is parsed in math mode
    pub math: bool,
    /// Body is captured verbatim
    pub verbatim: bool,
    pub processor: ContentProcessor,
}

impl EnvironmentInfo {
    pub fn new(signature: &str) -> Self {
        EnvironmentInfo {
            signature: Some(signature.to_string()),
            ..EnvironmentInfo::default()
        }
    }

    pub fn verbatim() -> Self {
        EnvironmentInfo {
            verbatim: true,
            ..EnvironmentInfo::default()
        }
    }

    pub fn math(mut self) -> Self {
        self.math = true;
        self.render_info.in_math_mode = Some(true);
        self
    }

    pub fn aligned(mut self) -> Self {
        self.render_info.aligned_content = true;
        self
    }

    pub fn processor(mut self, processor: ContentProcessor) -> Self {
        self.processor = processor;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    macros: HashMap<String, MacroInfo>,
    environments: HashMap<String, EnvironmentInfo>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    pub fn latex2e() -> Self {
        latex2e::catalog()
    }

    /// Add or replace a macro definition.
    pub fn define_macro(&mut self, name: impl Into<String>, info: MacroInfo) {
        self.macros.insert(name.into(), info);
    }

    /// Add or replace an environment definition.
    pub fn define_environment(&mut self, name: impl Into<String>, info: EnvironmentInfo) {
        self.environments.insert(name.into(), info);
    }

    pub fn with_macro(mut self, name: &str, signature: &str) -> Self {
        self.define_macro(name, MacroInfo::new(signature));
        self
    }

    pub fn with_environment(mut self, name: &str, signature: &str) -> Self {
        self.define_environment(name, EnvironmentInfo::new(signature));
        self
    }

    /// Definitions in `other` replace same-named ones in `self`.
    pub fn extend(&mut self, other: Catalog) {
        self.macros.extend(other.macros);
        self.environments.extend(other.environments);
    }

    pub fn macro_info(&self, name: &str) -> Option<&MacroInfo> {
        self.macros.get(name)
    }

    pub fn environment_info(&self, name: &str) -> Option<&EnvironmentInfo> {
        self.environments.get(name)
    }

    pub fn macro_signatures(&self) -> SignatureMap {
        self.macros
            .iter()
            .filter_map(|(name, info)| {
                let signature = info.signature.as_deref()?;
                Some((name.clone(), parse_signature(signature)))
            })
            .collect()
    }

    pub fn environment_signatures(&self) -> SignatureMap {
        self.environments
            .iter()
            .filter_map(|(name, info)| {
                let signature = info.signature.as_deref()?;
                Some((name.clone(), parse_signature(signature)))
            })
            .collect()
    }

    pub fn math_environments(&self) -> HashSet<String> {
        self.environments
            .iter()
            .filter(|(_, info)| info.math)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn verbatim_environments(&self) -> HashSet<String> {
        self.environments
            .iter()
            .filter(|(_, info)| info.verbatim)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures_skip_undeclared() {
        let mut catalog = Catalog::new().with_macro("xxx", "m m");
        catalog.define_macro("yyy", MacroInfo::default().in_par_mode());
        let signatures = catalog.macro_signatures();
        assert_eq!(signatures.len(), 1);
        assert_eq!(signatures["xxx"].len(), 2);
    }

    #[test]
    fn test_extend_replaces() {
        let mut catalog = Catalog::new().with_macro("xxx", "m");
        catalog.extend(Catalog::new().with_macro("xxx", "o m"));
        assert_eq!(
            catalog.macro_info("xxx").and_then(|i| i.signature.as_deref()),
            Some("o m")
        );
    }

    #[test]
    fn test_environment_sets() {
        let catalog = Catalog::latex2e();
        let math = catalog.math_environments();
        assert!(math.contains("align*"));
        assert!(!math.contains("itemize"));
        assert!(catalog.verbatim_environments().contains("verbatim"));
    }
}
