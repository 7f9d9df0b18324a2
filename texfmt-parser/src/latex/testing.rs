//! Testing utilities
//!
//!     Tree assertions and formatting checks shared by unit and integration tests.
//!
//! Tree Assertions
//!
//!     Walking the tree by hand in a test means a `match` and a `panic!` per level. The
//!     fluent API does the matching and reports where in the tree an expectation failed:
//!
//!     ```rust,ignore
//!     use texfmt_parser::latex::testing::assert_tree;
//!
//!     let root = parse(r"\frac{1}{2}").unwrap();
//!     assert_tree(&root)
//!         .node_count(1)
//!         .node(0, |node| {
//!             node.assert_macro()
//!                 .name("frac")
//!                 .arg_count(2)
//!                 .arg(1, |arg| arg.marks("{", "}").raw("2"))
//!         });
//!     ```
//!
//! Formatting Checks
//!
//!     [`assert_formats`] compares formatter output, [`assert_stable`] checks that
//!     formatting its own output changes nothing.
//!
//! Samples
//!
//!     Whole documents used by integration tests live under `fixtures/` at the workspace
//!     root and are loaded with [`samples::load`].

mod assertions;

pub use assertions::{
    assert_nodes, assert_tree, ArgumentAssertion, CommentAssertion, EnvironmentAssertion,
    MacroAssertion, MathAssertion, NodeAssertion, NodesAssertion, RawMatch,
};

use crate::latex::printer::{format_source, FormatOptions};

/// Get a path relative to the workspace root for testing purposes.
pub fn workspace_path(relative_path: &str) -> std::path::PathBuf {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .join(relative_path)
}

/// Format `source` and compare against `expected`, showing both on failure.
pub fn assert_formats(source: &str, options: &FormatOptions, expected: &str) {
    let actual = match format_source(source, options) {
        Ok(text) => text,
        Err(err) => panic!("failed to parse {:?}: {}", source, err),
    };
    assert_eq!(
        actual, expected,
        "formatting {:?}\n--- got ---\n{}\n--- expected ---\n{}",
        source, actual, expected
    );
}

/// Format `source` twice and check the second pass is a no-op. Returns the output.
pub fn assert_stable(source: &str, options: &FormatOptions) -> String {
    let once = match format_source(source, options) {
        Ok(text) => text,
        Err(err) => panic!("failed to parse {:?}: {}", source, err),
    };
    let twice = match format_source(&once, options) {
        Ok(text) => text,
        Err(err) => panic!("formatted output no longer parses: {}\n{}", err, once),
    };
    assert_eq!(once, twice, "formatting is not stable for {:?}", source);
    once
}

pub mod samples {
    //! Sample documents under `fixtures/`.

    use super::workspace_path;

    /// Read `fixtures/<name>.tex`.
    pub fn load(name: &str) -> String {
        let path = workspace_path(&format!("fixtures/{}.tex", name));
        match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => panic!("cannot read sample {}: {}", path.display(), err),
        }
    }

    /// Names of every sample, sorted.
    pub fn names() -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(workspace_path("fixtures"))
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter_map(|entry| {
                        let path = entry.path();
                        if path.extension()? != "tex" {
                            return None;
                        }
                        path.file_stem()?.to_str().map(str::to_string)
                    })
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}
