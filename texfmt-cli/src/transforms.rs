//! CLI-specific transforms
//!
//! Each output name pairs a pipeline stage with a serialization. All of them run
//! against the catalog and format options resolved from configuration.

use std::sync::Arc;
use texfmt_parser::latex::catalog::Catalog;
use texfmt_parser::latex::transforms::standard::{formatting_with, parsing_with, TOKENIZATION};
use texfmt_parser::latex::FormatOptions;

/// All available outputs, the first being the default
pub const AVAILABLE_OUTPUTS: &[&str] = &["formatted", "raw", "ast-json", "ast-yaml", "token-json"];

/// Execute a named output on a source string
pub fn execute_output(
    source: &str,
    output: &str,
    catalog: Arc<Catalog>,
    options: &FormatOptions,
) -> Result<String, String> {
    match output {
        "formatted" => formatting_with(catalog, options.clone())
            .run(source.to_string())
            .map_err(|e| format!("Transform failed: {}", e)),
        "raw" => {
            let root = parse(source, catalog)?;
            Ok(texfmt_parser::latex::print_raw(&root.content))
        }
        "ast-json" => {
            let root = parse(source, catalog)?;
            serde_json::to_string_pretty(&root)
                .map_err(|e| format!("JSON serialization failed: {}", e))
        }
        "ast-yaml" => {
            let root = parse(source, catalog)?;
            serde_yaml::to_string(&root).map_err(|e| format!("YAML serialization failed: {}", e))
        }
        "token-json" => {
            let tokens = TOKENIZATION
                .run(source.to_string())
                .map_err(|e| format!("Transform failed: {}", e))?;
            let tokens: Vec<_> = tokens
                .iter()
                .map(|(token, span)| {
                    serde_json::json!({
                        "token": token,
                        "text": &source[span.clone()],
                        "start": span.start,
                        "end": span.end,
                    })
                })
                .collect();
            serde_json::to_string_pretty(&tokens)
                .map_err(|e| format!("JSON serialization failed: {}", e))
        }
        other => Err(format!(
            "Unknown output '{}'. Available outputs: {}",
            other,
            AVAILABLE_OUTPUTS.join(", ")
        )),
    }
}

fn parse(source: &str, catalog: Arc<Catalog>) -> Result<texfmt_parser::latex::Root, String> {
    parsing_with(catalog)
        .run(source.to_string())
        .map_err(|e| format!("Transform failed: {}", e))
}
