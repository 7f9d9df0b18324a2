//! Built-in definitions for LaTeX2e and the common AMS environments.

use super::{Catalog, ContentProcessor, EnvironmentInfo, MacroInfo};

const SECTIONING: &[&str] = &[
    "part",
    "chapter",
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
];

/// Text-styling macros whose argument flows with the paragraph.
const INLINE_STYLES: &[&str] = &[
    "textbf",
    "textit",
    "textrm",
    "textsf",
    "texttt",
    "textsc",
    "textsl",
    "textup",
    "textmd",
    "emph",
    "underline",
];

/// Macros that switch their argument back to text mode.
const TEXT_IN_MATH: &[&str] = &["text", "mbox", "textnormal", "intertext"];

const SINGLE_ARGUMENT: &[&str] = &[
    "label",
    "ref",
    "eqref",
    "pageref",
    "url",
    "title",
    "author",
    "date",
    "hbox",
    "input",
    "include",
    "mathbf",
    "mathrm",
    "mathit",
    "mathcal",
    "mathbb",
    "mathsf",
    "mathtt",
    "mathfrak",
    "operatorname",
    "overline",
    "underbrace",
    "overbrace",
    "hat",
    "bar",
    "vec",
    "tilde",
    "dot",
    "ddot",
    "cline",
];

const TWO_ARGUMENTS: &[&str] = &["frac", "dfrac", "tfrac", "binom", "href", "setlength"];

/// Math environments whose bodies are `&`/`\\` tables.
const ALIGNED_MATH: &[&str] = &[
    "align",
    "align*",
    "aligned",
    "flalign",
    "flalign*",
    "eqnarray",
    "eqnarray*",
    "split",
    "cases",
    "matrix",
    "pmatrix",
    "bmatrix",
    "Bmatrix",
    "vmatrix",
    "Vmatrix",
    "smallmatrix",
];

const PLAIN_MATH: &[&str] = &[
    "equation",
    "equation*",
    "gather",
    "gather*",
    "gathered",
    "multline",
    "multline*",
    "displaymath",
    "math",
];

const LISTS: &[&str] = &["itemize", "enumerate", "description"];

const VERBATIM: &[&str] = &["verbatim", "verbatim*", "Verbatim", "lstlisting", "comment"];

const TRIMMED: &[&str] = &[
    "document",
    "center",
    "flushleft",
    "flushright",
    "quote",
    "quotation",
    "abstract",
];

pub fn catalog() -> Catalog {
    let mut catalog = Catalog::new();

    catalog.define_macro("\\", MacroInfo::new("!s !o").break_after());
    catalog.define_macro("item", MacroInfo::new("o").hanging_indent());
    for name in SECTIONING {
        catalog.define_macro(*name, MacroInfo::new("s o m").break_around());
    }
    for name in INLINE_STYLES {
        catalog.define_macro(*name, MacroInfo::new("m").in_par_mode());
    }
    for name in TEXT_IN_MATH {
        catalog.define_macro(*name, MacroInfo::new("m").in_math_mode(false));
    }
    for name in SINGLE_ARGUMENT {
        catalog.define_macro(*name, MacroInfo::new("m"));
    }
    for name in TWO_ARGUMENTS {
        catalog.define_macro(*name, MacroInfo::new("m m"));
    }
    catalog.define_macro("footnote", MacroInfo::new("o m").in_par_mode());
    catalog.define_macro("caption", MacroInfo::new("o m").in_par_mode());
    catalog.define_macro("cite", MacroInfo::new("o m"));
    catalog.define_macro("sqrt", MacroInfo::new("o m"));
    catalog.define_macro("includegraphics", MacroInfo::new("s o o m"));
    catalog.define_macro("documentclass", MacroInfo::new("o m").break_after());
    catalog.define_macro("usepackage", MacroInfo::new("o m").break_after());
    for name in ["newcommand", "renewcommand", "providecommand"] {
        catalog.define_macro(name, MacroInfo::new("s m o o m").break_around());
    }
    for name in ["newenvironment", "renewenvironment"] {
        catalog.define_macro(name, MacroInfo::new("s m o o m m").break_around());
    }
    catalog.define_macro("vspace", MacroInfo::new("s m"));
    catalog.define_macro("hspace", MacroInfo::new("s m"));
    catalog.define_macro("multicolumn", MacroInfo::new("m m m"));
    catalog.define_macro("hline", MacroInfo::new(""));

    for name in LISTS {
        catalog.define_environment(
            *name,
            EnvironmentInfo::new("o").processor(ContentProcessor::ListBody {
                item: "item".to_string(),
            }),
        );
    }
    catalog.define_environment("tabular", EnvironmentInfo::new("o m").aligned());
    catalog.define_environment("tabular*", EnvironmentInfo::new("m o m").aligned());
    catalog.define_environment("array", EnvironmentInfo::new("o m").math().aligned());
    catalog.define_environment("alignat", EnvironmentInfo::new("m").math().aligned());
    catalog.define_environment("alignat*", EnvironmentInfo::new("m").math().aligned());
    for name in ALIGNED_MATH {
        catalog.define_environment(*name, EnvironmentInfo::new("").math().aligned());
    }
    for name in PLAIN_MATH {
        catalog.define_environment(*name, EnvironmentInfo::new("").math());
    }
    for name in ["figure", "figure*", "table", "table*"] {
        catalog.define_environment(name, EnvironmentInfo::new("o"));
    }
    catalog.define_environment("minipage", EnvironmentInfo::new("o o o m"));
    for name in TRIMMED {
        catalog.define_environment(
            *name,
            EnvironmentInfo::new("").processor(ContentProcessor::TrimWhitespace),
        );
    }
    for name in VERBATIM {
        catalog.define_environment(*name, EnvironmentInfo::verbatim());
    }

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representative_entries() {
        let catalog = catalog();
        assert_eq!(
            catalog.macro_info("\\").and_then(|i| i.signature.as_deref()),
            Some("!s !o")
        );
        assert!(catalog.macro_info("item").unwrap().render_info.hanging_indent);
        assert_eq!(
            catalog.macro_info("text").unwrap().render_info.in_math_mode,
            Some(false)
        );
        let tabular = catalog.environment_info("tabular").unwrap();
        assert!(tabular.render_info.aligned_content);
        assert!(!tabular.math);
        assert!(catalog.environment_info("pmatrix").unwrap().math);
    }

    #[test]
    fn test_all_signatures_parse_cleanly() {
        let catalog = catalog();
        for signature in catalog
            .macro_signatures()
            .values()
            .chain(catalog.environment_signatures().values())
        {
            assert!(signature.diagnostics.is_empty(), "{:?}", signature);
        }
    }
}
