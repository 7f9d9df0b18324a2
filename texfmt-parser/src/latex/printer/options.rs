//! Formatting options

use super::resolve::Indentation;
use crate::latex::alignment::Padding;
use serde::{Deserialize, Serialize};

/// Options accepted by [`format_source`](super::format_source). Deserializes from
/// camelCase keys (`printWidth`, `useTabs`, `tabWidth`, `alignPadding`); unknown keys
/// are ignored and missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    pub print_width: usize,
    pub use_tabs: bool,
    /// Columns per indentation level, also the width a tab counts for
    pub tab_width: usize,
    pub align_padding: Padding,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            print_width: 80,
            use_tabs: false,
            tab_width: 2,
            align_padding: Padding::default(),
        }
    }
}

impl FormatOptions {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_print_width(mut self, print_width: usize) -> Self {
        self.print_width = print_width;
        self
    }

    pub fn with_tabs(mut self, use_tabs: bool) -> Self {
        self.use_tabs = use_tabs;
        self
    }

    pub fn indentation(&self) -> Indentation {
        if self.use_tabs {
            Indentation::Tabs {
                width: self.tab_width,
            }
        } else {
            Indentation::Spaces(self.tab_width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_with_unknown_keys() {
        let options =
            FormatOptions::from_json(r#"{"printWidth": 30, "useTabs": true, "plugins": []}"#)
                .unwrap();
        assert_eq!(options.print_width, 30);
        assert!(options.use_tabs);
        assert_eq!(options.tab_width, 2);
        assert_eq!(options.indentation(), Indentation::Tabs { width: 2 });
    }

    #[test]
    fn test_padding_from_json() {
        let options = FormatOptions::from_json(r#"{"alignPadding": "center"}"#).unwrap();
        assert_eq!(options.align_padding, Padding::Center);
    }
}
