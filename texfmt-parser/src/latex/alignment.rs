//! Alignment engine
//!
//! Bodies of tabular-like environments are split into rows on row separators (`\\`,
//! `\hline`, `\cr`) and into cells on column separators (`&`). Cells are measured with
//! the raw printer, and each column is padded so every separator of a column lands on
//! the same character position:
//!
//! ```text
//! a & bbb \\          a   & bbb \\
//! cc & d \\     =>    cc  & d   \\
//! eeee \\             eeee      \\
//! ```
//!
//! Comments never sit inside a cell. A comment ends the row it follows (it is printed
//! at the end of that row), and a comment on a line of its own becomes a row of its own.
//! A paragraph break ends the row too and prints as an empty line.

use crate::latex::ast::{trim, Node};
use crate::latex::formats::raw::{print_raw, print_raw_node};
use serde::{Deserialize, Serialize};

/// Which tokens split a body into rows and cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separators {
    /// Strings that separate cells
    pub col_seps: Vec<String>,
    /// Macro names that end a row
    pub row_seps: Vec<String>,
}

impl Default for Separators {
    fn default() -> Self {
        Separators {
            col_seps: vec!["&".to_string()],
            row_seps: vec!["\\".to_string(), "hline".to_string(), "cr".to_string()],
        }
    }
}

impl Separators {
    fn is_col_sep(&self, node: &Node) -> bool {
        node.as_string()
            .is_some_and(|text| self.col_seps.iter().any(|sep| sep == text))
    }

    fn is_row_sep(&self, node: &Node) -> bool {
        node.as_macro()
            .is_some_and(|m| self.row_seps.iter().any(|sep| *sep == m.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    pub cells: Vec<Vec<Node>>,
    /// `col_seps[j]` follows `cells[j]`
    pub col_seps: Vec<Node>,
    pub row_sep: Option<Node>,
    pub trailing_comment: Option<Node>,
}

impl Row {
    fn new() -> Self {
        Row {
            cells: vec![Vec::new()],
            ..Row::default()
        }
    }

    /// No separators and nothing but blanks in the cells.
    fn is_blank(&self) -> bool {
        self.col_seps.is_empty()
            && self.row_sep.is_none()
            && self.cells.iter().flatten().all(Node::is_space)
    }

    /// Some cell prints over more than one line, e.g. a group holding a comment.
    pub fn spans_lines(&self) -> bool {
        self.cells.iter().any(|cell| print_raw(cell).contains('\n'))
    }

    fn comment_only(comment: Node) -> Self {
        Row {
            trailing_comment: Some(comment),
            ..Row::default()
        }
    }
}

/// Split an aligned body into rows.
pub fn split_rows(content: &[Node], separators: &Separators) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::new();
    let mut current = Row::new();

    for node in content {
        if separators.is_row_sep(node) {
            current.row_sep = Some(node.clone());
            rows.push(std::mem::replace(&mut current, Row::new()));
        } else if separators.is_col_sep(node) {
            current.col_seps.push(node.clone());
            current.cells.push(Vec::new());
        } else if node.is_parbreak() {
            if !current.is_blank() {
                rows.push(std::mem::replace(&mut current, Row::new()));
            } else {
                current = Row::new();
            }
            // No cells: prints as an empty line
            rows.push(Row::default());
        } else if let Node::Comment(comment) = node {
            if !current.is_blank() {
                current.trailing_comment = Some(node.clone());
                rows.push(std::mem::replace(&mut current, Row::new()));
                continue;
            }
            match rows.last_mut() {
                Some(previous) if comment.sameline && previous.trailing_comment.is_none() => {
                    previous.trailing_comment = Some(node.clone());
                }
                _ => rows.push(Row::comment_only(node.clone())),
            }
        } else if let Some(cell) = current.cells.last_mut() {
            cell.push(node.clone());
        }
    }
    if !current.is_blank() {
        rows.push(current);
    }

    for row in &mut rows {
        for cell in &mut row.cells {
            trim(cell);
        }
    }
    rows
}

/// Where padding goes relative to the cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Text first, padding after it
    #[default]
    Right,
    /// Padding first, text flush against the separator
    Left,
    Center,
}

fn pad(text: &str, width: usize, padding: Padding) -> String {
    let missing = width.saturating_sub(text.chars().count());
    let (before, after) = match padding {
        Padding::Right => (0, missing),
        Padding::Left => (missing, 0),
        Padding::Center => (missing / 2, missing - missing / 2),
    };
    format!("{}{}{}", " ".repeat(before), text, " ".repeat(after))
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Per-column widths: the longest cell plus its separator.
pub fn column_widths(rows: &[Row]) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (j, cell) in row.cells.iter().enumerate() {
            let sep = row.col_seps.get(j).map_or(0, |sep| char_len(&print_raw_node(sep)));
            let width = char_len(&print_raw(cell)) + sep;
            if j == widths.len() {
                widths.push(width);
            } else {
                widths[j] = widths[j].max(width);
            }
        }
    }
    widths
}

/// Render rows as padded text lines, one per row.
///
/// A column followed by a separator in any row occupies its width plus one blank, so
/// row separators line up even on rows with fewer cells.
pub fn align_rows(rows: &[Row], padding: Padding) -> Vec<String> {
    let widths = column_widths(rows);
    let separated = rows.iter().map(|row| row.col_seps.len()).max().unwrap_or(0);
    let slots: Vec<usize> = widths
        .iter()
        .enumerate()
        .map(|(j, width)| if j < separated { width + 1 } else { *width })
        .collect();
    rows.iter()
        .map(|row| render_row(row, &widths, &slots, padding))
        .collect()
}

fn render_row(row: &Row, widths: &[usize], slots: &[usize], padding: Padding) -> String {
    let mut line = String::new();
    for (j, cell) in row.cells.iter().enumerate() {
        let text = print_raw(cell);
        if j > 0 {
            line.push(' ');
        }
        match row.col_seps.get(j) {
            Some(sep) => {
                let sep = print_raw_node(sep);
                let padded = pad(&text, widths[j].saturating_sub(char_len(&sep)), padding);
                line.push_str(&padded);
                if !padded.is_empty() {
                    line.push(' ');
                }
                line.push_str(&sep);
            }
            None if row.row_sep.is_some() => line.push_str(&pad(&text, slots[j], padding)),
            None => line.push_str(&text),
        }
    }
    if row.row_sep.is_some() {
        for slot in slots.iter().skip(row.cells.len()) {
            line.push(' ');
            line.push_str(&" ".repeat(*slot));
        }
    }
    if let Some(sep) = &row.row_sep {
        push_word(&mut line, &print_raw_node(sep));
    }
    if let Some(comment) = &row.trailing_comment {
        push_word(&mut line, &print_comment(comment));
    }
    line.trim_end().to_string()
}

fn push_word(line: &mut String, word: &str) {
    if line.trim().is_empty() {
        line.clear();
    } else {
        line.push(' ');
    }
    line.push_str(word);
}

fn print_comment(node: &Node) -> String {
    match node {
        Node::Comment(comment) => format!("%{}", comment.content),
        other => print_raw_node(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::parsing::{parse_math, parse_minimal, ParseOptions};
    use rstest::rstest;

    fn rows(source: &str) -> Vec<Row> {
        split_rows(&parse_math(source).unwrap(), &Separators::default())
    }

    fn aligned(source: &str, padding: Padding) -> Vec<String> {
        align_rows(&rows(source), padding)
    }

    #[test]
    fn test_split_rows_and_cells() {
        let rows = rows(r"a & b \\ c & d");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells, vec![vec![Node::string("a")], vec![Node::string("b")]]);
        assert!(rows[0].row_sep.is_some());
        assert!(rows[1].row_sep.is_none());
        assert_eq!(rows[1].col_seps.len(), 1);
    }

    #[test]
    fn test_columns_line_up() {
        assert_eq!(
            aligned(r"a & bbb \\ cc & d \\ eeee \\", Padding::Right),
            vec![r"a   & bbb \\", r"cc  & d   \\", r"eeee      \\"]
        );
    }

    #[rstest]
    #[case(Padding::Right, vec![r"a   & b \\", r"ccc & d"])]
    #[case(Padding::Left, vec![r"  a & b \\", r"ccc & d"])]
    #[case(Padding::Center, vec![r" a  & b \\", r"ccc & d"])]
    fn test_padding_modes(#[case] padding: Padding, #[case] expected: Vec<&str>) {
        assert_eq!(aligned(r"a & b \\ ccc & d", padding), expected);
    }

    #[test]
    fn test_hline_rows_and_ragged_rows() {
        assert_eq!(
            aligned(r"\hline a & b & c \\ d \\ \hline", Padding::Right),
            vec![
                r"\hline".to_string(),
                r"a & b & c \\".to_string(),
                format!(r"d{}\\", " ".repeat(9)),
                r"\hline".to_string(),
            ]
        );
    }

    #[test]
    fn test_comments_end_rows() {
        let source = "a & b \\\\ % first\n% own line\nc & d";
        let lines = aligned(source, Padding::Right);
        assert_eq!(lines, vec![r"a & b \\ % first", "% own line", "c & d"]);
    }

    #[test]
    fn test_row_separator_arguments_are_kept() {
        let root = crate::latex::parsing::parse(r"\begin{align*} a \\[2pt] b \end{align*}").unwrap();
        let body = &root.content[0].as_environment().unwrap().content;
        let rows = split_rows(body, &Separators::default());
        assert_eq!(align_rows(&rows, Padding::Right), vec![r"a \\[2pt]", "b"]);
    }

    #[test]
    fn test_separator_columns_are_consistent() {
        let lines = aligned(r"x &= 1 + 2 \\ y_1 &= 3 \\ z &", Padding::Right);
        let positions: Vec<_> = lines.iter().map(|l| l.find('&')).collect();
        assert!(positions.windows(2).all(|w| w[0] == w[1]), "{:?}", lines);
    }

    #[test]
    fn test_parbreak_becomes_empty_line() {
        let content = parse_minimal("a & b \\\\\n\nc & d", &ParseOptions::default())
            .unwrap()
            .content;
        let rows = split_rows(&content, &Separators::default());
        assert_eq!(rows.len(), 3);
        assert_eq!(
            align_rows(&rows, Padding::Right),
            vec![r"a & b \\", "", "c & d"]
        );
    }

    #[test]
    fn test_group_with_comment_spans_lines() {
        let content = parse_minimal("a & {b % c\n} \\\\ d & e", &ParseOptions::default())
            .unwrap()
            .content;
        let rows = split_rows(&content, &Separators::default());
        assert!(rows[0].spans_lines());
        assert!(!rows[1].spans_lines());
    }

    #[test]
    fn test_blank_body() {
        let content = parse_minimal(" \n ", &ParseOptions::default()).unwrap().content;
        assert!(split_rows(&content, &Separators::default()).is_empty());
    }
}
