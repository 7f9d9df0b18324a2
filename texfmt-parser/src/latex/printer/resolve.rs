//! Document resolution
//!
//! Turns a [`Doc`] into text for a print width and an indentation unit. The algorithm
//! is a command stack of `(indentation, mode, doc)` entries:
//!
//! - a group is tried flat first; it breaks if the flat rendering of the group plus the
//!   rest of the current line does not fit
//! - a fill measures each content part and breaks only the separators it has to
//! - line suffixes are buffered and flushed right before the next line break
//! - trailing blanks are removed from every finished line
//!
//! Hard lines inside a group mark it broken before printing starts, so a flat attempt
//! never has to discover them.

use super::doc::{Doc, LineKind};

/// The unit added by each [`Doc::Indent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indentation {
    /// One tab, counted as `width` columns
    Tabs { width: usize },
    Spaces(usize),
}

impl Indentation {
    fn unit(self) -> (String, usize) {
        match self {
            Indentation::Tabs { width } => ("\t".to_string(), width),
            Indentation::Spaces(count) => (" ".repeat(count), count),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Indent {
    value: String,
    length: usize,
}

impl Indent {
    fn deeper(&self, indentation: Indentation) -> Indent {
        let (unit, length) = indentation.unit();
        Indent {
            value: format!("{}{}", self.value, unit),
            length: self.length + length,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Break,
    Flat,
}

/// What a command prints: a doc, or a slice of parts printed in sequence or as a fill.
#[derive(Debug, Clone, Copy)]
enum Item<'d> {
    Doc(&'d Doc),
    Concat(&'d [Doc]),
    Fill(&'d [Doc]),
}

#[derive(Debug, Clone)]
struct Command<'d> {
    indent: Indent,
    mode: Mode,
    item: Item<'d>,
}

/// Mark every group that contains a forced break as broken. Returns whether `doc`
/// forces its parent to break.
pub fn propagate_breaks(doc: &mut Doc) -> bool {
    match doc {
        Doc::BreakParent | Doc::Line(LineKind::Hard) => true,
        Doc::Text(_) | Doc::Line(_) => false,
        Doc::Concat(parts) | Doc::Fill(parts) => parts
            .iter_mut()
            .fold(false, |breaks, part| propagate_breaks(part) || breaks),
        Doc::Group {
            contents,
            should_break,
        } => {
            if propagate_breaks(contents) {
                *should_break = true;
            }
            *should_break
        }
        Doc::Indent(contents) | Doc::LineSuffix(contents) => propagate_breaks(contents),
    }
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Whether `next` fits in `width` columns, continuing into `rest` (from the top of the
/// stack down) until the first line break.
fn fits<'d>(next: &Command<'d>, rest: &[Command<'d>], width: isize, must_be_flat: bool) -> bool {
    let mut remaining = width;
    let mut rest_index = rest.len();
    let mut stack: Vec<(Mode, Item<'d>)> = vec![(next.mode, next.item)];

    while remaining >= 0 {
        let Some((mode, item)) = stack.pop() else {
            if rest_index == 0 {
                return true;
            }
            rest_index -= 1;
            stack.push((rest[rest_index].mode, rest[rest_index].item));
            continue;
        };

        let doc = match item {
            Item::Doc(doc) => doc,
            Item::Concat(parts) | Item::Fill(parts) => {
                stack.extend(parts.iter().rev().map(|part| (mode, Item::Doc(part))));
                continue;
            }
        };

        match doc {
            Doc::Text(text) => remaining -= text_width(text) as isize,
            Doc::Concat(parts) | Doc::Fill(parts) => {
                stack.extend(parts.iter().rev().map(|part| (mode, Item::Doc(part))));
            }
            Doc::Indent(contents) => stack.push((mode, Item::Doc(contents))),
            Doc::Group {
                contents,
                should_break,
            } => {
                if must_be_flat && *should_break {
                    return false;
                }
                let group_mode = if *should_break { Mode::Break } else { mode };
                stack.push((group_mode, Item::Doc(contents)));
            }
            Doc::Line(kind) => {
                if mode == Mode::Break || *kind == LineKind::Hard {
                    return true;
                }
                if *kind == LineKind::Normal {
                    remaining -= 1;
                }
            }
            Doc::LineSuffix(_) | Doc::BreakParent => {}
        }
    }
    false
}

struct Printer<'d> {
    width: usize,
    indentation: Indentation,
    out: String,
    position: usize,
    commands: Vec<Command<'d>>,
    line_suffixes: Vec<Command<'d>>,
    should_remeasure: bool,
}

impl<'d> Printer<'d> {
    fn remaining(&self) -> isize {
        self.width as isize - self.position as isize
    }

    fn push(&mut self, indent: Indent, mode: Mode, item: Item<'d>) {
        self.commands.push(Command { indent, mode, item });
    }

    fn write_text(&mut self, text: &str) {
        self.out.push_str(text);
        match text.rfind('\n') {
            Some(newline) => self.position = text_width(&text[newline + 1..]),
            None => self.position += text_width(text),
        }
    }

    fn newline(&mut self, indent: &Indent) {
        let trimmed = self.out.trim_end_matches([' ', '\t']).len();
        self.out.truncate(trimmed);
        self.out.push('\n');
        self.out.push_str(&indent.value);
        self.position = indent.length;
    }

    fn run(&mut self) {
        loop {
            let Some(command) = self.commands.pop() else {
                if self.line_suffixes.is_empty() {
                    break;
                }
                let suffixes = std::mem::take(&mut self.line_suffixes);
                self.commands.extend(suffixes.into_iter().rev());
                continue;
            };
            let Command { indent, mode, item } = command;
            let doc = match item {
                Item::Doc(doc) => doc,
                Item::Concat(parts) => {
                    for part in parts.iter().rev() {
                        self.push(indent.clone(), mode, Item::Doc(part));
                    }
                    continue;
                }
                Item::Fill(parts) => {
                    self.fill(indent, mode, parts);
                    continue;
                }
            };

            match doc {
                Doc::Text(text) => self.write_text(text),
                Doc::Concat(parts) => {
                    for part in parts.iter().rev() {
                        self.push(indent.clone(), mode, Item::Doc(part));
                    }
                }
                Doc::Fill(parts) => self.fill(indent, mode, parts),
                Doc::Indent(contents) => {
                    let deeper = indent.deeper(self.indentation);
                    self.push(deeper, mode, Item::Doc(contents));
                }
                Doc::Group {
                    contents,
                    should_break,
                } => self.group(indent, mode, contents, *should_break),
                Doc::LineSuffix(contents) => self.line_suffixes.push(Command {
                    indent,
                    mode,
                    item: Item::Doc(contents),
                }),
                Doc::BreakParent => {}
                Doc::Line(kind) => {
                    if mode == Mode::Flat {
                        match kind {
                            LineKind::Soft => continue,
                            LineKind::Normal => {
                                self.write_text(" ");
                                continue;
                            }
                            // Printed broken even inside a flat group
                            LineKind::Hard => self.should_remeasure = true,
                        }
                    }
                    if !self.line_suffixes.is_empty() {
                        self.push(indent, mode, item);
                        let suffixes = std::mem::take(&mut self.line_suffixes);
                        self.commands.extend(suffixes.into_iter().rev());
                        continue;
                    }
                    self.newline(&indent);
                }
            }
        }
    }

    fn group(&mut self, indent: Indent, mode: Mode, contents: &'d Doc, should_break: bool) {
        if mode == Mode::Flat && !self.should_remeasure {
            let mode = if should_break { Mode::Break } else { Mode::Flat };
            self.push(indent, mode, Item::Doc(contents));
            return;
        }
        self.should_remeasure = false;
        let flat = Command {
            indent: indent.clone(),
            mode: Mode::Flat,
            item: Item::Doc(contents),
        };
        if !should_break && fits(&flat, &self.commands, self.remaining(), false) {
            self.commands.push(flat);
        } else {
            self.push(indent, Mode::Break, Item::Doc(contents));
        }
    }

    fn fill(&mut self, indent: Indent, mode: Mode, parts: &'d [Doc]) {
        let Some(content) = parts.first() else {
            return;
        };
        let remaining = self.remaining();
        let content_flat = Command {
            indent: indent.clone(),
            mode: Mode::Flat,
            item: Item::Doc(content),
        };
        let content_fits = fits(&content_flat, &[], remaining, true);
        let content_cmd = if content_fits {
            content_flat
        } else {
            Command {
                mode: Mode::Break,
                ..content_flat
            }
        };

        let Some(separator) = parts.get(1) else {
            self.commands.push(content_cmd);
            return;
        };
        if parts.len() == 2 {
            let separator_mode = if content_fits { Mode::Flat } else { Mode::Break };
            self.push(indent.clone(), separator_mode, Item::Doc(separator));
            self.commands.push(content_cmd);
            return;
        }

        let pair_flat = Command {
            indent: indent.clone(),
            mode: Mode::Flat,
            item: Item::Concat(&parts[..3]),
        };
        let pair_fits = fits(&pair_flat, &[], remaining, true);

        self.push(indent.clone(), mode, Item::Fill(&parts[2..]));
        let separator_mode = if pair_fits { Mode::Flat } else { Mode::Break };
        self.push(indent, separator_mode, Item::Doc(separator));
        self.commands.push(content_cmd);
    }
}

/// Resolve `doc` into text.
pub fn print_doc(mut doc: Doc, width: usize, indentation: Indentation) -> String {
    propagate_breaks(&mut doc);
    let mut printer = Printer {
        width,
        indentation,
        out: String::new(),
        position: 0,
        commands: Vec::new(),
        line_suffixes: Vec::new(),
        should_remeasure: false,
    };
    printer.push(Indent::default(), Mode::Break, Item::Doc(&doc));
    printer.run();
    printer.out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Doc {
        let mut parts = Vec::new();
        for (index, word) in text.split(' ').enumerate() {
            if index > 0 {
                parts.push(Doc::line());
            }
            parts.push(Doc::text(word));
        }
        Doc::fill(parts)
    }

    fn print(doc: Doc, width: usize) -> String {
        print_doc(doc, width, Indentation::Spaces(2))
    }

    #[test]
    fn test_fill_wraps_greedily() {
        assert_eq!(
            print(words("aaa bbb ccc ddd eee"), 11),
            "aaa bbb ccc\nddd eee"
        );
    }

    #[test]
    fn test_fill_keeps_long_word_alone() {
        assert_eq!(print(words("a bbbbbbbbbb c"), 5), "a\nbbbbbbbbbb\nc");
    }

    #[test]
    fn test_group_flat_when_it_fits() {
        let doc = Doc::group(Doc::concat(vec![
            Doc::text("a"),
            Doc::line(),
            Doc::text("b"),
        ]));
        assert_eq!(print(doc.clone(), 10), "a b");
        assert_eq!(print(doc, 2), "a\nb");
    }

    #[test]
    fn test_hardline_breaks_enclosing_group() {
        let doc = Doc::group(Doc::concat(vec![
            Doc::text("a"),
            Doc::line(),
            Doc::text("b"),
            Doc::hardline(),
            Doc::text("c"),
        ]));
        assert_eq!(print(doc, 80), "a\nb\nc");
    }

    #[test]
    fn test_indent_applies_after_breaks() {
        let doc = Doc::concat(vec![
            Doc::text("begin"),
            Doc::indent(Doc::concat(vec![Doc::hardline(), Doc::text("body")])),
            Doc::hardline(),
            Doc::text("end"),
        ]);
        assert_eq!(print(doc.clone(), 80), "begin\n  body\nend");
        assert_eq!(
            print_doc(doc, 80, Indentation::Tabs { width: 4 }),
            "begin\n\tbody\nend"
        );
    }

    #[test]
    fn test_line_suffix_flushes_before_newline() {
        let doc = Doc::concat(vec![
            Doc::text("a"),
            Doc::line_suffix(Doc::text(" %c")),
            Doc::text(" b"),
            Doc::hardline(),
            Doc::text("d"),
        ]);
        assert_eq!(print(doc, 80), "a b %c\nd");
    }

    #[test]
    fn test_line_suffix_flushes_at_end() {
        let doc = Doc::concat(vec![Doc::text("a"), Doc::line_suffix(Doc::text("%c"))]);
        assert_eq!(print(doc, 80), "a%c");
    }

    #[test]
    fn test_trailing_blanks_are_trimmed() {
        let doc = Doc::concat(vec![
            Doc::indent(Doc::concat(vec![Doc::hardline(), Doc::hardline()])),
            Doc::text("x"),
        ]);
        assert_eq!(print(doc, 80), "\n\n  x");
    }

    #[test]
    fn test_softline() {
        let doc = Doc::group(Doc::concat(vec![
            Doc::text("ab"),
            Doc::softline(),
            Doc::text("cd"),
        ]));
        assert_eq!(print(doc.clone(), 4), "abcd");
        assert_eq!(print(doc, 3), "ab\ncd");
    }
}
