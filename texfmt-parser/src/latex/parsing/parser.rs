//! Recursive-descent construction of the raw tree
//!
//! The parser works directly on the token cursor. Each nesting construct (group, math,
//! environment) recurses into [`Parser::parse_sequence`] with the terminator that closes
//! it. Arguments are not attached here; macros come out with `args: None`.

use super::error::ParseError;
use super::ParseOptions;
use crate::latex::ast::{
    Comment, Environment, EnvironmentKind, EnvironmentRenderInfo, Node, Script, Verbatim, VerbatimKind,
};
use crate::latex::formats::raw::print_raw;
use crate::latex::lexing::{Lexeme, Lexer, Token};
use once_cell::sync::Lazy;
use regex::Regex;

static END_ENVIRONMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\end\s*\{([^}]*)\}").expect("valid \\end pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Text,
    Math,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Terminator {
    Eof,
    CloseBrace,
    Dollar,
    DoubleDollar,
    CloseParen,
    CloseBracket,
    End(String),
}

impl Terminator {
    /// The error for running out of input while waiting for this terminator.
    fn unterminated(&self, offset: usize) -> Option<ParseError> {
        match self {
            Terminator::Eof => None,
            Terminator::CloseBrace => Some(ParseError::UnclosedGroup { offset }),
            Terminator::Dollar => Some(ParseError::UnterminatedMath {
                opening: "$",
                offset,
            }),
            Terminator::DoubleDollar => Some(ParseError::UnterminatedMath {
                opening: "$$",
                offset,
            }),
            Terminator::CloseParen => Some(ParseError::UnterminatedMath {
                opening: "\\(",
                offset,
            }),
            Terminator::CloseBracket => Some(ParseError::UnterminatedMath {
                opening: "\\[",
                offset,
            }),
            Terminator::End(name) => Some(ParseError::UnclosedEnvironment {
                name: name.clone(),
                offset,
            }),
        }
    }
}

pub struct Parser<'s, 'o> {
    lexer: Lexer<'s>,
    options: &'o ParseOptions,
}

impl<'s, 'o> Parser<'s, 'o> {
    pub fn new(source: &'s str, options: &'o ParseOptions) -> Self {
        Parser {
            lexer: Lexer::new(source),
            options,
        }
    }

    /// Parse the whole input in the given mode.
    pub fn parse(mut self, mode: Mode) -> Result<Vec<Node>, ParseError> {
        self.parse_sequence(mode, &Terminator::Eof, 0)
    }

    fn parse_sequence(
        &mut self,
        mode: Mode,
        terminator: &Terminator,
        opened_at: usize,
    ) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        // Source text of the whitespace node at the end of `nodes`, if any
        let mut trailing_space: Option<&'s str> = None;

        loop {
            let Some(lexeme) = self.lexer.next() else {
                return match terminator.unterminated(opened_at) {
                    None => Ok(nodes),
                    Some(err) => Err(err),
                };
            };
            let start = lexeme.span.start;
            let mut space = None;

            match lexeme.token {
                Token::Whitespace => {
                    if Token::is_paragraph_break(lexeme.text) {
                        nodes.push(Node::Parbreak);
                    } else {
                        nodes.push(Node::Whitespace);
                        space = Some(lexeme.text);
                    }
                }
                Token::Comment => self.push_comment(&mut nodes, lexeme.text, trailing_space),
                Token::OpenBrace => {
                    let content = self.parse_sequence(mode, &Terminator::CloseBrace, start)?;
                    nodes.push(Node::group(content));
                }
                Token::CloseBrace => {
                    if *terminator == Terminator::CloseBrace {
                        return Ok(nodes);
                    }
                    return Err(ParseError::UnexpectedCloseBrace { offset: start });
                }
                Token::Dollar => {
                    if *terminator == Terminator::Dollar {
                        return Ok(nodes);
                    }
                    let content = self.parse_sequence(Mode::Math, &Terminator::Dollar, start)?;
                    nodes.push(Node::inline_math(content));
                }
                Token::DoubleDollar => {
                    if *terminator == Terminator::DoubleDollar {
                        return Ok(nodes);
                    }
                    if *terminator == Terminator::Dollar {
                        // `$a$$b$`: the first dollar closes, the second opens
                        self.lexer.push_back(Lexeme {
                            token: Token::Dollar,
                            text: &lexeme.text[1..],
                            span: (start + 1)..lexeme.span.end,
                        });
                        return Ok(nodes);
                    }
                    let content =
                        self.parse_sequence(Mode::Math, &Terminator::DoubleDollar, start)?;
                    nodes.push(Node::display_math(content));
                }
                Token::Caret | Token::Underscore => nodes.push(self.parse_script(mode, lexeme)?),
                Token::ControlSymbol => match lexeme.text {
                    r"\(" => {
                        let content =
                            self.parse_sequence(Mode::Math, &Terminator::CloseParen, start)?;
                        nodes.push(Node::inline_math(content));
                    }
                    r"\[" => {
                        let content =
                            self.parse_sequence(Mode::Math, &Terminator::CloseBracket, start)?;
                        nodes.push(Node::display_math(content));
                    }
                    r"\)" if *terminator == Terminator::CloseParen => return Ok(nodes),
                    r"\]" if *terminator == Terminator::CloseBracket => return Ok(nodes),
                    symbol => nodes.push(Node::macro_named(&symbol[1..])),
                },
                Token::ControlWord => {
                    let name = &lexeme.text[1..];
                    match name {
                        "begin" if self.next_is_open_brace() => {
                            nodes.push(self.parse_environment(mode, start)?);
                        }
                        "end" if self.next_is_open_brace() => {
                            let (_, found) = self.parse_environment_name()?;
                            return match terminator {
                                Terminator::End(expected) if *expected == found => Ok(nodes),
                                Terminator::End(expected) => {
                                    Err(ParseError::MismatchedEnvironment {
                                        expected: expected.clone(),
                                        found,
                                        offset: start,
                                    })
                                }
                                _ => Err(ParseError::UnexpectedEnd {
                                    name: found,
                                    offset: start,
                                }),
                            };
                        }
                        "verb" => nodes.push(self.parse_inline_verbatim(start, lexeme.span.end)?),
                        _ => nodes.push(Node::macro_named(name)),
                    }
                }
                Token::Word | Token::Punct => nodes.push(Node::string(lexeme.text)),
            }

            trailing_space = space;
        }
    }

    /// A comment absorbs the blanks before it and the line break after it.
    fn push_comment(&mut self, nodes: &mut Vec<Node>, text: &'s str, trailing_space: Option<&str>) {
        let (sameline, leading_whitespace) = match trailing_space {
            Some(space) => {
                nodes.pop();
                if space.contains('\n') {
                    let indented = space.rsplit('\n').next().is_some_and(|t| !t.is_empty());
                    (false, indented)
                } else {
                    (true, true)
                }
            }
            None => match nodes.last() {
                Some(Node::Parbreak) | Some(Node::Comment(_)) => (false, false),
                _ => (true, false),
            },
        };

        let following = self
            .lexer
            .peek()
            .filter(|l| l.token == Token::Whitespace && l.text.contains('\n'))
            .map(|l| l.text);
        let suffix_parbreak = match following {
            Some(space) => {
                self.lexer.next();
                Token::is_paragraph_break(space)
            }
            None => false,
        };

        nodes.push(Node::Comment(Comment {
            content: text[1..].to_string(),
            sameline,
            suffix_parbreak,
            leading_whitespace,
        }));
        if suffix_parbreak {
            nodes.push(Node::Parbreak);
        }
    }

    /// `^`/`_` take exactly one operand in math mode and are plain text elsewhere.
    /// Blanks between the marker and its operand are skipped.
    fn parse_script(&mut self, mode: Mode, marker: Lexeme<'s>) -> Result<Node, ParseError> {
        if mode == Mode::Text {
            return Ok(Node::string(marker.text));
        }
        let Some(mut next) = self.lexer.next() else {
            return Ok(Node::string(marker.text));
        };
        let mut skipped = None;
        if next.token == Token::Whitespace && !Token::is_paragraph_break(next.text) {
            let Some(after) = self.lexer.next() else {
                self.lexer.push_back(next);
                return Ok(Node::string(marker.text));
            };
            skipped = Some(std::mem::replace(&mut next, after));
        }
        let operand = match next.token {
            Token::OpenBrace => Node::group(self.parse_sequence(
                Mode::Math,
                &Terminator::CloseBrace,
                next.span.start,
            )?),
            Token::Word => {
                let first = next.text.chars().next().map_or(0, char::len_utf8);
                if first < next.text.len() {
                    self.lexer.push_back(Lexeme {
                        token: Token::Word,
                        text: &next.text[first..],
                        span: (next.span.start + first)..next.span.end,
                    });
                }
                Node::string(&next.text[..first])
            }
            Token::ControlWord | Token::ControlSymbol => Node::macro_named(&next.text[1..]),
            Token::Punct => Node::string(next.text),
            _ => {
                self.lexer.push_back(next);
                if let Some(space) = skipped {
                    self.lexer.push_back(space);
                }
                return Ok(Node::string(marker.text));
            }
        };
        let script = Script {
            content: Box::new(operand),
        };
        Ok(match marker.token {
            Token::Caret => Node::Superscript(script),
            _ => Node::Subscript(script),
        })
    }

    fn next_is_open_brace(&mut self) -> bool {
        matches!(self.lexer.peek(), Some(l) if l.token == Token::OpenBrace)
    }

    fn parse_environment_name(&mut self) -> Result<(Vec<Node>, String), ParseError> {
        let open = self.lexer.offset();
        self.lexer.next();
        let nodes = self.parse_sequence(Mode::Text, &Terminator::CloseBrace, open)?;
        let name = print_raw(&nodes);
        Ok((nodes, name))
    }

    fn parse_environment(&mut self, mode: Mode, begin: usize) -> Result<Node, ParseError> {
        let (env_name, name) = self.parse_environment_name()?;
        if self.options.is_verbatim(&name) {
            return self.parse_verbatim_environment(name, begin);
        }

        let math = self.options.is_math(&name);
        let body_mode = if math { Mode::Math } else { mode };
        let content = self.parse_sequence(body_mode, &Terminator::End(name), begin)?;
        Ok(Node::Environment(Environment {
            kind: if math {
                EnvironmentKind::Math
            } else {
                EnvironmentKind::Normal
            },
            env_name,
            args: None,
            content,
            render_info: EnvironmentRenderInfo::default(),
        }))
    }

    fn parse_verbatim_environment(&mut self, name: String, begin: usize) -> Result<Node, ParseError> {
        let source = self.lexer.source();
        let body = self.lexer.offset();
        let end = END_ENVIRONMENT
            .captures_iter(&source[body..])
            .find(|caps| caps.get(1).is_some_and(|m| m.as_str() == name))
            .and_then(|caps| caps.get(0));
        let Some(end) = end else {
            return Err(ParseError::UnterminatedVerbatim {
                name,
                offset: begin,
            });
        };

        let content = source[body..body + end.start()].to_string();
        self.lexer.seek(body + end.end());
        Ok(Node::Verbatim(Verbatim {
            env: name,
            kind: VerbatimKind::Environment,
            content,
        }))
    }

    /// `\verb<d>...<d>` and `\verb*<d>...<d>`, read straight from the source.
    fn parse_inline_verbatim(&mut self, start: usize, after: usize) -> Result<Node, ParseError> {
        let source = self.lexer.source();
        let mut chars = source[after..].char_indices();
        let mut env = "verb";
        let mut delimiter = chars.next();
        if let Some((_, '*')) = delimiter {
            env = "verb*";
            delimiter = chars.next();
        }
        let unterminated = || ParseError::UnterminatedVerbatim {
            name: env.to_string(),
            offset: start,
        };

        let Some((index, delimiter)) = delimiter.filter(|(_, d)| !d.is_whitespace()) else {
            return Err(unterminated());
        };
        let content_start = after + index + delimiter.len_utf8();
        let Some(length) = source[content_start..].find(delimiter) else {
            return Err(unterminated());
        };
        let content = &source[content_start..content_start + length];
        if content.contains('\n') {
            return Err(unterminated());
        }

        self.lexer.seek(content_start + length + delimiter.len_utf8());
        Ok(Node::Verbatim(Verbatim {
            env: env.to_string(),
            kind: VerbatimKind::Inline { delimiter },
            content: content.to_string(),
        }))
    }
}
