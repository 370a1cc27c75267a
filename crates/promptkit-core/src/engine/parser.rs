//! Single-pass parser for template marker syntax.
//!
//! Recognised tokens:
//! - `{{key}}` — placeholder, `key` is one or more `[A-Za-z0-9_]`
//! - `{{#if key}}` — conditional start (whitespace between `#if` and `key`)
//! - `{{/if}}` — conditional end
//!
//! Anything else between braces is literal text. Conditional blocks nest by
//! marker depth. Unbalanced markers never fail the parse: a stray end marker is
//! dropped, and an unclosed start marker is dropped with its body spliced into
//! the enclosing level. Both are recorded as [`MarkerIssue`]s so catalog
//! loading can report them.

use std::fmt;

/// A parsed template fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal(String),
    Placeholder(String),
    Conditional { key: String, body: Vec<Node> },
}

/// An unbalanced conditional marker found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerIssue {
    /// `{{#if key}}` with no matching `{{/if}}`.
    UnclosedConditional { key: String, line: usize },
    /// `{{/if}}` with no open block.
    StrayEnd { line: usize },
}

impl fmt::Display for MarkerIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedConditional { key, line } => {
                write!(f, "line {line}: {{{{#if {key}}}}} is never closed")
            }
            Self::StrayEnd { line } => write!(f, "line {line}: {{{{/if}}}} without a matching {{{{#if}}}}"),
        }
    }
}

/// Result of parsing a template string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub nodes: Vec<Node>,
    pub issues: Vec<MarkerIssue>,
}

enum Token<'a> {
    Placeholder(&'a str),
    Start(&'a str),
    End,
}

struct Frame {
    key: String,
    line: usize,
    nodes: Vec<Node>,
}

/// Parse `src` into a node tree.
pub fn parse(src: &str) -> Parsed {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut issues = Vec::new();

    let mut pos = 0;
    let mut literal_start = 0;
    let mut lines = LineCounter::default();

    while let Some(found) = src[pos..].find("{{") {
        let open = pos + found;
        let Some((token, close)) = read_token(src, open) else {
            // Not a marker: keep the first brace as text and rescan from the next byte,
            // so `{{{name}}}` still finds `{{name}}`.
            pos = open + 1;
            continue;
        };

        let level = match stack.last_mut() {
            Some(frame) => &mut frame.nodes,
            None => &mut root,
        };
        push_literal(level, &src[literal_start..open]);

        match token {
            Token::Placeholder(key) => level.push(Node::Placeholder(key.to_string())),
            Token::Start(key) => stack.push(Frame {
                key: key.to_string(),
                line: lines.line_at(src, open),
                nodes: Vec::new(),
            }),
            Token::End => match stack.pop() {
                Some(frame) => {
                    let parent = match stack.last_mut() {
                        Some(parent) => &mut parent.nodes,
                        None => &mut root,
                    };
                    parent.push(Node::Conditional {
                        key: frame.key,
                        body: frame.nodes,
                    });
                }
                None => issues.push(MarkerIssue::StrayEnd {
                    line: lines.line_at(src, open),
                }),
            },
        }

        pos = close;
        literal_start = close;
    }

    let level = match stack.last_mut() {
        Some(frame) => &mut frame.nodes,
        None => &mut root,
    };
    push_literal(level, &src[literal_start..]);

    // Splice unclosed blocks into their parents, innermost first.
    while let Some(frame) = stack.pop() {
        issues.push(MarkerIssue::UnclosedConditional {
            key: frame.key,
            line: frame.line,
        });
        let parent = match stack.last_mut() {
            Some(parent) => &mut parent.nodes,
            None => &mut root,
        };
        for node in frame.nodes {
            match node {
                Node::Literal(text) => push_literal(parent, &text),
                other => parent.push(other),
            }
        }
    }

    issues.sort_by_key(|issue| match issue {
        MarkerIssue::UnclosedConditional { line, .. } | MarkerIssue::StrayEnd { line } => *line,
    });

    Parsed {
        nodes: root,
        issues,
    }
}

/// Try to read a marker starting at `open` (which points at `{{`).
/// Returns the token and the byte offset just past its closing `}}`.
///
/// Only bytes that can appear inside a marker are scanned, so the search stops
/// at the next brace and never runs to the end of the input.
fn read_token(src: &str, open: usize) -> Option<(Token<'_>, usize)> {
    let inner_start = open + 2;
    let inner_len = src.as_bytes()[inner_start..]
        .iter()
        .position(|&b| !is_marker_byte(b))?;
    let inner_end = inner_start + inner_len;
    if !src[inner_end..].starts_with("}}") {
        return None;
    }
    let inner = &src[inner_start..inner_end];
    let close = inner_end + 2;

    if inner == "/if" {
        return Some((Token::End, close));
    }

    if let Some(rest) = inner.strip_prefix("#if") {
        let key = rest.trim_start();
        if key.len() < rest.len() && is_key(key) {
            return Some((Token::Start(key), close));
        }
        return None;
    }

    if is_key(inner) {
        return Some((Token::Placeholder(inner), close));
    }

    None
}

/// Whether `s` is a valid variable key: one or more ASCII word characters.
pub fn is_key(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn push_literal(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Literal(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Literal(text.to_string()));
    }
}

fn is_marker_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b.is_ascii_whitespace() || matches!(b, b'_' | b'#' | b'/')
}

/// 1-based line numbers for increasing byte offsets, counted incrementally.
#[derive(Default)]
struct LineCounter {
    offset: usize,
    newlines: usize,
}

impl LineCounter {
    fn line_at(&mut self, src: &str, offset: usize) -> usize {
        self.newlines += src.as_bytes()[self.offset..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.offset = offset;
        self.newlines + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Node {
        Node::Literal(s.into())
    }

    fn ph(s: &str) -> Node {
        Node::Placeholder(s.into())
    }

    #[test]
    fn test_plain_text() {
        let parsed = parse("just text");
        assert_eq!(parsed.nodes, vec![lit("just text")]);
        assert!(parsed.issues.is_empty());
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(parse(""), Parsed::default());
    }

    #[test]
    fn test_placeholders_and_literals() {
        let parsed = parse("Hi {{name}}, from {{team_2}}!");
        assert_eq!(
            parsed.nodes,
            vec![lit("Hi "), ph("name"), lit(", from "), ph("team_2"), lit("!")]
        );
    }

    #[test]
    fn test_conditional_block() {
        let parsed = parse("A{{#if x}}B {{x}}{{/if}}C");
        assert_eq!(
            parsed.nodes,
            vec![
                lit("A"),
                Node::Conditional {
                    key: "x".into(),
                    body: vec![lit("B "), ph("x")],
                },
                lit("C"),
            ]
        );
    }

    #[test]
    fn test_nested_conditionals() {
        let parsed = parse("{{#if a}}1{{#if b}}2{{/if}}3{{/if}}");
        assert_eq!(
            parsed.nodes,
            vec![Node::Conditional {
                key: "a".into(),
                body: vec![
                    lit("1"),
                    Node::Conditional {
                        key: "b".into(),
                        body: vec![lit("2")],
                    },
                    lit("3"),
                ],
            }]
        );
    }

    #[test]
    fn test_non_marker_braces_are_literal() {
        let parsed = parse("{{ name }} {{#each items}} {{}} {{a-b}}");
        assert_eq!(parsed.nodes, vec![lit("{{ name }} {{#each items}} {{}} {{a-b}}")]);
    }

    #[test]
    fn test_if_without_space_is_literal() {
        let parsed = parse("{{#ifx}}");
        assert_eq!(parsed.nodes, vec![lit("{{#ifx}}")]);
    }

    #[test]
    fn test_triple_braces_find_inner_placeholder() {
        let parsed = parse("{{{name}}}");
        assert_eq!(parsed.nodes, vec![lit("{"), ph("name"), lit("}")]);
    }

    #[test]
    fn test_unterminated_braces_are_literal() {
        let parsed = parse("tail {{name");
        assert_eq!(parsed.nodes, vec![lit("tail {{name")]);
    }

    #[test]
    fn test_stray_end_dropped_and_reported() {
        let parsed = parse("A{{/if}}B");
        assert_eq!(parsed.nodes, vec![lit("AB")]);
        assert_eq!(parsed.issues, vec![MarkerIssue::StrayEnd { line: 1 }]);
    }

    #[test]
    fn test_unclosed_start_spliced_and_reported() {
        let parsed = parse("A\n{{#if x}}B{{x}}");
        assert_eq!(parsed.nodes, vec![lit("A\nB"), ph("x")]);
        assert_eq!(
            parsed.issues,
            vec![MarkerIssue::UnclosedConditional {
                key: "x".into(),
                line: 2,
            }]
        );
    }

    #[test]
    fn test_issue_display() {
        let issue = MarkerIssue::UnclosedConditional {
            key: "x".into(),
            line: 3,
        };
        assert_eq!(issue.to_string(), "line 3: {{#if x}} is never closed");
        assert_eq!(
            MarkerIssue::StrayEnd { line: 1 }.to_string(),
            "line 1: {{/if}} without a matching {{#if}}"
        );
    }

    #[test]
    fn test_unterminated_braces_parse_in_linear_time() {
        let start = std::time::Instant::now();
        let braces = "{".repeat(100_000);
        let parsed = parse(&braces);
        assert_eq!(parsed.nodes, vec![lit(&braces)]);

        let opens = format!("{}}}", "{{ ".repeat(50_000));
        let parsed = parse(&opens);
        assert_eq!(parsed.nodes, vec![lit(&opens)]);
        assert!(start.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn test_issue_lines_across_many_markers() {
        let parsed = parse("{{/if}}\n{{#if a}}\n\n{{/if}}\n{{/if}}\n{{#if b}}");
        assert_eq!(
            parsed.issues,
            vec![
                MarkerIssue::StrayEnd { line: 1 },
                MarkerIssue::StrayEnd { line: 5 },
                MarkerIssue::UnclosedConditional {
                    key: "b".into(),
                    line: 6,
                },
            ]
        );
    }

    #[test]
    fn test_is_key() {
        assert!(is_key("expertise_level"));
        assert!(is_key("task_1"));
        assert!(!is_key(""));
        assert!(!is_key("has space"));
        assert!(!is_key("dash-ed"));
    }
}
