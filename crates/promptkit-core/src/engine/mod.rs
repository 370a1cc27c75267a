//! Template substitution engine.
//!
//! A template string is parsed once into a [`parser::Node`] tree and then
//! interpreted against a value map:
//!
//! - `{{key}}` for a declared variable becomes its value, or nothing when absent
//! - `{{#if key}}...{{/if}}` for a declared variable keeps its body when the
//!   value is non-empty and disappears entirely otherwise
//! - placeholders naming undeclared keys are emitted verbatim
//! - conditional markers for undeclared keys, and unbalanced markers, are stripped
//!   while their text is kept
//!
//! The output is then normalised: runs of three or more newlines collapse to a
//! single blank line and surrounding whitespace is trimmed.
//!
//! Values are inserted as-is and never re-scanned, so a value that itself
//! contains `{{...}}` reaches the output unchanged.
//!
//! ## Usage
//!
//! ```
//! use promptkit_core::engine;
//! use promptkit_core::template::{Template, Values, Variable};
//!
//! let t = Template::new("greet", "Hi {{name}}!", vec![Variable::text("name", "Name", true)]);
//! let mut values = Values::new();
//! values.insert("name".into(), "Ada".into());
//! assert_eq!(engine::generate(&t, &values), "Hi Ada!");
//! ```

pub mod parser;
pub mod validator;

use std::collections::HashSet;

pub use parser::{MarkerIssue, Node};
pub use validator::{validate, Validation};

use crate::template::{Template, Values};

/// Substitute `values` into `template`. Never fails.
pub fn generate(template: &Template, values: &Values) -> String {
    let parsed = parser::parse(&template.template);
    render(&parsed.nodes, template, values)
}

/// A template together with its cached parse tree.
#[derive(Debug, Clone)]
pub struct PreparedTemplate {
    template: Template,
    nodes: Vec<Node>,
    issues: Vec<MarkerIssue>,
}

impl PreparedTemplate {
    pub fn new(template: Template) -> Self {
        let parsed = parser::parse(&template.template);
        Self {
            template,
            nodes: parsed.nodes,
            issues: parsed.issues,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Unbalanced conditional markers found while parsing.
    pub fn marker_issues(&self) -> &[MarkerIssue] {
        &self.issues
    }

    pub fn generate(&self, values: &Values) -> String {
        render(&self.nodes, &self.template, values)
    }

    pub fn validate(&self, values: &Values) -> Validation {
        validate(&self.template, values)
    }

    /// Keys referenced by placeholders or conditionals, first occurrence order.
    pub fn referenced_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        collect_keys(&self.nodes, &mut seen, &mut keys);
        keys
    }
}

fn collect_keys<'a>(nodes: &'a [Node], seen: &mut HashSet<&'a str>, keys: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            Node::Literal(_) => {}
            Node::Placeholder(key) => {
                if seen.insert(key.as_str()) {
                    keys.push(key.as_str());
                }
            }
            Node::Conditional { key, body } => {
                if seen.insert(key.as_str()) {
                    keys.push(key.as_str());
                }
                collect_keys(body, seen, keys);
            }
        }
    }
}

fn render(nodes: &[Node], template: &Template, values: &Values) -> String {
    let declared: HashSet<&str> = template.variables.iter().map(|v| v.key.as_str()).collect();
    let mut out = String::with_capacity(template.template.len());
    render_into(nodes, &declared, values, &mut out);
    collapse_blank_lines(&out).trim().to_string()
}

fn render_into(nodes: &[Node], declared: &HashSet<&str>, values: &Values, out: &mut String) {
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Placeholder(key) if declared.contains(key.as_str()) => {
                if let Some(value) = values.get(key) {
                    out.push_str(value);
                }
            }
            Node::Placeholder(key) => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
            Node::Conditional { key, body } => {
                if !declared.contains(key.as_str()) || is_present(values, key) {
                    render_into(body, declared, values, out);
                }
            }
        }
    }
}

/// A value counts as present only if it is a non-empty string. No trimming.
fn is_present(values: &Values, key: &str) -> bool {
    values.get(key).is_some_and(|v| !v.is_empty())
}

/// Collapse every run of three or more `\n` into exactly two.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run <= 2 {
                out.push(c);
            }
        } else {
            run = 0;
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::Variable;

    fn vars(keys: &[&str]) -> Vec<Variable> {
        keys.iter().map(|k| Variable::text(*k, *k, false)).collect()
    }

    fn values(pairs: &[(&str, &str)]) -> Values {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn gen(src: &str, keys: &[&str], pairs: &[(&str, &str)]) -> String {
        generate(&Template::new("t", src, vars(keys)), &values(pairs))
    }

    #[test]
    fn test_absent_conditional_removed() {
        assert_eq!(gen("A{{#if x}}B{{/if}}C", &["x"], &[]), "AC");
    }

    #[test]
    fn test_present_conditional_unwrapped_with_inner_placeholder() {
        assert_eq!(
            gen("{{#if x}}Hello {{x}}{{/if}}", &["x"], &[("x", "World")]),
            "Hello World"
        );
    }

    #[test]
    fn test_missing_placeholder_becomes_empty() {
        assert_eq!(gen("Hi {{name}}!", &["name"], &[]), "Hi !");
    }

    #[test]
    fn test_undeclared_placeholder_left_verbatim() {
        assert_eq!(gen("Use {{undeclared}} here", &[], &[]), "Use {{undeclared}} here");
    }

    #[test]
    fn test_undeclared_value_key_never_substituted() {
        assert_eq!(
            gen("Use {{other}} and {{x}}", &["x"], &[("x", "1"), ("other", "2")]),
            "Use {{other}} and 1"
        );
    }

    #[test]
    fn test_blank_line_runs_collapse() {
        assert_eq!(gen("A\n\n\n\nB", &[], &[]), "A\n\nB");
    }

    #[test]
    fn test_empty_string_counts_as_absent() {
        assert_eq!(gen("A{{#if x}}[{{x}}]{{/if}}B", &["x"], &[("x", "")]), "AB");
    }

    #[test]
    fn test_whitespace_value_counts_as_present() {
        assert_eq!(gen("A{{#if x}}[{{x}}]{{/if}}B", &["x"], &[("x", " ")]), "A[ ]B");
    }

    #[test]
    fn test_empty_template() {
        assert_eq!(gen("", &["x"], &[("x", "1")]), "");
    }

    #[test]
    fn test_output_trimmed() {
        assert_eq!(gen("\n\n  {{x}}  \n", &["x"], &[("x", "v")]), "v");
    }

    #[test]
    fn test_variable_without_placeholder_is_noop() {
        assert_eq!(gen("static", &["x"], &[("x", "1")]), "static");
    }

    #[test]
    fn test_undeclared_conditional_markers_stripped_body_kept() {
        assert_eq!(gen("A{{#if ghost}}B{{/if}}C", &[], &[]), "ABC");
    }

    #[test]
    fn test_unbalanced_markers_stripped() {
        assert_eq!(gen("A{{/if}}B{{#if x}}C{{x}}", &["x"], &[("x", "1")]), "ABC1");
        assert_eq!(gen("A{{#if x}}C", &["x"], &[]), "AC");
    }

    #[test]
    fn test_nested_distinct_keys_resolve_independently() {
        let src = "{{#if a}}a={{a}}{{#if b}};b={{b}}{{/if}}.{{/if}}";
        assert_eq!(gen(src, &["a", "b"], &[("a", "1"), ("b", "2")]), "a=1;b=2.");
        assert_eq!(gen(src, &["a", "b"], &[("a", "1")]), "a=1.");
        assert_eq!(gen(src, &["a", "b"], &[("b", "2")]), "");
        // Declaration order does not change the result.
        assert_eq!(gen(src, &["b", "a"], &[("a", "1"), ("b", "2")]), "a=1;b=2.");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        assert_eq!(
            gen("{{a}} {{b}}", &["a", "b"], &[("a", "{{b}}"), ("b", "x")]),
            "{{b}} x"
        );
        assert_eq!(
            gen("{{a}}", &["a"], &[("a", "{{#if a}}raw{{/if}}")]),
            "{{#if a}}raw{{/if}}"
        );
    }

    #[test]
    fn test_collapsed_blocks_leave_single_blank_line() {
        let src = "Top\n\n{{#if a}}A\n\n{{/if}}{{#if b}}B\n\n{{/if}}\n\nBottom";
        assert_eq!(gen(src, &["a", "b"], &[]), "Top\n\nBottom");
    }

    #[test]
    fn test_full_values_leave_no_marker_syntax() {
        let src = "{{#if a}}[{{a}}]{{/if}}\n{{b}}{{#if c}}{{c}}{{#if a}}!{{/if}}{{/if}}{{/if}}";
        let out = gen(src, &["a", "b", "c"], &[("a", "1"), ("b", "2"), ("c", "3")]);
        assert_eq!(out, "[1]\n23!");
        assert!(!out.contains("{{"));
        assert!(!out.contains("}}"));
    }

    #[test]
    fn test_collapse_idempotent() {
        let inputs = ["", "\n", "a\n\nb", "a\n\n\n\n\nb\n\n\nc", "\n\n\n\n"];
        for input in inputs {
            let once = collapse_blank_lines(input);
            assert_eq!(collapse_blank_lines(&once), once);
            assert!(!once.contains("\n\n\n"));
        }
    }

    #[test]
    fn test_collapse_keeps_short_runs() {
        assert_eq!(collapse_blank_lines("a\nb\n\nc"), "a\nb\n\nc");
        assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_deterministic() {
        let t = Template::new("t", "{{#if x}}{{x}}{{/if}} {{y}}", vars(&["x", "y"]));
        let v = values(&[("x", "1"), ("y", "2")]);
        assert_eq!(generate(&t, &v), generate(&t, &v));
    }

    #[test]
    fn test_prepared_matches_free_function() {
        let t = Template::new("t", "{{#if x}}X={{x}}{{/if}}\n\n\n{{y}} {{z}}", vars(&["x", "y"]));
        let v = values(&[("x", "1")]);
        let prepared = PreparedTemplate::new(t.clone());
        assert_eq!(prepared.generate(&v), generate(&t, &v));
        assert_eq!(prepared.generate(&v), "X=1\n\n {{z}}");
    }

    #[test]
    fn test_referenced_keys_in_first_occurrence_order() {
        let t = Template::new("t", "{{b}}{{#if a}}{{c}}{{b}}{{/if}}", vec![]);
        let prepared = PreparedTemplate::new(t);
        assert_eq!(prepared.referenced_keys(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_prepared_reports_marker_issues() {
        let prepared = PreparedTemplate::new(Template::new("t", "{{/if}}", vec![]));
        assert_eq!(prepared.marker_issues().len(), 1);
    }
}
