//! Collecting variable values from flags, a JSON file, or interactive prompts.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{Editor, Input, Select};

use promptkit_core::session::Session;
use promptkit_core::template::{Variable, VariableKind};

/// Value sources shared by `validate`, `generate`, and `save`.
///
/// Applied in order: template defaults, `--values` file, `--set` flags, then
/// interactive prompts (which start from whatever is already set).
#[derive(Args, Debug, Default, Clone)]
pub struct ValueArgs {
    /// Set a variable; repeatable (`--set subject="solar power"`)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,

    /// JSON file containing an object of variable values
    #[arg(long = "values", value_name = "FILE")]
    pub values_file: Option<PathBuf>,

    /// Prompt for each variable interactively
    #[arg(long, short)]
    pub interactive: bool,
}

/// Parse `key=value`. The value may be empty and may contain `=`.
pub fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Apply all value sources to `session`.
pub fn fill_session(session: &mut Session<'_>, args: &ValueArgs) -> Result<()> {
    if let Some(path) = &args.values_file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read values file {}", path.display()))?;
        let values: HashMap<String, String> = serde_json::from_str(&contents).with_context(|| {
            format!("{} must be a JSON object of string values", path.display())
        })?;
        session.extend(values);
    }

    session.extend(args.set.iter().cloned());

    for key in undeclared_keys(session) {
        tracing::warn!("'{key}' is not a variable of '{}', ignoring", session.template().id);
    }

    if args.interactive {
        prompt_all(session)?;
    }
    Ok(())
}

/// Keys set on the session (from any source) that the template does not declare, sorted.
fn undeclared_keys(session: &Session<'_>) -> Vec<String> {
    let mut keys: Vec<String> = session
        .values()
        .keys()
        .filter(|key| !session.template().declares(key))
        .cloned()
        .collect();
    keys.sort();
    keys
}

fn prompt_all(session: &mut Session<'_>) -> Result<()> {
    let variables = session.template().variables.clone();
    for variable in &variables {
        if let Some(description) = &variable.description {
            println!("  {}", console::style(description).dim());
        }
        let current = session.value(&variable.key).to_string();
        let value = prompt_one(variable, &current)?;
        session.set(variable.key.clone(), value);
    }
    Ok(())
}

fn prompt_one(variable: &Variable, current: &str) -> Result<String> {
    let label = if variable.required {
        format!("{} *", variable.label)
    } else {
        variable.label.clone()
    };

    match variable.kind {
        VariableKind::Select => {
            let mut items: Vec<&str> = Vec::new();
            if !variable.required {
                items.push("(none)");
            }
            items.extend(variable.options.iter().map(String::as_str));
            let default = items.iter().position(|o| *o == current).unwrap_or(0);
            let index = Select::new()
                .with_prompt(label)
                .items(&items)
                .default(default)
                .interact()?;
            Ok(match items[index] {
                "(none)" if !variable.required => String::new(),
                chosen => chosen.to_string(),
            })
        }
        VariableKind::Textarea => {
            println!("{label} (opens $EDITOR; save and close to continue)");
            Ok(Editor::new()
                .edit(current)?
                .map(|text| text.trim_end_matches('\n').to_string())
                .unwrap_or_else(|| current.to_string()))
        }
        VariableKind::Text => {
            let mut input = Input::<String>::new()
                .with_prompt(label)
                .allow_empty(!variable.required);
            if !current.is_empty() {
                input = input.with_initial_text(current);
            } else if let Some(hint) = &variable.placeholder {
                println!("  {}", console::style(hint).dim());
            }
            Ok(input.interact_text()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptkit_core::template::Template;
    use promptkit_core::PreparedTemplate;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("a=b").unwrap(), ("a".into(), "b".into()));
        assert_eq!(parse_key_value("a=").unwrap(), ("a".into(), "".into()));
        assert_eq!(parse_key_value("eq=x=y").unwrap(), ("eq".into(), "x=y".into()));
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=v").is_err());
    }

    #[test]
    fn test_fill_session_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");
        std::fs::write(&path, r#"{"a": "from file", "b": "file only"}"#).unwrap();

        let prepared = PreparedTemplate::new(Template::new(
            "t",
            "{{a}} / {{b}}",
            vec![Variable::text("a", "A", true), Variable::text("b", "B", true)],
        ));
        let mut session = Session::start(&prepared);
        let args = ValueArgs {
            set: vec![("a".into(), "from flag".into())],
            values_file: Some(path),
            interactive: false,
        };
        fill_session(&mut session, &args).unwrap();
        assert_eq!(session.generate(), "from flag / file only");
    }

    #[test]
    fn test_undeclared_keys_from_file_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");
        std::fs::write(&path, r#"{"a": "x", "from_file": "y"}"#).unwrap();

        let prepared = PreparedTemplate::new(Template::new(
            "t",
            "{{a}}",
            vec![Variable::text("a", "A", true)],
        ));
        let mut session = Session::start(&prepared);
        let args = ValueArgs {
            set: vec![("from_flag".into(), "z".into())],
            values_file: Some(path),
            interactive: false,
        };
        fill_session(&mut session, &args).unwrap();
        assert_eq!(undeclared_keys(&session), vec!["from_file", "from_flag"]);
        assert_eq!(session.generate(), "x");
    }

    #[test]
    fn test_fill_session_rejects_non_string_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");
        std::fs::write(&path, r#"{"a": 1}"#).unwrap();

        let prepared = PreparedTemplate::new(Template::new("t", "{{a}}", vec![]));
        let mut session = Session::start(&prepared);
        let args = ValueArgs {
            values_file: Some(path),
            ..ValueArgs::default()
        };
        assert!(fill_session(&mut session, &args).is_err());
    }
}
