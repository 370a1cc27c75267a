use std::path::{Path, PathBuf};

use anyhow::Result;

use promptkit_core::launcher;
use promptkit_core::platform::AiPlatform;
use promptkit_core::session::Session;

use crate::output;
use crate::values::{self, ValueArgs};

/// Flags of `promptkit generate` beyond the value sources.
pub struct GenerateOptions {
    pub preview: bool,
    pub raw: bool,
    pub copy: bool,
    /// `Some(None)` means `--open` without a platform: use the configured default.
    pub open: Option<Option<String>>,
    pub output: Option<PathBuf>,
}

/// Generate a prompt and hand it off (print, file, clipboard, platform).
///
/// Missing required variables abort unless `--preview` is set, in which case
/// they are substituted as empty and the gaps are listed as warnings.
pub fn run(config_path: &Path, id: &str, args: &ValueArgs, opts: &GenerateOptions) -> Result<()> {
    let ctx = super::load_context(config_path)?;
    let template = ctx.catalog.require(id)?;

    let mut session = Session::start(template);
    values::fill_session(&mut session, args)?;

    // Resolve the platform before generating so a typo fails fast.
    let platform = match &opts.open {
        Some(choice) => Some(AiPlatform::from_id(
            choice.as_deref().unwrap_or(&ctx.config.default_platform),
        )?),
        None => None,
    };

    let validation = session.validate();
    if !validation.is_valid {
        if !opts.preview {
            if !opts.raw {
                output::print_header(&format!("promptkit generate: {id}"));
            }
            for error in &validation.errors {
                output::print_error(error);
            }
            anyhow::bail!("missing required variables (pass --preview to generate anyway)");
        }
        for error in &validation.errors {
            tracing::warn!("preview with gap: {error}");
        }
    }

    let prompt = session.generate();

    if opts.raw {
        println!("{prompt}");
    } else {
        output::print_header(&format!("{} ({id})", session.template().name));
        if !validation.is_valid {
            output::print_warning(&format!(
                "Preview: {} required variable(s) left empty",
                validation.errors.len()
            ));
        }
        output::print_prompt(&prompt);
        output::print_key_value("Characters", &prompt.chars().count().to_string());
    }

    if let Some(path) = &opts.output {
        std::fs::write(path, &prompt)?;
        if !opts.raw {
            output::print_success(&format!("Wrote {}", path.display()));
        }
    }

    match platform {
        Some(platform) => {
            let copied = launcher::send_to_platform(&prompt, platform)?;
            if !opts.raw {
                if copied {
                    output::print_success("Copied to clipboard");
                } else {
                    output::print_warning("No clipboard tool found; paste the prompt manually");
                }
                output::print_success(&format!("Opened {} ({})", platform.name, platform.url));
            }
        }
        None if opts.copy => {
            launcher::copy_to_clipboard(&prompt)?;
            if !opts.raw {
                output::print_success("Copied to clipboard");
            }
        }
        None => {}
    }

    Ok(())
}
