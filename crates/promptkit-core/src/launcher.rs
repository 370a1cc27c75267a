//! Clipboard and browser integration via system tools.
//!
//! Tools are located with [`which`] in a fixed preference order; the first one
//! installed wins. Nothing here is needed to generate a prompt, only to hand it
//! off.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{PromptKitError, Result};
use crate::platform::AiPlatform;

/// A system command plus its fixed arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

/// Clipboard writers that read the text from stdin.
pub const CLIPBOARD_TOOLS: &[Tool] = &[
    Tool { program: "pbcopy", args: &[] },
    Tool { program: "wl-copy", args: &[] },
    Tool { program: "xclip", args: &["-selection", "clipboard"] },
    Tool { program: "xsel", args: &["--clipboard", "--input"] },
    Tool { program: "clip", args: &[] },
];

/// URL openers that take the URL as their last argument.
pub const OPENER_TOOLS: &[Tool] = &[
    Tool { program: "open", args: &[] },
    Tool { program: "xdg-open", args: &[] },
    Tool { program: "cmd", args: &["/C", "start", ""] },
];

/// First tool in `tools` that is on `PATH`.
pub fn find_tool(tools: &[Tool]) -> Option<Tool> {
    tools.iter().copied().find(|t| which::which(t.program).is_ok())
}

/// Copy `text` to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let tool = find_tool(CLIPBOARD_TOOLS).ok_or_else(|| PromptKitError::MissingTool {
        name: "clipboard helper".into(),
        install: "install one of pbcopy, wl-copy, xclip, xsel".into(),
    })?;
    tracing::debug!(tool = tool.program, bytes = text.len(), "copying to clipboard");
    pipe_to(tool, text)
}

/// Run `tool` with `text` on stdin and wait for it to exit.
///
/// X11 and Wayland helpers fork a process that keeps serving the selection, so
/// only the exit status is awaited; the tool's stderr goes to ours.
fn pipe_to(tool: Tool, text: &str) -> Result<()> {
    let mut child = Command::new(tool.program)
        .args(tool.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(PromptKitError::ToolFailed {
            tool: tool.program.into(),
            message: format!("exited with {status}"),
        });
    }
    Ok(())
}

/// Open `url` in the default browser.
pub fn open_url(url: &str) -> Result<()> {
    let tool = find_tool(OPENER_TOOLS).ok_or_else(|| PromptKitError::MissingTool {
        name: "xdg-open".into(),
        install: "install xdg-utils or open the URL manually".into(),
    })?;
    tracing::debug!(tool = tool.program, url, "opening URL");

    // A browser started by the opener may outlive it; don't hold its output pipes.
    let status = Command::new(tool.program)
        .args(tool.args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status()?;
    if !status.success() {
        return Err(PromptKitError::ToolFailed {
            tool: tool.program.into(),
            message: format!("exited with {status}"),
        });
    }
    Ok(())
}

/// Copy `prompt` to the clipboard, then open the platform's site.
///
/// A missing clipboard tool is not fatal: the site still opens and the caller
/// is told the copy was skipped (`Ok(false)`).
pub fn send_to_platform(prompt: &str, platform: &AiPlatform) -> Result<bool> {
    let copied = match copy_to_clipboard(prompt) {
        Ok(()) => true,
        Err(PromptKitError::MissingTool { .. }) => {
            tracing::warn!("no clipboard tool found, skipping copy");
            false
        }
        Err(e) => return Err(e),
    };
    open_url(platform.url)?;
    tracing::info!(event = "platform_opened", platform = platform.id, copied);
    Ok(copied)
}
