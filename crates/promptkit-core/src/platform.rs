//! AI services a generated prompt can be sent to.

use serde::Serialize;

use crate::error::{PromptKitError, Result};

/// A chat or image service reachable in the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiPlatform {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    /// Whether the service accepts the prompt in the URL; none currently do,
    /// so the prompt goes through the clipboard.
    pub supports_direct_prompt: bool,
}

/// Built-in platform list, in display order.
pub const PLATFORMS: &[AiPlatform] = &[
    AiPlatform {
        id: "chatgpt",
        name: "ChatGPT",
        url: "https://chat.openai.com/",
        supports_direct_prompt: false,
    },
    AiPlatform {
        id: "claude",
        name: "Claude",
        url: "https://claude.ai/",
        supports_direct_prompt: false,
    },
    AiPlatform {
        id: "gemini",
        name: "Gemini",
        url: "https://gemini.google.com/",
        supports_direct_prompt: false,
    },
    AiPlatform {
        id: "copilot",
        name: "Copilot",
        url: "https://copilot.microsoft.com/",
        supports_direct_prompt: false,
    },
    AiPlatform {
        id: "perplexity",
        name: "Perplexity",
        url: "https://www.perplexity.ai/",
        supports_direct_prompt: false,
    },
    AiPlatform {
        id: "midjourney",
        name: "Midjourney",
        url: "https://www.midjourney.com/",
        supports_direct_prompt: false,
    },
    AiPlatform {
        id: "grok",
        name: "Grok",
        url: "https://x.com/i/grok",
        supports_direct_prompt: false,
    },
];

impl AiPlatform {
    /// Look up a platform by id, case-insensitively.
    pub fn from_id(id: &str) -> Result<&'static AiPlatform> {
        PLATFORMS
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| PromptKitError::UnknownPlatform(id.to_string()))
    }
}
