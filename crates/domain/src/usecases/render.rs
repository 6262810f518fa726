//! Rendering use case - turns a publish payload into platform-specific text

use crate::model::{PlatformKey, PublishPayload};

/// Configuration for the renderer
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum characters for X posts
    pub x_max_chars: usize,
    /// Maximum characters for LinkedIn commentary
    pub linkedin_max_chars: usize,
    /// Maximum characters of the job description quoted in long-form posts
    pub excerpt_chars: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            x_max_chars: 280,
            linkedin_max_chars: 3000,
            excerpt_chars: 500,
        }
    }
}

/// Renderer for platform-specific post text
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Short post for X: headline followed by the job URL, which is never cut
    pub fn render_for_x(&self, payload: &PublishPayload) -> String {
        let url_len = payload.url.chars().count() + 1; // +1 for newline
        let available = self.config.x_max_chars.saturating_sub(url_len);
        let headline = truncate_to_length(&self.headline(payload), available);
        if headline.is_empty() {
            return payload.url.clone();
        }
        format!("{}\n{}", headline, payload.url)
    }

    /// Long-form commentary for LinkedIn
    pub fn render_for_linkedin(&self, payload: &PublishPayload) -> String {
        let mut content = self.headline(payload);
        let excerpt = self.excerpt(payload);
        if !excerpt.is_empty() {
            content.push_str("\n\n");
            content.push_str(&excerpt);
        }
        content.push_str("\n\nApply: ");
        content.push_str(&payload.url);

        if content.chars().count() <= self.config.linkedin_max_chars {
            return content;
        }

        // Drop the excerpt before touching the headline or URL
        let fallback = format!("{}\n\nApply: {}", self.headline(payload), payload.url);
        truncate_to_length(&fallback, self.config.linkedin_max_chars)
    }

    /// Message for a Facebook page post; the link is attached separately
    pub fn render_for_facebook(&self, payload: &PublishPayload) -> String {
        let excerpt = self.excerpt(payload);
        if excerpt.is_empty() {
            self.headline(payload)
        } else {
            format!("{}\n\n{}", self.headline(payload), excerpt)
        }
    }

    /// Text a given platform would carry for this payload
    pub fn render_for(&self, platform: PlatformKey, payload: &PublishPayload) -> String {
        match platform {
            PlatformKey::Website => self.headline(payload),
            PlatformKey::Linkedin => self.render_for_linkedin(payload),
            PlatformKey::X => self.render_for_x(payload),
            PlatformKey::Facebook => self.render_for_facebook(payload),
        }
    }

    /// "We're hiring: Backend Engineer at Acme"
    fn headline(&self, payload: &PublishPayload) -> String {
        let company = payload.company.trim();
        if company.is_empty() {
            format!("We're hiring: {}", payload.title.trim())
        } else {
            format!("We're hiring: {} at {}", payload.title.trim(), company)
        }
    }

    fn excerpt(&self, payload: &PublishPayload) -> String {
        truncate_to_length(payload.text.trim(), self.config.excerpt_chars)
    }
}

/// Truncate to `max_len` characters, preserving word boundaries
pub fn truncate_to_length(content: &str, max_len: usize) -> String {
    if content.chars().count() <= max_len {
        return content.to_string();
    }

    // No room for "..." plus any text
    if max_len <= 3 {
        return String::new();
    }

    // Leave room for "..."
    let keep = max_len.saturating_sub(3);
    let cut = content
        .char_indices()
        .nth(keep)
        .map(|(idx, _)| idx)
        .unwrap_or(content.len());
    let head = &content[..cut];
    let break_point = head
        .rfind(char::is_whitespace)
        .filter(|idx| *idx > 0)
        .unwrap_or(cut);

    format!("{}...", head[..break_point].trim_end())
}
