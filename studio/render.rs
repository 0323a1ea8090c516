//! Central template renderer for the neurolab studio.
//!
//! One HTML template (`studio/assets/lab.html`) with `{{TOKEN}}`
//! placeholders serves both tabs. Global tokens (active tab, flash,
//! training state) are resolved here; tab-specific tokens come from the
//! caller's closure; whatever remains is blanked so no raw `{{TOKEN}}`
//! reaches the browser.

use crate::state::{FlashKind, FlashMessage};

const TEMPLATE: &str = include_str!("assets/lab.html");

#[derive(Clone, Copy, PartialEq)]
pub enum Page {
    Hopfield,
    Multilayer,
}

/// Renders the full studio page for one tab.
pub fn render_page<F>(page: Page, flash: Option<&FlashMessage>, training: bool, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let mut html = TEMPLATE.to_owned();

    let (hop_active, mnn_active) = match page {
        Page::Hopfield => ("active", ""),
        Page::Multilayer => ("", "active"),
    };
    html = html.replace("{{HOP_TAB_ACTIVE}}", hop_active);
    html = html.replace("{{MNN_TAB_ACTIVE}}", mnn_active);
    html = html.replace("{{HOP_HIDE}}", if page == Page::Hopfield { "" } else { "hidden" });
    html = html.replace("{{MNN_HIDE}}", if page == Page::Multilayer { "" } else { "hidden" });
    html = html.replace("{{TRAINING_RUNNING}}", if training { "true" } else { "false" });
    html = html.replace("{{FLASH}}", &flash_html(flash));

    blank_remaining(fill(html))
}

pub fn flash_html(flash: Option<&FlashMessage>) -> String {
    match flash {
        None => String::new(),
        Some(f) => {
            let class = match f.kind {
                FlashKind::Success => "flash-success",
                FlashKind::Error => "flash-error",
            };
            format!(r#"<div class="flash {}">{}</div>"#, class, html_escape(&f.text))
        }
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Blanks any `{{TOKEN}}` the caller did not substitute.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        match html[start..].find("}}") {
            Some(end) => html.replace_range(start..start + end + 2, ""),
            None => break,
        }
    }
    html
}
