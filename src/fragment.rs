//! HTML for the project-detail dialog.

use crate::catalog::{LinkKind, ProjectEntry};

const BADGE_CLASS: &str = "bg-gray-700 text-gray-200 px-3 py-1 rounded-full text-sm font-mono";
const MEDIA_CLASS: &str =
    "rounded-lg mb-6 max-h-[60vh] w-auto mx-auto object-contain border border-gray-700";

fn link_class(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::Live => {
            "border border-accent text-accent px-6 py-3 rounded hover:bg-accent hover:text-white transition-all font-mono flex items-center gap-2"
        }
        LinkKind::Source | LinkKind::Document => {
            "bg-gray-800 text-white px-6 py-3 rounded hover:bg-gray-700 transition-all font-mono flex items-center gap-2"
        }
    }
}

/// Escape text for both element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(entry: &ProjectEntry) -> String {
    let title = escape(&entry.title);
    let mut html = format!(
        r#"<h2 class="text-4xl font-bold text-accent mb-2">{title}</h2>"#
    );
    html.push_str(&format!(
        r#"<h3 class="text-xl text-gray-400 mb-6">{}</h3>"#,
        escape(&entry.subtitle),
    ));
    html.push_str(&format!(
        r#"<img src="{}" alt="Project {title} Image" class="{MEDIA_CLASS}">"#,
        escape(&entry.image),
    ));
    html.push_str(&format!(
        r#"<p class="text-gray-300 text-lg">{}</p>"#,
        escape(&entry.description),
    ));

    html.push_str(r#"<div class="flex flex-wrap gap-2 mt-6">"#);
    for tag in &entry.tags {
        html.push_str(&format!(r#"<span class="{BADGE_CLASS}">{}</span>"#, escape(tag)));
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="flex flex-wrap gap-4 mt-8">"#);
    for (kind, href) in entry.links() {
        html.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="{}">"#,
            escape(href),
            link_class(kind),
        ));
        html.push_str(&format!(r#"<i class="{}"></i> {}</a>"#, kind.icon(), kind.label()));
    }
    html.push_str("</div>");
    html
}
