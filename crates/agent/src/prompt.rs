//! System prompt rendering
//!
//! Sections render as markdown: a `## Title` heading, the body paragraph,
//! then one `- ` line per bullet.

use service_agent_config::PromptSection;

/// Render prompt sections into one system prompt
pub fn render_prompt(sections: &[PromptSection]) -> String {
    sections
        .iter()
        .filter(|section| !section.is_empty())
        .map(render_section)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_section(section: &PromptSection) -> String {
    let mut out = format!("## {}", section.title);

    if let Some(body) = section.body.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        out.push('\n');
        out.push_str(body);
    }

    if !section.bullets.is_empty() {
        out.push('\n');
        let bullets: Vec<String> = section.bullets.iter().map(|b| format!("- {}", b)).collect();
        out.push_str(&bullets.join("\n"));
    }

    out
}
