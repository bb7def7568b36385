//! HTML rendering of the display document.
//!
//! The page shell is embedded at compile time; cards are built by string
//! assembly with every user-supplied value escaped.

use taskdeck_domain::{DisplayDocument, MainTaskGroup, SubTaskRecord};

/// Page shell with styles and the bridge script.
pub const PAGE_TEMPLATE: &str = include_str!("templates/cards.html");

const CONTENT_SLOT: &str = "{{content}}";

pub const EMPTY_MESSAGE: &str = "No task data to display";

/// Full HTML document for `doc`.
pub fn render_document(doc: &DisplayDocument) -> String {
    PAGE_TEMPLATE.replace(CONTENT_SLOT, &render_content(doc))
}

/// Inner markup of the card container: one card per group, or the empty state.
pub fn render_content(doc: &DisplayDocument) -> String {
    if doc.is_empty() {
        return format!(r#"<div class="no-tasks">{}</div>"#, EMPTY_MESSAGE);
    }
    doc.iter()
        .map(|(subject, group)| render_group(subject, group))
        .collect()
}

/// One main-task card.
pub fn render_group(subject: &str, group: &MainTaskGroup) -> String {
    let subject_attr = html_escape(subject);
    let mut html = format!(r#"<div class="task-card" data-subject="{}">"#, subject_attr);

    html.push_str(r#"<div class="task-header"><div>"#);
    html.push_str(&format!(r#"<div class="task-title">{}</div>"#, subject_attr));
    if !group.describe.is_empty() {
        html.push_str(&format!(
            r#"<div class="task-describe">{}</div>"#,
            html_escape(&group.describe)
        ));
    }
    html.push_str(r#"<div class="task-meta">"#);
    for task_type in &group.types {
        html.push_str(&format!(
            r#"<span class="task-type-badge">{}</span>"#,
            html_escape(task_type)
        ));
    }
    html.push_str(&format!(
        r#"<span class="task-meta-item">Branches: {}</span>"#,
        group.tasks.len()
    ));
    html.push_str("</div></div>");
    html.push_str(&format!(
        r#"<div class="task-stats"><span class="stat-value">{}/{}</span><span class="stat-label">completed</span></div>"#,
        group.completed_count(),
        group.tasks.len()
    ));
    html.push_str("</div>");

    html.push_str(r#"<div class="task-content">"#);
    for record in &group.tasks {
        html.push_str(&render_branch(&subject_attr, record));
    }
    html.push_str("</div></div>");
    html
}

fn render_branch(subject_attr: &str, record: &SubTaskRecord) -> String {
    let completed = if record.completed { " completed" } else { "" };
    let checked = if record.completed { " checked" } else { "" };
    let mut html = format!(
        r#"<div class="branch-task{}" data-subject="{}" data-branch="{}">"#,
        completed, subject_attr, record.branch_number
    );

    html.push_str(r#"<div class="branch-header">"#);
    html.push_str(&format!(
        r#"<div class="branch-checkbox{}" data-action="toggle-task"><span class="checkmark">✓</span></div>"#,
        checked
    ));
    html.push_str(&format!(
        r#"<span class="branch-name">{}</span><span class="branch-number">#{}</span>"#,
        html_escape(&record.sub_task_name),
        record.branch_number
    ));
    html.push_str(r#"<div class="branch-toggle" data-action="toggle-details">▾</div>"#);
    html.push_str("</div>");

    html.push_str(r#"<div class="branch-details">"#);
    if !record.details.is_empty() {
        html.push_str(&detail_item("Details", &html_escape(&record.details)));
    }
    html.push_str(&detail_item("Estimated time", &record.time().to_string()));
    html.push_str(&detail_item("Weight", &record.weight.to_string()));

    if !record.sub_task_tasks.is_empty() {
        html.push_str(r#"<div class="subtasks-list"><div class="subtasks-header">Checklist:</div>"#);
        for (name, done) in record.sub_task_tasks.iter() {
            let name_attr = html_escape(name);
            html.push_str(&format!(
                r#"<div class="subtask-item" data-item="{}"><div class="subtask-checkbox{}" data-action="toggle-item"><span class="checkmark">✓</span></div><span class="subtask-name{}">{}</span></div>"#,
                name_attr,
                if done { " checked" } else { "" },
                if done { " completed" } else { "" },
                name_attr
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</div></div>");
    html
}

fn detail_item(label: &str, value: &str) -> String {
    format!(
        r#"<div class="detail-item"><span class="detail-label">{}:</span><span class="detail-value">{}</span></div>"#,
        label, value
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
