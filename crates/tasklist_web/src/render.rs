//! Server-side HTML for the task list page.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write;
use tasklist_core::{StatusMessage, Task, TaskListing, TaskView};

/// Characters left as-is in a single URL path segment or query value.
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Everything the index template needs.
#[derive(Debug, Clone)]
pub struct IndexPage {
    /// Raw `view` query value, echoed into links and form actions.
    pub view_param: String,
    pub listing: TaskListing,
    pub flash: Option<StatusMessage>,
}

/// Percent-encodes one URL path segment or query value.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URL_COMPONENT).to_string()
}

/// Escapes text for HTML element content and quoted attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn render_index(page: &IndexPage) -> String {
    let view_query = format!("view={}", encode_component(&page.view_param));
    let mut html = String::new();

    html.push_str(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Tasks</title>\n</head>\n<body>\n<main>\n<h1>Tasks</h1>\n",
    );

    if let Some(flash) = &page.flash {
        let _ = writeln!(
            html,
            "<div class=\"flash flash-{}\" role=\"status\">{}</div>",
            flash.level.as_str(),
            escape_html(&flash.text)
        );
    }

    let _ = writeln!(
        html,
        "<form class=\"add\" method=\"post\" action=\"/add?{view_query}\">\
         <input type=\"text\" name=\"title\" minlength=\"2\" required placeholder=\"New task\">\
         <button type=\"submit\">Add</button></form>"
    );

    html.push_str("<nav class=\"views\">\n");
    for view in [TaskView::All, TaskView::Active, TaskView::Done] {
        let current = if view == page.listing.view {
            " class=\"current\""
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<a href=\"/?view={view}\"{current}>{view} ({})</a>",
            page.listing.counts.for_view(view)
        );
    }
    html.push_str("</nav>\n");

    if page.listing.tasks.is_empty() {
        html.push_str("<p class=\"empty\">No tasks.</p>\n");
    } else {
        html.push_str("<ul class=\"tasks\">\n");
        for task in &page.listing.tasks {
            render_task(&mut html, task, &view_query);
        }
        html.push_str("</ul>\n");
    }

    let _ = writeln!(
        html,
        "<form class=\"clear-done\" method=\"post\" action=\"/clear_done?{view_query}\">\
         <button type=\"submit\">Clear completed ({})</button></form>",
        page.listing.counts.done
    );

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_task(html: &mut String, task: &Task, view_query: &str) {
    let id = encode_component(&task.id);
    let state = if task.done { "done" } else { "active" };
    let toggle_label = if task.done { "Undo" } else { "Done" };
    let _ = writeln!(
        html,
        "<li class=\"task {state}\" data-id=\"{}\">\
         <span class=\"title\">{}</span> \
         <time datetime=\"{created}\">{created}</time> \
         <form method=\"post\" action=\"/toggle/{id}?{view_query}\">\
         <button type=\"submit\">{toggle_label}</button></form> \
         <form method=\"post\" action=\"/delete/{id}?{view_query}\">\
         <button type=\"submit\">Delete</button></form></li>",
        escape_html(&task.id),
        escape_html(&task.title),
        created = escape_html(&task.created_at),
    );
}

#[cfg(test)]
mod tests {
    use super::{encode_component, escape_html, render_index, IndexPage};
    use tasklist_core::{MessageLevel, StatusMessage, Task, TaskCounts, TaskListing, TaskView};

    fn page(tasks: Vec<Task>, view: TaskView, view_param: &str) -> IndexPage {
        let counts = TaskCounts::of(&tasks);
        IndexPage {
            view_param: view_param.to_string(),
            listing: TaskListing {
                view,
                tasks,
                counts,
            },
            flash: None,
        }
    }

    #[test]
    fn escape_html_handles_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn encode_component_keeps_unreserved_characters() {
        assert_eq!(encode_component("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode_component("a/b?c d"), "a%2Fb%3Fc%20d");
    }

    #[test]
    fn task_titles_are_escaped() {
        let mut task = Task::new("<script>alert(1)</script>").unwrap();
        task.id = "id/1".to_string();
        let html = render_index(&page(vec![task], TaskView::All, "all"));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("action=\"/toggle/id%2F1?view=all\""));
        assert!(html.contains("action=\"/delete/id%2F1?view=all\""));
    }

    #[test]
    fn forms_preserve_the_raw_view_parameter() {
        let html = render_index(&page(Vec::new(), TaskView::All, "some view"));
        assert!(html.contains("action=\"/add?view=some%20view\""));
        assert!(html.contains("action=\"/clear_done?view=some%20view\""));
        assert!(html.contains("No tasks."));
    }

    #[test]
    fn tabs_show_counts_and_mark_current_view() {
        let mut done = Task::new("finished").unwrap();
        done.done = true;
        let open = Task::new("open one").unwrap();
        let mut page = page(vec![done], TaskView::Done, "done");
        page.listing.counts = TaskCounts::of(&[page.listing.tasks[0].clone(), open]);

        let html = render_index(&page);
        assert!(html.contains("<a href=\"/?view=all\">all (2)</a>"));
        assert!(html.contains("<a href=\"/?view=active\">active (1)</a>"));
        assert!(html.contains("<a href=\"/?view=done\" class=\"current\">done (1)</a>"));
    }

    #[test]
    fn flash_is_rendered_with_level_class() {
        let mut page = page(Vec::new(), TaskView::All, "all");
        page.flash = Some(StatusMessage::new(MessageLevel::Danger, "Too <short>"));

        let html = render_index(&page);
        assert!(html.contains("class=\"flash flash-danger\""));
        assert!(html.contains("Too &lt;short&gt;"));
    }
}
