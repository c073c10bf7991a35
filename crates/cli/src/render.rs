//! Plain-text rendering of trees, steps and chat threads

use domain::entities::{ChatMessage, ChatRole, Section, StepState, TreeRow};
use domain::{DocumentationTree, FileSelectionTree, GenerationStatus};
use std::fmt::Write;

fn icon(row: &TreeRow<'_>) -> &'static str {
    if !row.node.is_folder() {
        "📄"
    } else if row.expanded {
        "📂"
    } else {
        "📁"
    }
}

/// Selection tree with a checkbox per row
pub fn selection_tree(tree: &FileSelectionTree) -> String {
    let mut out = String::new();
    for row in tree.rows() {
        let mark = if tree.is_selected(&row.node.path) {
            "[x]"
        } else {
            "[ ]"
        };
        let _ = writeln!(
            out,
            "{}{} {} {}",
            "  ".repeat(row.depth),
            mark,
            icon(&row),
            row.node.name
        );
    }
    out
}

/// Documentation tree; the open document is marked with `>`
pub fn documentation_tree(tree: &DocumentationTree) -> String {
    let mut out = String::new();
    for row in tree.rows() {
        let mark = if tree.selected() == Some(row.node.path.as_str()) {
            ">"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} {}{} {}",
            mark,
            "  ".repeat(row.depth),
            icon(&row),
            row.node.name
        );
    }
    out
}

pub fn generation_steps(status: &GenerationStatus) -> String {
    let mut out = String::new();
    for step in status.steps() {
        let mark = match step.state {
            StepState::Completed => "✓",
            StepState::InProgress => "◐",
            StepState::Pending => "○",
        };
        let _ = writeln!(out, "{} {}. {}", mark, step.number, step.description);
    }
    out
}

pub fn sections(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(out, "## [{}] {}", section.id, section.section_name);
        let _ = writeln!(out, "{}", section.section_content.trim_end());
        out.push('\n');
    }
    out
}

pub fn chat_messages(messages: &[ChatMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let who = match message.role {
            ChatRole::User => "you",
            ChatRole::Assistant => "assistant",
        };
        let _ = writeln!(out, "{}> {}", who, message.content);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::FileNode;

    fn sample() -> Vec<FileNode> {
        vec![FileNode::folder(
            "demo",
            "demo",
            vec![
                FileNode::file("main.py", "demo/main.py"),
                FileNode::folder(
                    "lib",
                    "demo/lib",
                    vec![FileNode::file("util.py", "demo/lib/util.py")],
                ),
            ],
        )]
    }

    #[test]
    fn test_selection_tree_marks_selected_rows() {
        let mut tree = FileSelectionTree::new(sample());
        tree.expand_all();
        tree.toggle_selection("demo/lib").expect("known path");

        let rendered = selection_tree(&tree);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "[x] 📂 demo");
        assert_eq!(lines[1], "  [ ] 📄 main.py");
        assert_eq!(lines[2], "  [x] 📂 lib");
        assert_eq!(lines[3], "    [x] 📄 util.py");
    }

    #[test]
    fn test_documentation_tree_marks_open_document() {
        let mut tree = DocumentationTree::new(sample());
        tree.toggle_expand("demo");
        tree.select("demo/main.py");

        let rendered = documentation_tree(&tree);
        assert!(rendered.contains(">   📄 main.py"));
        assert!(rendered.contains("    📁 lib"));
    }

    #[test]
    fn test_generation_steps() {
        let mut status = GenerationStatus::initializing();
        status.progress = 30.0;
        let rendered = generation_steps(&status);
        assert!(rendered.starts_with("✓ 1. Fetching files from the codebase"));
        assert!(rendered.contains("◐ 2. Analyzing the code"));
        assert!(rendered.contains("○ 3. Generating the document"));
    }

    #[test]
    fn test_chat_messages() {
        let rendered = chat_messages(&[
            ChatMessage::user("What is this?"),
            ChatMessage::assistant("A web server."),
        ]);
        assert_eq!(rendered, "you> What is this?\nassistant> A web server.\n");
    }
}
