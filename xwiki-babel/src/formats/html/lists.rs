//! List nesting
//!
//! XWiki lists have no closing marker; nesting is read from the indentation of consecutive
//! item lines. [`ListScanner`] is a single left-to-right scan over the lines with a stack of
//! open containers:
//!
//! - deeper indentation opens a container inside the current item
//! - shallower indentation closes every container deeper than the line
//! - a different marker at the same indentation closes the container and opens the other kind
//! - any other line closes everything, and so does the end of input
//!
//! An item stays open while its children are emitted, so nested lists always end up inside
//! their parent `<li>`.

use crate::common::lines::{indent_width, split_indent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenList {
    kind: ListKind,
    indent: usize,
    item_open: bool,
    has_children: bool,
}

/// Classify a line as a list item: kind, indentation width, content.
pub fn list_item(line: &str) -> Option<(ListKind, usize, &str)> {
    let (indent, rest) = split_indent(line);
    let (kind, content) = if let Some(content) = rest.strip_prefix("* ") {
        (ListKind::Unordered, content)
    } else if let Some(content) = rest.strip_prefix("1. ") {
        (ListKind::Ordered, content)
    } else {
        return None;
    };
    Some((kind, indent_width(indent), content))
}

#[derive(Debug, Default)]
pub struct ListScanner {
    stack: Vec<OpenList>,
    out: Vec<String>,
}

impl ListScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) {
        match list_item(line) {
            Some((kind, indent, content)) => self.item(kind, indent, content),
            None => {
                self.close_all();
                self.out.push(line.to_string());
            }
        }
    }

    pub fn finish(mut self) -> Vec<String> {
        self.close_all();
        self.out
    }

    fn item(&mut self, kind: ListKind, indent: usize, content: &str) {
        while self.stack.last().is_some_and(|top| top.indent > indent) {
            self.close_top();
        }
        match self.stack.last().copied() {
            Some(top) if top.indent == indent && top.kind != kind => {
                self.close_top();
                self.open(kind, indent);
            }
            Some(top) if top.indent == indent => self.close_item(),
            _ => self.open(kind, indent),
        }

        self.out.push(format!("<li>{content}"));
        if let Some(top) = self.stack.last_mut() {
            top.item_open = true;
            top.has_children = false;
        }
    }

    fn open(&mut self, kind: ListKind, indent: usize) {
        if let Some(parent) = self.stack.last_mut() {
            parent.has_children = true;
        }
        self.out.push(format!("<{}>", kind.tag()));
        self.stack.push(OpenList {
            kind,
            indent,
            item_open: false,
            has_children: false,
        });
    }

    fn close_item(&mut self) {
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        if !top.item_open {
            return;
        }
        top.item_open = false;
        // A childless item is still the last line written.
        match (top.has_children, self.out.last_mut()) {
            (false, Some(last)) => last.push_str("</li>"),
            _ => self.out.push("</li>".to_string()),
        }
    }

    fn close_top(&mut self) {
        self.close_item();
        if let Some(list) = self.stack.pop() {
            self.out.push(format!("</{}>", list.kind.tag()));
        }
    }

    fn close_all(&mut self) {
        while !self.stack.is_empty() {
            self.close_top();
        }
    }
}

/// Render every list in `text`.
pub fn render_lists(text: &str) -> String {
    let mut scanner = ListScanner::new();
    for line in text.split('\n') {
        scanner.push(line);
    }
    scanner.finish().join("\n")
}
