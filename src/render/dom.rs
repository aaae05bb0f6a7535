// src/render/dom.rs
//! Minimal document model for rendered output regions

/// A rendered node: either plain text or an element with children
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Element {
        tag: &'static str,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn element(tag: &'static str, children: Vec<Node>) -> Self {
        Node::Element { tag, children }
    }

    /// Element holding a single text child
    pub fn with_text(tag: &'static str, content: impl Into<String>) -> Self {
        Node::element(tag, vec![Node::text(content)])
    }

    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Node::Element { tag, .. } => Some(*tag),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children.as_slice(),
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Number of elements with `tag` in this subtree, self included
    pub fn count(&self, tag: &str) -> usize {
        let own = usize::from(self.tag() == Some(tag));
        own + self.children().iter().map(|c| c.count(tag)).sum::<usize>()
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Element { tag, children } => {
                out.push('<');
                out.push_str(tag);
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    /// Terminal-friendly rendering: block elements end with a newline,
    /// table cells are separated by ` | `.
    pub fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element { tag: "tr", children } => {
                let cells: Vec<String> = children.iter().map(Node::text_content).collect();
                out.push_str(&cells.join(" | "));
                out.push('\n');
            }
            Node::Element { tag, children } => {
                for child in children {
                    child.write_text(out);
                }
                if matches!(*tag, "p" | "pre" | "table" | "div") && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }
}

/// A named output region of the page, addressed by element id
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: &'static str,
    children: Vec<Node>,
}

impl Region {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Replace all content with a single text node
    pub fn set_text(&mut self, content: impl Into<String>) {
        self.children = vec![Node::text(content)];
    }

    pub fn append(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    pub fn count(&self, tag: &str) -> usize {
        self.children.iter().map(|c| c.count(tag)).sum()
    }

    pub fn to_html(&self) -> String {
        let mut out = format!("<div id=\"{}\">", self.id);
        for child in &self.children {
            child.write_html(&mut out);
        }
        out.push_str("</div>");
        out
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.write_text(&mut out);
        }
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_text_replaces_children() {
        let mut region = Region::new("extractedText");
        region.append(Node::with_text("p", "old"));
        region.set_text("new");
        assert_eq!(region.children().len(), 1);
        assert_eq!(region.text_content(), "new");
    }

    #[test]
    fn test_html_is_escaped() {
        let mut region = Region::new("extractedText");
        region.set_text("<b>&\"'");
        assert_eq!(
            region.to_html(),
            "<div id=\"extractedText\">&lt;b&gt;&amp;&quot;&#39;</div>"
        );
    }

    #[test]
    fn test_table_text_layout() {
        let table = Node::element(
            "table",
            vec![
                Node::element("tr", vec![Node::with_text("th", "A"), Node::with_text("th", "B")]),
                Node::element("tr", vec![Node::with_text("td", "1"), Node::with_text("td", "")]),
            ],
        );
        let mut out = String::new();
        table.write_text(&mut out);
        assert_eq!(out, "A | B\n1 | \n");
        assert_eq!(table.count("tr"), 2);
        assert_eq!(table.count("td"), 2);
    }
}
