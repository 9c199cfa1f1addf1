//! Minimal document queries used by the listing rules.
//!
//! Every lookup returns an `Option` (or an empty `Vec`) instead of failing, so
//! each extracted field can pick its own default when markup drifts.

use scraper::{ElementRef, Html, Node as DomNode};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Tag name plus an optional attribute constraint.
///
/// A `class` constraint matches any one of the element's class tokens; any
/// other attribute must match exactly.
#[derive(Debug, Clone, Copy)]
pub struct Query<'q> {
    tag: &'q str,
    attr: Option<(&'q str, &'q str)>,
}

impl<'q> Query<'q> {
    pub const fn tag(tag: &'q str) -> Self {
        Self { tag, attr: None }
    }

    pub const fn with_attr(self, name: &'q str, value: &'q str) -> Self {
        Self {
            tag: self.tag,
            attr: Some((name, value)),
        }
    }

    pub const fn with_class(self, class: &'q str) -> Self {
        self.with_attr("class", class)
    }

    pub const fn with_id(self, id: &'q str) -> Self {
        self.with_attr("id", id)
    }

    fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        if !value.name().eq_ignore_ascii_case(self.tag) {
            return false;
        }
        match self.attr {
            None => true,
            Some(("class", class)) => value.classes().any(|c| c == class),
            Some((name, expected)) => value.attr(name) == Some(expected),
        }
    }
}

/// A parsed HTML page.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(raw: &str) -> Self {
        Self {
            html: Html::parse_document(raw),
        }
    }

    /// First element in document order matching `query`.
    pub fn find(&self, query: Query<'_>) -> Option<Element<'_>> {
        self.elements().find(|e| query.matches(e)).map(Element)
    }

    /// All elements in document order matching `query`.
    pub fn find_all(&self, query: Query<'_>) -> Vec<Element<'_>> {
        self.elements()
            .filter(|e| query.matches(e))
            .map(Element)
            .collect()
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }
}

/// A borrowed element inside a [`Document`].
#[derive(Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// First descendant (excluding self) matching `query`.
    pub fn find(&self, query: Query<'_>) -> Option<Element<'a>> {
        self.descendants().find(|e| query.matches(e)).map(Element)
    }

    pub fn find_all(&self, query: Query<'_>) -> Vec<Element<'a>> {
        self.descendants()
            .filter(|e| query.matches(e))
            .map(Element)
            .collect()
    }

    /// Concatenated text of every descendant text node, untrimmed.
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Indented serialization of this subtree: one tag or text run per line,
    /// one space of indentation per nesting level, blank text dropped.
    pub fn prettify(&self) -> String {
        let mut out = String::new();
        write_pretty(self.0, 0, &mut out);
        out
    }

    fn descendants(&self) -> impl Iterator<Item = ElementRef<'a>> {
        self.0.descendants().skip(1).filter_map(ElementRef::wrap)
    }
}

fn write_pretty(element: ElementRef<'_>, depth: usize, out: &mut String) {
    let value = element.value();
    let name = value.name();

    push_indent(out, depth);
    out.push('<');
    out.push_str(name);
    for (attr, attr_value) in value.attrs() {
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        out.push_str(&escape(attr_value, true));
        out.push('"');
    }

    if VOID_ELEMENTS.contains(&name) {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");

    let raw_text = matches!(name, "script" | "style");
    for child in element.children() {
        match child.value() {
            DomNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    write_pretty(child_element, depth + 1, out);
                }
            }
            DomNode::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    continue;
                }
                push_indent(out, depth + 1);
                if raw_text {
                    out.push_str(trimmed);
                } else {
                    out.push_str(&escape(trimmed, false));
                }
                out.push('\n');
            }
            DomNode::Comment(comment) => {
                push_indent(out, depth + 1);
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->\n");
            }
            _ => {}
        }
    }

    push_indent(out, depth);
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

fn push_indent(out: &mut String, depth: usize) {
    out.extend(std::iter::repeat_n(' ', depth));
}

fn escape(text: &str, in_attr: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if in_attr => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
