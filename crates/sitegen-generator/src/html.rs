//! HTML pretty-printing for rendered pages.
//!
//! Pages are parsed with `tl` and printed back from its node tree. Block
//! elements go on their own lines, indented two spaces per nesting level. A
//! block holding only inline content stays on one line. ASCII whitespace in
//! text is collapsed except inside `code`, `kbd` and `samp`. `pre`,
//! `textarea`, `script` and `style` elements are copied verbatim.
//!
//! Tags, comments and anything the parser skips (such as the doctype) are
//! sliced from the source, so attribute text is never rewritten.

use std::ops::Range;

use tl::NodeHandle;
use tracing::warn;

/// Elements laid out inline with surrounding text.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "del", "dfn", "em",
    "i", "img", "input", "ins", "kbd", "label", "mark", "q", "s", "samp", "select", "small",
    "span", "strong", "sub", "sup", "time", "u", "var", "wbr",
];

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content must not be reformatted.
const VERBATIM_ELEMENTS: &[&str] = &["pre", "script", "style", "textarea"];

/// Inline elements whose text keeps its whitespace.
const PRESERVE_WHITESPACE: &[&str] = &["code", "kbd", "samp"];

const INDENT: &str = "  ";

fn is_inline(name: &str) -> bool {
    INLINE_ELEMENTS.contains(&name)
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Re-indent an HTML document.
///
/// Input the parser rejects is returned unchanged.
pub fn prettify(html: &str) -> String {
    let dom = match tl::parse(html, tl::ParserOptions::default()) {
        Ok(dom) => dom,
        Err(e) => {
            warn!(error = ?e, "could not parse rendered HTML, writing it unformatted");
            return html.to_string();
        }
    };

    let tree = Tree {
        src: html,
        parser: dom.parser(),
    };
    let nodes = tree.children(dom.children(), 0..html.len());

    let mut out = Printer::default();
    out.print(&nodes);
    out.finish()
}

/// Document node, borrowing its text from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node<'a> {
    Text(&'a str),
    /// Printed on a line of its own, unchanged.
    Markup(&'a str),
    Element {
        name: String,
        open: &'a str,
        /// Empty for void and unclosed elements.
        close: &'a str,
        children: Vec<Node<'a>>,
    },
}

impl Node<'_> {
    fn is_inline(&self) -> bool {
        match self {
            Self::Text(_) => true,
            Self::Markup(_) => false,
            Self::Element { name, children, .. } => {
                is_inline(name) && children.iter().all(Node::is_inline)
            }
        }
    }

    fn write_inline(&self, out: &mut String, preserve: bool) {
        match self {
            Self::Text(text) if preserve => out.push_str(text),
            Self::Text(text) => collapse_into(out, text),
            Self::Markup(raw) => out.push_str(raw),
            Self::Element {
                name,
                open,
                close,
                children,
            } => {
                out.push_str(open);
                let preserve = preserve || PRESERVE_WHITESPACE.contains(&name.as_str());
                for child in children {
                    child.write_inline(out, preserve);
                }
                out.push_str(close);
            }
        }
    }
}

/// Converts the `tl` tree into [`Node`]s by source position.
struct Tree<'a, 'p> {
    src: &'a str,
    parser: &'p tl::Parser<'a>,
}

impl<'a> Tree<'a, '_> {
    /// Convert sibling nodes lying inside `region`. Source between them that
    /// has no node of its own is kept as text or markup.
    fn children(&self, handles: &[NodeHandle], region: Range<usize>) -> Vec<Node<'a>> {
        let mut nodes = Vec::new();
        let mut cursor = region.start;

        for handle in handles {
            let Some(node) = handle.get(self.parser) else {
                continue;
            };
            let Some(span) = self.span(node) else {
                continue;
            };
            if span.start < cursor || span.end > region.end {
                continue;
            }

            self.push_gap(&mut nodes, cursor..span.start);
            cursor = span.end;
            nodes.push(self.convert(node, span));
        }

        self.push_gap(&mut nodes, cursor..region.end);
        nodes
    }

    fn convert(&self, node: &tl::Node<'a>, span: Range<usize>) -> Node<'a> {
        match node {
            tl::Node::Tag(tag) => self.element(tag, span),
            tl::Node::Raw(_) => Node::Text(&self.src[span]),
            tl::Node::Comment(_) => Node::Markup(&self.src[span]),
        }
    }

    fn element(&self, tag: &tl::HTMLTag<'a>, span: Range<usize>) -> Node<'a> {
        let name = tag.name().as_utf8_str().to_ascii_lowercase();
        let raw = &self.src[span.clone()];
        if VERBATIM_ELEMENTS.contains(&name.as_str()) {
            return Node::Markup(raw);
        }

        let close_start = closing_tag_start(raw, &name).map_or(span.end, |i| span.start + i);
        let handles: Vec<NodeHandle> = tag.children().top().iter().copied().collect();
        let open_end = handles
            .iter()
            .filter_map(|h| h.get(self.parser))
            .filter_map(|n| self.span(n))
            .map(|r| r.start)
            .find(|&start| start > span.start && start <= close_start)
            .unwrap_or(close_start);

        Node::Element {
            children: self.children(&handles, open_end..close_start),
            name,
            open: &self.src[span.start..open_end],
            close: &self.src[close_start..span.end],
        }
    }

    fn push_gap(&self, nodes: &mut Vec<Node<'a>>, gap: Range<usize>) {
        if gap.is_empty() {
            return;
        }
        let text = &self.src[gap];
        if text.trim_ascii().is_empty() {
            nodes.push(Node::Text(text));
        } else {
            nodes.push(Node::Markup(text));
        }
    }

    /// Byte range of a node within the source.
    fn span(&self, node: &tl::Node<'a>) -> Option<Range<usize>> {
        match node {
            tl::Node::Tag(tag) => self.offset(tag.raw().as_bytes()),
            tl::Node::Raw(text) => self.offset(text.as_bytes()),
            tl::Node::Comment(text) => self
                .offset(text.as_bytes())
                .map(|range| self.widen_comment(range)),
        }
    }

    fn offset(&self, bytes: &[u8]) -> Option<Range<usize>> {
        let start = (bytes.as_ptr() as usize).checked_sub(self.src.as_ptr() as usize)?;
        let end = start.checked_add(bytes.len())?;
        let valid = end <= self.src.len()
            && self.src.is_char_boundary(start)
            && self.src.is_char_boundary(end);
        valid.then_some(start..end)
    }

    /// Include the `<!--` and `-->` fences when the parser left them out.
    fn widen_comment(&self, range: Range<usize>) -> Range<usize> {
        if self.src[..range.start].ends_with("<!--") && self.src[range.end..].starts_with("-->") {
            range.start - 4..range.end + 3
        } else {
            range
        }
    }
}

/// Offset of the `</name>` tag ending `raw`, if it has one.
fn closing_tag_start(raw: &str, name: &str) -> Option<usize> {
    let start = raw.rfind("</")?;
    let closing = raw[start + 2..].strip_suffix('>')?;
    (start > 0 && closing.trim_ascii_end().eq_ignore_ascii_case(name)).then_some(start)
}

#[derive(Debug, Default)]
struct Printer {
    out: String,
    pending: String,
    depth: usize,
}

impl Printer {
    fn print(&mut self, nodes: &[Node<'_>]) {
        for node in nodes {
            self.node(node);
        }
    }

    fn node(&mut self, node: &Node<'_>) {
        match node {
            Node::Text(text) => collapse_into(&mut self.pending, text),
            Node::Markup(raw) => self.line(raw),
            Node::Element { name, .. } if is_inline(name) => {
                node.write_inline(&mut self.pending, false);
            }
            Node::Element {
                name,
                open,
                children,
                ..
            } if is_void(name) => {
                self.line(open);
                self.print(children);
            }
            Node::Element { children, .. } if children.iter().all(Node::is_inline) => {
                self.flush();
                let mut line = String::new();
                node.write_inline(&mut line, false);
                self.line(&line);
            }
            Node::Element {
                open,
                close,
                children,
                ..
            } => {
                self.line(open);
                self.depth += 1;
                self.print(children);
                self.flush();
                self.depth -= 1;
                self.line(close);
            }
        }
    }

    /// Write pending inline content as its own line.
    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.write(&pending);
    }

    /// Flush, then write `raw` on a line of its own.
    fn line(&mut self, raw: &str) {
        self.flush();
        self.write(raw);
    }

    fn write(&mut self, line: &str) {
        let line = line.trim_ascii();
        if line.is_empty() {
            return;
        }
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn finish(mut self) -> String {
        self.flush();
        self.out
    }
}

/// Append `text` with runs of ASCII whitespace folded to one space.
fn collapse_into(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
}
