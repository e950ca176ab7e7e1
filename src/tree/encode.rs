use quick_xml::escape::escape;
use std::borrow::Cow;

use crate::tree::Node;

/// Root element wrapping the resolved tests.
pub const TESTS_TAG: &str = "tests";

/// Renders resolved test trees as a single `<tests>` document.
pub fn render_tests(tests: &[Node]) -> String {
    let mut out = String::new();
    out.push('<');
    out.push_str(TESTS_TAG);
    out.push('>');
    for test in tests {
        render_node(test, &mut out);
    }
    out.push_str("</");
    out.push_str(TESTS_TAG);
    out.push('>');
    out
}

/// Renders one node and its subtree.
///
/// Childless nodes with raw content keep that content verbatim.
pub fn render_node(node: &Node, out: &mut String) {
    out.push('<');
    out.push_str(&node.name);
    for (name, value) in &node.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }

    if node.children.is_empty() {
        if node.content.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        out.push_str(&node.content);
    } else {
        out.push('>');
        for child in &node.children {
            render_node(child, out);
        }
    }

    out.push_str("</");
    out.push_str(&node.name);
    out.push('>');
}

/// Escapes `& " ' < >` in an attribute value.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value)
}
