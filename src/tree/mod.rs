mod decode;
mod encode;
mod node;

pub use decode::parse_document;
pub use encode::{TESTS_TAG, escape_attribute, render_node, render_tests};
pub use node::{ID_ATTRIBUTE, Node, REFERENCE_TAG};
