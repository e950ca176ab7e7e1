use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::path::Path;

use crate::{
    error::{ResolveError, ResolveResult},
    tree::Node,
};

/// Decodes a markup document into its root element.
///
/// Only elements become children; text, comments and processing instructions
/// are kept solely as part of the enclosing element's raw `content`.
pub fn parse_document(source: &str, path: &Path) -> ResolveResult<Node> {
    let mut reader = Reader::from_str(source);
    // Open elements with the byte offset where their inner markup starts
    let mut open: Vec<(Node, usize)> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|err| {
            parse_error(
                path,
                format!("{err} (at byte {})", reader.error_position()),
            )
        })?;

        match event {
            Event::Start(start) => {
                let node = element(&start, path)?;
                open.push((node, reader.buffer_position() as usize));
            }
            Event::Empty(start) => {
                let node = element(&start, path)?;
                attach(&mut open, &mut root, node, path)?;
            }
            Event::End(end) => {
                let Some((mut node, content_start)) = open.pop() else {
                    return Err(parse_error(
                        path,
                        format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(end.local_name().as_ref())
                        ),
                    ));
                };
                node.content = source[content_start..before].to_string();
                attach(&mut open, &mut root, node, path)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((node, _)) = open.last() {
        return Err(parse_error(path, format!("element <{}> is never closed", node.name)));
    }

    root.ok_or_else(|| parse_error(path, "document has no root element".to_string()))
}

fn element(start: &BytesStart<'_>, path: &Path) -> ResolveResult<Node> {
    let mut node = Node::new(utf8(start.local_name().as_ref(), path)?);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| parse_error(path, err.to_string()))?;
        let key = utf8(attribute.key.local_name().as_ref(), path)?;
        let value = attribute
            .unescape_value()
            .map_err(|err| parse_error(path, err.to_string()))?;
        node.attributes.insert(key, value.into_owned());
    }

    Ok(node)
}

fn attach(
    open: &mut [(Node, usize)],
    root: &mut Option<Node>,
    node: Node,
    path: &Path,
) -> ResolveResult<()> {
    match open.last_mut() {
        Some((parent, _)) => parent.children.push(node),
        None if root.is_some() => {
            return Err(parse_error(
                path,
                format!("unexpected second root element <{}>", node.name),
            ));
        }
        None => *root = Some(node),
    }
    Ok(())
}

fn utf8(bytes: &[u8], path: &Path) -> ResolveResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|err| parse_error(path, err.to_string()))
}

fn parse_error(path: &Path, message: String) -> ResolveError {
    ResolveError::Parse {
        path: path.to_path_buf(),
        message,
    }
}
