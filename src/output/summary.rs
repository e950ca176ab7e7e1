use crate::{resolver::ModuleConfig, tree::Node};

/// Human-readable outline of a resolved config: declarations, then every
/// resolved test with its module and instruction tree.
pub fn render_summary(config: &ModuleConfig) -> String {
    let mut out = String::new();

    out.push_str("============= TestConfig ================\n");
    out.push_str(&format!("| FilePath: {}\n", config.file_path.display()));

    out.push_str("=========== Declared Tests ==============\n");
    for name in config.declarations.names() {
        out.push_str(&format!("| {name}\n"));
    }

    out.push_str("=========== Resolved Tests ==============\n");
    for test in &config.resolved_tests {
        let module = test
            .origin_module
            .as_ref()
            .map(|module| module.display().to_string())
            .unwrap_or_default();
        out.push_str(&format!("| {} (module: {module})\n", test.name));
        outline(&test.children, 1, &mut out);
    }

    out
}

fn outline(nodes: &[Node], depth: usize, out: &mut String) {
    for node in nodes {
        out.push_str(&"> ".repeat(depth));
        out.push_str(&node.name);
        if !node.attributes.is_empty() {
            let attributes: Vec<String> = node
                .attributes
                .iter()
                .map(|(name, value)| format!("{name} : {value}"))
                .collect();
            out.push_str(&format!(" {{ {} }}", attributes.join(", ")));
        }
        out.push('\n');
        outline(&node.children, depth + 1, out);
    }
}
