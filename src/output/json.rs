use serde::{Deserialize, Serialize};

use crate::{resolver::ModuleConfig, tree::Node};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonTestConfig {
    pub path: String,
    pub tests: Vec<JsonTestNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonTestNode {
    pub name: String,
    pub module: String,
    pub instructions: Vec<JsonInstructionNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonInstructionNode {
    pub name: String,
    #[serde(rename = "attr")]
    pub attributes: Vec<JsonNodeAttr>,
    pub instructions: Vec<JsonInstructionNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonNodeAttr {
    pub name: String,
    pub value: String,
}

impl From<&ModuleConfig> for JsonTestConfig {
    fn from(config: &ModuleConfig) -> Self {
        Self {
            path: config.file_path.display().to_string(),
            tests: config.resolved_tests.iter().map(JsonTestNode::from).collect(),
        }
    }
}

impl From<&Node> for JsonTestNode {
    fn from(test: &Node) -> Self {
        Self {
            name: test.name.clone(),
            module: test
                .origin_module
                .as_ref()
                .map(|module| module.display().to_string())
                .unwrap_or_default(),
            instructions: test.children.iter().map(JsonInstructionNode::from).collect(),
        }
    }
}

impl From<&Node> for JsonInstructionNode {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            attributes: node
                .attributes
                .iter()
                .map(|(name, value)| JsonNodeAttr {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            instructions: node.children.iter().map(Self::from).collect(),
        }
    }
}

/// Projects resolved tests into the JSON shape consumed by test runners.
pub fn render_json(config: &ModuleConfig) -> serde_json::Result<String> {
    serde_json::to_string(&JsonTestConfig::from(config))
}
