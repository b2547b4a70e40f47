// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Rendering boundary
//!
//! The viewer front-end consumes one JSON document shaped like `PlanNode`.
//! A viewer template receives it through the `{{ TREE_DATA }}` placeholder.

use crate::error::{PlanVizError, Result};
use crate::plan::node::PlanNode;

/// Placeholder replaced by the tree document in viewer templates
pub const TREE_DATA_PLACEHOLDER: &str = "{{ TREE_DATA }}";

pub fn to_json(tree: &PlanNode) -> Result<String> {
    Ok(serde_json::to_string(tree)?)
}

pub fn to_json_pretty(tree: &PlanNode) -> Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

pub fn to_value(tree: &PlanNode) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(tree)?)
}

/// Inject the tree document into a viewer template
pub fn embed_in_template(template: &str, tree: &PlanNode) -> Result<String> {
    if !template.contains(TREE_DATA_PLACEHOLDER) {
        return Err(PlanVizError::Template(format!(
            "template does not contain the {} placeholder",
            TREE_DATA_PLACEHOLDER
        )));
    }
    let json = to_json(tree)?;
    Ok(template.replace(TREE_DATA_PLACEHOLDER, &json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::node::{KeyInfo, MetricValue, NodeCategory};
    use std::collections::BTreeMap;

    fn sample_tree() -> PlanNode {
        let mut metrics = BTreeMap::new();
        metrics.insert("rows".to_string(), MetricValue::Int(100));
        PlanNode {
            name: "TestNode".to_string(),
            description: "Test Description".to_string(),
            output: vec!["col1".to_string(), "col2".to_string()],
            category: NodeCategory::Other,
            key_info: KeyInfo::default(),
            children: Vec::new(),
            metrics,
            error: None,
        }
    }

    #[test]
    fn test_embed_in_template() {
        let template = "<html><script>const treeData = {{ TREE_DATA }};</script></html>";
        let html = embed_in_template(template, &sample_tree()).unwrap();

        assert!(!html.contains(TREE_DATA_PLACEHOLDER));
        assert!(html.contains("TestNode"));
        assert!(html.contains("Test Description"));
        assert!(html.contains(r#""rows":100"#));
    }

    #[test]
    fn test_template_without_placeholder() {
        let result = embed_in_template("<html></html>", &sample_tree());
        assert!(matches!(result, Err(PlanVizError::Template(_))));
    }

    #[test]
    fn test_document_fields() {
        let value = to_value(&sample_tree()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["children", "description", "key_info", "metrics", "name", "output", "type"]
        );
    }
}
