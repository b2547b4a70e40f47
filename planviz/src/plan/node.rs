// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Canonical plan tree
//!
//! A `PlanNode` is what the viewer front-end consumes. Field names on the
//! wire are part of that contract and must stay stable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic category of an operator, used for coloring and key facts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Shuffle,
    Scan,
    Join,
    Filter,
    Aggregate,
    Sort,
    Project,
    Window,
    Union,
    Other,
}

impl NodeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Shuffle => "shuffle",
            NodeCategory::Scan => "scan",
            NodeCategory::Join => "join",
            NodeCategory::Filter => "filter",
            NodeCategory::Aggregate => "aggregate",
            NodeCategory::Sort => "sort",
            NodeCategory::Project => "project",
            NodeCategory::Window => "window",
            NodeCategory::Union => "union",
            NodeCategory::Other => "other",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric value of a runtime metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Int(v) => write!(f, "{}", v),
            MetricValue::Float(v) => write!(f, "{}", v),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Join facts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_broadcast: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_side: Option<String>,
}

/// Filter facts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Projection facts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

/// Aggregation facts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<Vec<String>>,
}

/// Scan facts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushed_filters: Option<Vec<String>>,
}

/// Sort facts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SortInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

/// Shuffle facts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShuffleInfo {
    #[serde(rename = "shuffle_type", skip_serializing_if = "Option::is_none")]
    pub partitioning_type: Option<String>,
    #[serde(rename = "partitions", skip_serializing_if = "Option::is_none")]
    pub partition_count: Option<String>,
    pub is_shuffle: bool,
}

impl Default for ShuffleInfo {
    fn default() -> Self {
        Self {
            partitioning_type: None,
            partition_count: None,
            is_shuffle: true,
        }
    }
}

/// Key facts extracted from an operator description
///
/// One payload per category; window, union and other carry nothing.
/// Serializes as a flat object of the facts that were found.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KeyInfo {
    Join(JoinInfo),
    Filter(FilterInfo),
    Project(ProjectInfo),
    Aggregate(AggregateInfo),
    Scan(ScanInfo),
    Sort(SortInfo),
    Shuffle(ShuffleInfo),
    Empty {},
}

impl KeyInfo {
    /// Number of facts that were found
    pub fn len(&self) -> usize {
        self.pairs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Facts rendered as `(key, value)` strings, sorted by key
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut text = |key: &str, value: &Option<String>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value.clone()));
            }
        };
        match self {
            KeyInfo::Join(info) => {
                text("join_type", &info.join_type);
                text("condition", &info.condition);
                if info.is_broadcast {
                    text("is_broadcast", &Some(true.to_string()));
                }
                text("build_side", &info.build_side);
            }
            KeyInfo::Filter(info) => text("condition", &info.condition),
            KeyInfo::Project(info) => text("columns", &joined(&info.columns)),
            KeyInfo::Aggregate(info) => {
                text("functions", &joined(&info.functions));
                text("group_by", &joined(&info.group_by));
            }
            KeyInfo::Scan(info) => {
                text("table", &info.table);
                text("format", &info.format);
                text("pushed_filters", &joined(&info.pushed_filters));
            }
            KeyInfo::Sort(info) => text("order", &info.order),
            KeyInfo::Shuffle(info) => {
                text("shuffle_type", &info.partitioning_type);
                text("partitions", &info.partition_count);
                text("is_shuffle", &Some(info.is_shuffle.to_string()));
            }
            KeyInfo::Empty {} => {}
        }
        pairs.sort();
        pairs
    }
}

fn joined(items: &Option<Vec<String>>) -> Option<String> {
    items.as_ref().map(|items| items.join(", "))
}

impl Default for KeyInfo {
    fn default() -> Self {
        KeyInfo::Empty {}
    }
}

/// One operator of the canonical plan tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanNode {
    pub name: String,
    pub description: String,
    pub output: Vec<String>,
    #[serde(rename = "type")]
    pub category: NodeCategory,
    pub key_info: KeyInfo,
    pub children: Vec<PlanNode>,
    pub metrics: BTreeMap<String, MetricValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlanNode {
    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(PlanNode::node_count).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(PlanNode::depth).max().unwrap_or(0)
    }

    /// Pre-order iterator over `(depth, node)` pairs
    pub fn iter(&self) -> PlanNodeIter<'_> {
        PlanNodeIter {
            stack: vec![(0, self)],
        }
    }

    /// Nodes that carry a traversal error
    pub fn errors(&self) -> Vec<&PlanNode> {
        self.iter()
            .filter(|(_, node)| node.error.is_some())
            .map(|(_, node)| node)
            .collect()
    }

    /// First node (pre-order) whose name contains `needle`
    pub fn find(&self, needle: &str) -> Option<&PlanNode> {
        self.iter()
            .map(|(_, node)| node)
            .find(|node| node.name.contains(needle))
    }
}

/// Depth-first pre-order traversal of a `PlanNode` tree
pub struct PlanNodeIter<'a> {
    stack: Vec<(usize, &'a PlanNode)>,
}

impl<'a> Iterator for PlanNodeIter<'a> {
    type Item = (usize, &'a PlanNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}
