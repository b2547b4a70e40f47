// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! JSON plan snapshots
//!
//! A snapshot captures the host plan graph accessor by accessor so it can
//! be walked outside the host process. String accessors that are absent
//! behave as missing host accessors; absent collections and indirection
//! targets are empty. Names listed in `faults` fail with an injected error,
//! which reproduces host faults without the host.

use crate::error::{PlanVizError, Result};
use crate::host::{DataFrameSource, HostError, HostMetric, HostResult, PlanObject};
use crate::plan::node::MetricValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Captured top-level dataframe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_plan: Option<SnapshotNode>,
}

/// Captured plan node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_plan: Option<Box<SnapshotNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapped_plan: Option<Box<SnapshotNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_plan: Option<Box<SnapshotNode>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub faults: Vec<String>,
}

impl PlanSnapshot {
    pub fn new(executed_plan: SnapshotNode) -> Self {
        Self {
            executed_plan: Some(executed_plan),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PlanVizError::Snapshot(e.to_string()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|e| PlanVizError::Snapshot(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        log::debug!("loading plan snapshot from {}", path.display());
        Self::from_reader(std::io::BufReader::new(file))
    }
}

impl SnapshotNode {
    /// Node with a name and a verbose description
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            node_name: Some(name.to_string()),
            verbose_string: Some(description.to_string()),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<SnapshotNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_output(mut self, output: &[&str]) -> Self {
        self.output = output.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_metric(mut self, name: &str, value: serde_json::Value) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    pub fn with_final_plan(mut self, plan: SnapshotNode) -> Self {
        self.final_plan = Some(Box::new(plan));
        self
    }

    pub fn with_wrapped_plan(mut self, plan: SnapshotNode) -> Self {
        self.wrapped_plan = Some(Box::new(plan));
        self
    }

    pub fn with_referenced_plan(mut self, plan: SnapshotNode) -> Self {
        self.referenced_plan = Some(Box::new(plan));
        self
    }

    pub fn with_fault(mut self, accessor: &str) -> Self {
        self.faults.push(accessor.to_string());
        self
    }

    fn check(&self, accessor: &str) -> HostResult<()> {
        if self.faults.iter().any(|f| f == accessor) {
            Err(HostError::failed(accessor, "injected fault"))
        } else {
            Ok(())
        }
    }

    fn text(&self, accessor: &str, value: &Option<String>) -> HostResult<String> {
        self.check(accessor)?;
        value.clone().ok_or_else(|| HostError::missing(accessor))
    }
}

fn metric_value(name: &str, value: &serde_json::Value) -> HostResult<MetricValue> {
    if let Some(v) = value.as_i64() {
        Ok(MetricValue::Int(v))
    } else if let Some(v) = value.as_f64() {
        Ok(MetricValue::Float(v))
    } else {
        Err(HostError::failed(
            name,
            format!("metric value {} is not numeric", value),
        ))
    }
}

impl<'a> PlanObject for &'a SnapshotNode {
    fn node_name(&self) -> HostResult<String> {
        self.text("node_name", &self.node_name)
    }

    fn verbose_string_with_suffix(&self) -> HostResult<String> {
        self.text("verbose_string", &self.verbose_string)
    }

    fn simple_string(&self) -> HostResult<String> {
        self.text("simple_string", &self.simple_string)
    }

    fn generic_string(&self) -> HostResult<String> {
        self.text("string", &self.string)
    }

    fn output(&self) -> HostResult<Vec<String>> {
        self.check("output")?;
        Ok(self.output.clone())
    }

    fn metrics(&self) -> HostResult<Vec<HostMetric>> {
        self.check("metrics")?;
        Ok(self
            .metrics
            .iter()
            .map(|(name, value)| HostMetric::new(name.clone(), metric_value(name, value)))
            .collect())
    }

    fn children(&self) -> HostResult<Vec<HostResult<Self>>> {
        self.check("children")?;
        let node: &'a SnapshotNode = *self;
        Ok(node.children.iter().map(Ok).collect())
    }

    fn final_plan(&self) -> HostResult<Option<Self>> {
        self.check("final_plan")?;
        let node: &'a SnapshotNode = *self;
        Ok(node.final_plan.as_deref())
    }

    fn wrapped_plan(&self) -> HostResult<Option<Self>> {
        self.check("wrapped_plan")?;
        let node: &'a SnapshotNode = *self;
        Ok(node.wrapped_plan.as_deref())
    }

    fn referenced_plan(&self) -> HostResult<Option<Self>> {
        self.check("referenced_plan")?;
        let node: &'a SnapshotNode = *self;
        Ok(node.referenced_plan.as_deref())
    }
}

impl DataFrameSource for PlanSnapshot {
    type Plan<'a> = &'a SnapshotNode;

    fn executed_plan(&self) -> HostResult<Self::Plan<'_>> {
        self.executed_plan
            .as_ref()
            .ok_or_else(|| HostError::missing("executed_plan"))
    }
}
