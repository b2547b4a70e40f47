// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Plan walker
//!
//! Depth-first descent over the host plan graph. Before treating a node as
//! a regular operator, the walker resolves the host's plan indirections:
//! adaptive roots expose their final plan separately from their children,
//! query stages wrap an inner plan, and reused exchanges point at a plan
//! computed elsewhere.
//!
//! Faults are contained at the smallest scope: a failing field accessor
//! degrades that field, a failing child resolution is recorded on the node,
//! and only a missing executed plan aborts the walk.

use crate::classify::{classify, extract_key_info};
use crate::error::Result;
use crate::host::{DataFrameSource, HostError, PlanObject};
use crate::plan::config::WalkerConfig;
use crate::plan::node::{MetricValue, PlanNode};
use std::collections::BTreeMap;

/// How a node's effective children are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indirection {
    /// `AdaptiveSparkPlan`: the final chosen plan is the only child
    AdaptiveRoot,
    /// `*QueryStage*`: the wrapped plan is the only child
    StageWrapper,
    /// `ReusedExchange`: the referenced plan is the only child
    ReusedReference,
    /// Regular operator: every host child in order
    Default,
}

impl Indirection {
    /// Resolve the indirection kind from the operator name, first match wins
    pub fn detect(name: &str) -> Self {
        if name.contains("AdaptiveSparkPlan") {
            Indirection::AdaptiveRoot
        } else if name.contains("QueryStage") {
            Indirection::StageWrapper
        } else if name.contains("ReusedExchange") {
            Indirection::ReusedReference
        } else {
            Indirection::Default
        }
    }
}

/// Host name, empty on failure
pub fn read_name<P: PlanObject>(node: &P) -> String {
    node.node_name().unwrap_or_else(|e| {
        log::debug!("node name unavailable: {}", e);
        String::new()
    })
}

/// Verbose description, then the simple string, then the generic string
pub fn read_description<P: PlanObject>(node: &P) -> String {
    node.verbose_string_with_suffix()
        .or_else(|_| node.simple_string())
        .or_else(|_| node.generic_string())
        .unwrap_or_else(|e| {
            log::debug!("no description accessor succeeded: {}", e);
            String::new()
        })
}

/// Output attributes, empty on failure
pub fn read_output<P: PlanObject>(node: &P) -> Vec<String> {
    node.output().unwrap_or_else(|e| {
        log::debug!("output attributes unavailable: {}", e);
        Vec::new()
    })
}

/// Runtime metrics; entries whose value cannot be read are skipped one by one
pub fn read_metrics<P: PlanObject>(node: &P) -> BTreeMap<String, MetricValue> {
    let entries = match node.metrics() {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("metric map unavailable: {}", e);
            return BTreeMap::new();
        }
    };

    let mut metrics = BTreeMap::new();
    for entry in entries {
        match entry.value {
            Ok(value) => {
                metrics.insert(entry.name, value);
            }
            Err(e) => log::debug!("skipping metric '{}': {}", entry.name, e),
        }
    }
    metrics
}

/// Walks a host plan graph into a `PlanNode` tree
#[derive(Debug, Clone, Default)]
pub struct PlanWalker {
    config: WalkerConfig,
}

impl PlanWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Walk the plan rooted at `root`
    pub fn walk<P: PlanObject>(&self, root: &P) -> PlanNode {
        self.walk_node(root, 0)
    }

    /// Walk the executed plan of a dataframe-like source
    pub fn walk_dataframe<D: DataFrameSource>(&self, source: &D) -> Result<PlanNode> {
        let plan = source.executed_plan()?;
        Ok(self.walk(&plan))
    }

    fn walk_node<P: PlanObject>(&self, node: &P, depth: usize) -> PlanNode {
        let name = read_name(node);
        let description = read_description(node);
        let category = classify(&name);
        let key_info = extract_key_info(category, &name, &description);

        let mut plan_node = PlanNode {
            output: if self.config.include_output {
                read_output(node)
            } else {
                Vec::new()
            },
            metrics: if self.config.include_metrics {
                read_metrics(node)
            } else {
                BTreeMap::new()
            },
            name,
            description,
            category,
            key_info,
            children: Vec::new(),
            error: None,
        };

        let indirection = Indirection::detect(&plan_node.name);
        match self.collect_children(node, indirection, depth, &mut plan_node.children) {
            Ok(()) => {}
            Err(Stop::DepthLimit(max_depth)) => {
                log::warn!(
                    "stopping descent at '{}': maximum plan depth {} reached",
                    plan_node.name,
                    max_depth
                );
                plan_node.error = Some(format!(
                    "Traversal Error: maximum plan depth {} exceeded",
                    max_depth
                ));
            }
            Err(Stop::Fault(e)) => {
                log::warn!(
                    "traversal of '{}' stopped after {} child(ren): {}",
                    plan_node.name,
                    plan_node.children.len(),
                    e
                );
                plan_node.error = Some(format!("Traversal Error: {}", e));
            }
        }

        plan_node
    }

    /// Append the effective children of `node`, stopping at the first fault or at the depth bound
    fn collect_children<P: PlanObject>(
        &self,
        node: &P,
        indirection: Indirection,
        depth: usize,
        children: &mut Vec<PlanNode>,
    ) -> std::result::Result<(), Stop> {
        let single = match indirection {
            Indirection::AdaptiveRoot => Some(node.final_plan()?),
            Indirection::StageWrapper => Some(node.wrapped_plan()?),
            Indirection::ReusedReference => Some(node.referenced_plan()?),
            Indirection::Default => None,
        };

        match single {
            Some(target) => {
                log::debug!("resolving {:?} indirection", indirection);
                if let Some(target) = target {
                    self.push_child(&target, depth, children)?;
                }
            }
            None => {
                for child in node.children()? {
                    let child: P = child?;
                    self.push_child(&child, depth, children)?;
                }
            }
        }
        Ok(())
    }

    /// Walk one effective child of a node at `depth`, unless that passes the depth bound
    fn push_child<P: PlanObject>(
        &self,
        child: &P,
        depth: usize,
        children: &mut Vec<PlanNode>,
    ) -> std::result::Result<(), Stop> {
        if let Some(max_depth) = self.config.max_depth {
            if depth + 1 > max_depth {
                return Err(Stop::DepthLimit(max_depth));
            }
        }
        children.push(self.walk_node(child, depth + 1));
        Ok(())
    }
}

/// Why child collection for a node ended early
enum Stop {
    Fault(HostError),
    DepthLimit(usize),
}

impl From<HostError> for Stop {
    fn from(error: HostError) -> Self {
        Stop::Fault(error)
    }
}

/// Walk with the default configuration
pub fn walk<P: PlanObject>(root: &P) -> PlanNode {
    PlanWalker::default().walk(root)
}

/// Walk the executed plan of a dataframe-like source with the default configuration
pub fn walk_dataframe<D: DataFrameSource>(source: &D) -> Result<PlanNode> {
    PlanWalker::default().walk_dataframe(source)
}

/// User-facing entry point: `None` when the input is not a supported dataframe
pub fn parse_plan<D: DataFrameSource>(source: &D) -> Option<PlanNode> {
    match walk_dataframe(source) {
        Ok(tree) => Some(tree),
        Err(e) => {
            log::error!(
                "Could not access the execution plan. Ensure this is a supported dataframe. ({})",
                e
            );
            None
        }
    }
}
