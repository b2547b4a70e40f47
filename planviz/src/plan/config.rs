// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Walker configuration

use crate::error::{PlanVizError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a plan walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Maximum depth to descend; `None` walks the whole host graph
    pub max_depth: Option<usize>,

    /// Record runtime metrics on each node
    pub include_metrics: bool,

    /// Record output attributes on each node
    pub include_output: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            include_metrics: true,
            include_output: true,
        }
    }
}

impl WalkerConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Load a configuration from a JSON file; missing keys take defaults
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&raw).map_err(|e| {
            PlanVizError::Serialization(format!(
                "invalid walker config {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }
}
