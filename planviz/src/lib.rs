// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! planviz - physical query plan extraction for interactive tree diagrams
//!
//! planviz walks the executed physical plan of a query-engine dataframe,
//! resolves the engine's plan indirections and produces a canonical,
//! serializable tree that a viewer front-end renders.
//!
//! # Features
//!
//! - **Adaptive plans**: follows the final plan chosen by adaptive re-planning
//! - **Stage wrappers and reused exchanges**: drills into wrapped and shared sub-plans
//! - **Operator classification**: tags every node with one of ten categories
//! - **Key facts**: best-effort extraction of join types, predicates, columns,
//!   aggregate functions, scan sources, sort keys and shuffle partitioning
//! - **Fault containment**: a failing host accessor never aborts the walk
//!
//! # Usage
//!
//! ```ignore
//! use planviz::{parse_plan, render, PlanSnapshot};
//!
//! let snapshot = PlanSnapshot::from_path("plan.json")?;
//! if let Some(tree) = parse_plan(&snapshot) {
//!     println!("{}", render::to_json_pretty(&tree)?);
//! }
//! ```

pub mod classify;
pub mod error;
pub mod host;
pub mod plan;
pub mod render;

pub use classify::{classify, extract_key_info};
pub use error::{PlanVizError, Result};
pub use host::snapshot::{PlanSnapshot, SnapshotNode};
pub use host::{DataFrameSource, HostError, HostMetric, HostResult, PlanObject};
pub use plan::config::WalkerConfig;
pub use plan::node::{
    AggregateInfo, FilterInfo, JoinInfo, KeyInfo, MetricValue, NodeCategory, PlanNode,
    ProjectInfo, ScanInfo, ShuffleInfo, SortInfo,
};
pub use plan::walker::{parse_plan, walk, walk_dataframe, Indirection, PlanWalker};

/// planviz version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// planviz crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
