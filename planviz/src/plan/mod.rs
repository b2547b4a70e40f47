// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Physical plan extraction
//!
//! This module turns the host's physical plan object graph into the
//! canonical `PlanNode` tree. It includes the tree model, the walker that
//! resolves adaptive, stage and reuse indirections, and its configuration.

pub mod config;
pub mod node;
pub mod walker;
