// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for planviz
//!
//! Loads plan snapshots, walks them and prints or writes the canonical
//! tree, a per-operator summary, or the classification of one operator.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_classify, handle_render, handle_summary};
