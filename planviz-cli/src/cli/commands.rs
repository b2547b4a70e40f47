// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "planviz", version, about = "Render physical query plans as trees")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<log::Level>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk a plan snapshot and emit the tree
    Render {
        /// Plan snapshot (JSON)
        snapshot: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Viewer template with a {{ TREE_DATA }} placeholder
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Stop descending below this depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Walker configuration file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print a table of the operators in a plan snapshot
    Summary {
        /// Plan snapshot (JSON)
        snapshot: PathBuf,

        /// Stop descending below this depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Classify a single operator and print its key facts
    Classify {
        /// Operator name, e.g. BroadcastHashJoin
        name: String,

        /// Operator description
        description: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact JSON document
    Json,
    /// Indented JSON document
    Pretty,
    /// Indented text tree
    Text,
}
