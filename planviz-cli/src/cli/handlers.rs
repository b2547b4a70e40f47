// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Command handlers

use super::commands::OutputFormat;
use super::output::PlanFormatter;
use colored::*;
use planviz::{classify, extract_key_info, render, PlanNode, PlanSnapshot, PlanWalker, WalkerConfig};
use std::path::{Path, PathBuf};

/// Walk a snapshot and print or write the tree
pub fn handle_render(
    snapshot: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    template: Option<PathBuf>,
    max_depth: Option<usize>,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut walker_config = match config {
        Some(path) => WalkerConfig::from_path(&path)?,
        None => WalkerConfig::default(),
    };
    if max_depth.is_some() {
        walker_config.max_depth = max_depth;
    }

    let tree = load_tree(&snapshot, walker_config)?;
    let document = match template {
        Some(path) => {
            let template = std::fs::read_to_string(&path)?;
            render::embed_in_template(&template, &tree)?
        }
        None => PlanFormatter::format(&tree, format)?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, document)?;
            let shown = std::fs::canonicalize(&path).unwrap_or(path);
            println!("{} {}", "Done! File saved to:".green(), shown.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}

/// Print a table of the operators in a snapshot
pub fn handle_summary(
    snapshot: PathBuf,
    max_depth: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = WalkerConfig {
        max_depth,
        ..Default::default()
    };
    let tree = load_tree(&snapshot, config)?;
    println!("{}", PlanFormatter::format_summary(&tree));
    Ok(())
}

/// Classify one operator and print its key facts as JSON
pub fn handle_classify(name: String, description: String) -> Result<(), Box<dyn std::error::Error>> {
    let category = classify(&name);
    let key_info = extract_key_info(category, &name, &description);
    let document = serde_json::json!({
        "name": name,
        "type": category,
        "key_info": key_info,
    });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

/// Load a snapshot and walk its executed plan
fn load_tree(
    snapshot: &Path,
    config: WalkerConfig,
) -> Result<PlanNode, Box<dyn std::error::Error>> {
    log::info!("Parsing plan snapshot {}", snapshot.display());
    let snapshot = PlanSnapshot::from_path(snapshot)?;
    match PlanWalker::new(config).walk_dataframe(&snapshot) {
        Ok(tree) => {
            for node in tree.errors() {
                log::warn!(
                    "{}: {}",
                    node.name,
                    node.error.as_deref().unwrap_or_default()
                );
            }
            Ok(tree)
        }
        Err(e) => {
            eprintln!("{}", "Failed to generate plan.".red());
            eprintln!(
                "{}",
                "Could not access the execution plan. Ensure the snapshot contains an executed_plan."
                    .yellow()
            );
            Err(e.into())
        }
    }
}
