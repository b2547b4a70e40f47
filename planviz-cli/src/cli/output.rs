// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Tree formatting for CLI output

use crate::cli::commands::OutputFormat;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use planviz::{render, NodeCategory, PlanNode};

/// Tree formatter for the different output formats
pub struct PlanFormatter;

impl PlanFormatter {
    /// Format a plan tree in the specified format
    pub fn format(tree: &PlanNode, format: OutputFormat) -> planviz::Result<String> {
        match format {
            OutputFormat::Json => render::to_json(tree),
            OutputFormat::Pretty => render::to_json_pretty(tree),
            OutputFormat::Text => Ok(Self::format_text(tree)),
        }
    }

    /// Format the tree with box-drawing connectors, one operator per line
    pub fn format_text(tree: &PlanNode) -> String {
        let mut output = String::new();
        Self::format_text_node(tree, &mut output, "", true, true);
        output
    }

    fn format_text_node(
        node: &PlanNode,
        output: &mut String,
        prefix: &str,
        is_last: bool,
        is_root: bool,
    ) {
        let connector = if is_root {
            ""
        } else if is_last {
            "└── "
        } else {
            "├── "
        };
        output.push_str(&format!(
            "{}{}{} [{}]\n",
            prefix,
            connector,
            node.name,
            Self::category_label(node.category)
        ));

        let child_prefix = if is_root {
            prefix.to_string()
        } else if is_last {
            format!("{}    ", prefix)
        } else {
            format!("{}│   ", prefix)
        };
        let detail_prefix = if node.children.is_empty() {
            format!("{}    ", child_prefix)
        } else {
            format!("{}│   ", child_prefix)
        };

        for (key, value) in node.key_info.pairs() {
            output.push_str(&format!("{}{}: {}\n", detail_prefix, key, value));
        }
        for (name, value) in &node.metrics {
            output.push_str(&format!("{}{} = {}\n", detail_prefix, name, value));
        }
        if let Some(error) = &node.error {
            output.push_str(&format!("{}{}\n", detail_prefix, error.red()));
        }

        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            Self::format_text_node(child, output, &child_prefix, i + 1 == count, false);
        }
    }

    fn category_label(category: NodeCategory) -> ColoredString {
        let label = category.as_str();
        match category {
            NodeCategory::Shuffle => label.red(),
            NodeCategory::Scan => label.green(),
            NodeCategory::Join => label.magenta(),
            NodeCategory::Filter => label.yellow(),
            NodeCategory::Aggregate => label.blue(),
            NodeCategory::Sort => label.cyan(),
            _ => label.normal(),
        }
    }

    /// Format a per-operator table using comfy-table
    pub fn format_summary(tree: &PlanNode) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Plan Summary".bold().green()));
        output.push_str(&format!(
            "Operators: {} | Depth: {}\n",
            tree.node_count(),
            tree.depth()
        ));
        let errors = tree.errors();
        if !errors.is_empty() {
            output.push_str(&format!(
                "{}\n",
                format!("Traversal errors: {}", errors.len()).yellow()
            ));
        }
        output.push('\n');

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            ["Operator", "Type", "Key Info", "Metrics"]
                .iter()
                .map(|h| Cell::new(h).fg(Color::Green))
                .collect::<Vec<_>>(),
        );

        for (depth, node) in tree.iter() {
            let key_info = node
                .key_info
                .pairs()
                .into_iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect::<Vec<_>>()
                .join("\n");
            table.add_row(vec![
                format!("{}{}", "  ".repeat(depth), node.name),
                node.category.to_string(),
                key_info,
                node.metrics.len().to_string(),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');

        if !errors.is_empty() {
            output.push_str(&format!("\n{}\n", "Errors:".bold().yellow()));
            for (i, node) in errors.iter().enumerate() {
                if let Some(error) = &node.error {
                    output.push_str(&format!("  {}. {}: {}\n", i + 1, node.name, error.yellow()));
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planviz::{walk, SnapshotNode};

    fn sample_tree() -> PlanNode {
        let plan = SnapshotNode::new("Project", "Project [id#0, name#1]").with_children(vec![
            SnapshotNode::new("Filter", "Filter (id#0 > 10)")
                .with_children(vec![SnapshotNode::new("LocalTableScan", "LocalTableScan")]),
            SnapshotNode::new("Sort", "Sort [id#0 ASC]").with_fault("children"),
        ]);
        walk(&&plan)
    }

    #[test]
    fn test_text_tree_layout() {
        colored::control::set_override(false);
        let text = PlanFormatter::format_text(&sample_tree());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Project [project]");
        assert_eq!(lines[1], "│   columns: id, name");
        assert_eq!(lines[2], "├── Filter [filter]");
        assert_eq!(lines[3], "│   │   condition: (id#0 > 10)");
        assert_eq!(lines[4], "│   └── LocalTableScan [scan]");
        assert_eq!(lines[5], "└── Sort [sort]");
        assert_eq!(lines[6], "        order: id ASC");
        assert!(lines[7].contains("Traversal Error"));
    }

    #[test]
    fn test_json_formats() {
        let tree = sample_tree();
        let compact = PlanFormatter::format(&tree, OutputFormat::Json).unwrap();
        let pretty = PlanFormatter::format(&tree, OutputFormat::Pretty).unwrap();
        assert!(!compact.contains('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&compact).unwrap(),
            serde_json::from_str::<serde_json::Value>(&pretty).unwrap()
        );
    }

    #[test]
    fn test_summary_lists_every_operator() {
        colored::control::set_override(false);
        let summary = PlanFormatter::format_summary(&sample_tree());
        assert!(summary.contains("Operators: 4 | Depth: 3"));
        assert!(summary.contains("LocalTableScan"));
        assert!(summary.contains("Traversal errors: 1"));
        assert!(summary.contains("condition: (id#0 > 10)"));
    }
}
