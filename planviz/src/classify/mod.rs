// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Operator classification
//!
//! Assigns each operator a `NodeCategory` from its name and extracts the
//! key facts relevant to that category from its free-text description.
//! Both functions are pure and total: a pattern that does not match is a
//! normal outcome.

pub mod patterns;

use crate::plan::node::{
    AggregateInfo, FilterInfo, JoinInfo, KeyInfo, NodeCategory, ProjectInfo, ScanInfo,
    ShuffleInfo, SortInfo,
};

/// Name keywords per category, tested in this order; first hit wins
///
/// Names often carry several keywords (`ShuffleHashJoin`,
/// `BroadcastExchange`), so the order is significant.
const CATEGORY_KEYWORDS: [(NodeCategory, &[&str]); 9] = [
    (NodeCategory::Shuffle, &["Exchange", "Shuffle"]),
    (NodeCategory::Scan, &["Scan", "BatchScan", "FileScan"]),
    (NodeCategory::Join, &["Join"]),
    (NodeCategory::Filter, &["Filter"]),
    (NodeCategory::Aggregate, &["Aggregate"]),
    (NodeCategory::Sort, &["Sort"]),
    (NodeCategory::Project, &["Project"]),
    (NodeCategory::Window, &["Window"]),
    (NodeCategory::Union, &["Union"]),
];

/// Categorize an operator by case-sensitive substring tests on its name
pub fn classify(name: &str) -> NodeCategory {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| name.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(NodeCategory::Other)
}

/// Extract the facts relevant to `category` from an operator description
pub fn extract_key_info(category: NodeCategory, name: &str, description: &str) -> KeyInfo {
    match category {
        NodeCategory::Join => {
            let is_broadcast = patterns::is_broadcast_join(name, description);
            KeyInfo::Join(JoinInfo {
                join_type: patterns::join_type(description),
                condition: patterns::join_condition(description),
                is_broadcast,
                build_side: if is_broadcast {
                    patterns::build_side(description)
                } else {
                    None
                },
            })
        }
        NodeCategory::Filter => KeyInfo::Filter(FilterInfo {
            condition: patterns::filter_condition(description),
        }),
        NodeCategory::Project => KeyInfo::Project(ProjectInfo {
            columns: patterns::selected_columns(description).filter(|c| !c.is_empty()),
        }),
        NodeCategory::Aggregate => KeyInfo::Aggregate(AggregateInfo {
            functions: patterns::aggregate_functions(description),
            group_by: patterns::grouping_keys(description).filter(|k| !k.is_empty()),
        }),
        NodeCategory::Scan => KeyInfo::Scan(ScanInfo {
            table: patterns::table_name(description),
            format: patterns::data_format(description),
            pushed_filters: patterns::pushed_filters(description).filter(|f| !f.is_empty()),
        }),
        NodeCategory::Sort => KeyInfo::Sort(SortInfo {
            order: patterns::sort_order(description),
        }),
        NodeCategory::Shuffle => KeyInfo::Shuffle(ShuffleInfo {
            partitioning_type: patterns::partitioning_type(description),
            partition_count: patterns::partition_count(description),
            is_shuffle: true,
        }),
        NodeCategory::Window | NodeCategory::Union | NodeCategory::Other => KeyInfo::default(),
    }
}
