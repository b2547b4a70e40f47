// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Fact extraction rules for operator descriptions
//!
//! Each rule is independent and returns `None` when its pattern does not
//! match. The description format is not stable across engine versions, so
//! a rule that stops matching must only lose its own fact.

use once_cell::sync::Lazy;
use regex::Regex;

/// Projected columns kept per node
pub const MAX_COLUMNS: usize = 5;
/// Aggregate functions kept per node
pub const MAX_FUNCTIONS: usize = 3;
/// Grouping keys kept per node
pub const MAX_GROUP_KEYS: usize = 3;
/// Pushed-down filters kept per node
pub const MAX_PUSHED_FILTERS: usize = 3;

/// Data formats recognised in scan descriptions, in lookup order
pub const SCAN_FORMATS: [&str; 6] = ["parquet", "orc", "json", "csv", "avro", "delta"];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid fact extraction regex")
}

static ATTRIBUTE_ID_RE: Lazy<Regex> = Lazy::new(|| compile(r"#\d+L?"));
static JOIN_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"\b(Inner|LeftOuter|RightOuter|FullOuter|LeftSemi|LeftAnti|Cross)\s*Join")
});
static JOIN_CONDITION_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?:condition|BuildSide):\s*([^\n]+)"));
static BUILD_SIDE_RE: Lazy<Regex> = Lazy::new(|| compile(r"BuildSide:\s*(Left|Right)"));
static FILTER_RE: Lazy<Regex> = Lazy::new(|| compile(r"Filter\s+([^\n]+)"));
static LEADING_COLON_RE: Lazy<Regex> = Lazy::new(|| compile(r"^:\s*"));
static BRACKET_LIST_RE: Lazy<Regex> = Lazy::new(|| compile(r"\[([^\]]+)\]"));
static AGGREGATE_FN_RE: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)\b(sum|count|avg|min|max|first|last|collect_list|collect_set)\s*\([^)]*\)")
});
static GROUPING_KEYS_RE: Lazy<Regex> = Lazy::new(|| compile(r"keys=\[([^\]]+)\]"));
static TABLE_LABEL_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?:Location|Table):\s*([^\n,]+)"));
static QUALIFIED_NAME_RE: Lazy<Regex> = Lazy::new(|| compile(r"(\w+\.)?(\w+)\.(\w+)"));
static PUSHED_FILTERS_RE: Lazy<Regex> = Lazy::new(|| compile(r"PushedFilters?:\s*\[([^\]]+)\]"));
static SORT_ORDER_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)\[(.*?)\s+(ASC|DESC)"));
static PARTITIONING_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)(hash|range)partitioning"));
static PARTITION_COUNT_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?i)(\d+)\s*partitions?"));

/// Remove `#<digits>` and `#<digits>L` attribute-id suffixes
pub fn strip_attribute_ids(text: &str) -> String {
    ATTRIBUTE_ID_RE.replace_all(text, "").into_owned()
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim)
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn join_type(description: &str) -> Option<String> {
    capture(&JOIN_TYPE_RE, description).map(str::to_string)
}

pub fn join_condition(description: &str) -> Option<String> {
    capture(&JOIN_CONDITION_RE, description).and_then(|c| non_empty(c.trim()))
}

/// Broadcast joins matter for performance analysis
pub fn is_broadcast_join(name: &str, description: &str) -> bool {
    name.contains("Broadcast") || description.to_lowercase().contains("broadcast")
}

pub fn build_side(description: &str) -> Option<String> {
    capture(&BUILD_SIDE_RE, description).map(str::to_string)
}

pub fn filter_condition(description: &str) -> Option<String> {
    let condition = capture(&FILTER_RE, description)?.trim();
    non_empty(&LEADING_COLON_RE.replace(condition, ""))
}

pub fn selected_columns(description: &str) -> Option<Vec<String>> {
    let list = capture(&BRACKET_LIST_RE, description)?;
    Some(
        split_list(list)
            .map(strip_attribute_ids)
            .take(MAX_COLUMNS)
            .collect(),
    )
}

pub fn aggregate_functions(description: &str) -> Option<Vec<String>> {
    let functions: Vec<String> = AGGREGATE_FN_RE
        .captures_iter(description)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .take(MAX_FUNCTIONS)
        .collect();
    if functions.is_empty() {
        None
    } else {
        Some(functions)
    }
}

pub fn grouping_keys(description: &str) -> Option<Vec<String>> {
    let list = capture(&GROUPING_KEYS_RE, description)?;
    Some(
        split_list(list)
            .map(strip_attribute_ids)
            .take(MAX_GROUP_KEYS)
            .collect(),
    )
}

/// Table or file name of a scan
///
/// A labelled value wins over the qualified-name fallback, even when the
/// labelled value reduces to nothing.
pub fn table_name(description: &str) -> Option<String> {
    if let Some(value) = capture(&TABLE_LABEL_RE, description) {
        let value = value.trim();
        if value.contains('/') {
            return value
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .map(str::to_string);
        }
        return non_empty(value);
    }

    QUALIFIED_NAME_RE.captures(description).and_then(|caps| {
        let schema = caps.get(2)?.as_str();
        let table = caps.get(3)?.as_str();
        Some(format!("{}.{}", schema, table))
    })
}

pub fn data_format(description: &str) -> Option<String> {
    let lowered = description.to_lowercase();
    SCAN_FORMATS
        .iter()
        .find(|format| lowered.contains(*format))
        .map(|format| format.to_uppercase())
}

pub fn pushed_filters(description: &str) -> Option<Vec<String>> {
    let list = capture(&PUSHED_FILTERS_RE, description)?;
    Some(
        split_list(list)
            .map(str::to_string)
            .take(MAX_PUSHED_FILTERS)
            .collect(),
    )
}

pub fn sort_order(description: &str) -> Option<String> {
    let caps = SORT_ORDER_RE.captures(description)?;
    let column = strip_attribute_ids(caps.get(1)?.as_str());
    let order = caps.get(2)?.as_str().to_uppercase();
    Some(format!("{} {}", column, order))
}

pub fn partitioning_type(description: &str) -> Option<String> {
    let kind = capture(&PARTITIONING_RE, description)?.to_lowercase();
    let mut chars = kind.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
}

/// Partition count exactly as written in the description
pub fn partition_count(description: &str) -> Option<String> {
    capture(&PARTITION_COUNT_RE, description).map(str::to_string)
}
