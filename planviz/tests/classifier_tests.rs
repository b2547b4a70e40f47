//! Classifier tests against descriptions captured from real physical plans

use planviz::classify::patterns;
use planviz::{classify, extract_key_info, KeyInfo, NodeCategory};
use serde_json::json;

fn key_info_json(name: &str, description: &str) -> serde_json::Value {
    serde_json::to_value(extract_key_info(classify(name), name, description)).unwrap()
}

#[test]
fn test_join_extraction() {
    assert_eq!(
        patterns::join_type("SortMergeJoin [Name#1], [Name#5], Inner Join"),
        Some("Inner".to_string())
    );
    assert_eq!(
        patterns::join_type("BroadcastHashJoin [id#0], [user_id#10], LeftOuter Join"),
        Some("LeftOuter".to_string())
    );
}

#[test]
fn test_broadcast_hash_join_scenario() {
    let value = key_info_json(
        "BroadcastHashJoin",
        "BroadcastHashJoin [id#0], [user_id#10], LeftOuter Join, BuildSide: Left",
    );
    assert_eq!(
        value,
        json!({
            "join_type": "LeftOuter",
            "condition": "Left",
            "is_broadcast": true,
            "build_side": "Left"
        })
    );
}

#[test]
fn test_sort_merge_join_without_broadcast() {
    let value = key_info_json("SortMergeJoin", "SortMergeJoin [Name#1], [Name#5], Inner Join");
    assert_eq!(value, json!({"join_type": "Inner"}));
}

#[test]
fn test_shuffle_hash_join_is_a_shuffle() {
    assert_eq!(classify("ShuffleHashJoinExec"), NodeCategory::Shuffle);
    let value = key_info_json("ShuffleHashJoinExec", "ShuffledHashJoin [a#1], [b#2], Inner Join");
    assert_eq!(value, json!({"is_shuffle": true}));
}

#[test]
fn test_filter_extraction() {
    let value = key_info_json("Filter", "Filter (Age#1 > 30)");
    assert!(value["condition"].as_str().unwrap().contains("Age"));
}

#[test]
fn test_column_extraction() {
    let value = key_info_json("Project", "Project [Name#1, Age#2, Department#5]");
    assert_eq!(value, json!({"columns": ["Name", "Age", "Department"]}));
}

#[test]
fn test_aggregate_extraction() {
    let value = key_info_json(
        "HashAggregate",
        "HashAggregate(keys=[Department#5], functions=[sum(Salary#10), count(Employee#5), avg(Age#2), max(Age#2), min(Age#2)])",
    );
    assert_eq!(
        value,
        json!({
            "functions": ["sum", "count", "avg"],
            "group_by": ["Department"]
        })
    );
}

#[test]
fn test_table_extraction() {
    let value = key_info_json(
        "FileScan",
        "FileScan parquet [id#0,name#1] Batched: true, Location: /data/users/table_name, PushedFilters: [IsNotNull(id), GreaterThan(id,5)], ReadSchema: struct<id:int,name:string>",
    );
    assert_eq!(
        value,
        json!({
            "table": "table_name",
            "format": "PARQUET",
            "pushed_filters": ["IsNotNull(id)", "GreaterThan(id", "5)"]
        })
    );

    let value = key_info_json(
        "Scan",
        "Scan parquet default.employees.employee_data[id#0,name#1]",
    );
    assert_eq!(value["table"], "employees.employee_data");
}

#[test]
fn test_facts_only_for_their_category() {
    let description = "Project [a#1] Filter (a#1 > 0) keys=[a#1] sum(a#1) Location: /tmp/t";
    assert_eq!(
        key_info_json("Project", description),
        json!({"columns": ["a"]})
    );
    assert_eq!(key_info_json("Window", description), json!({}));
    assert_eq!(key_info_json("Union", description), json!({}));
}

#[test]
fn test_classify_then_extract_is_idempotent() {
    let name = "HashAggregate";
    let description = "HashAggregate(keys=[a#1, b#2, c#3, d#4], functions=[first(x#5), last(y#6)])";
    let first = extract_key_info(classify(name), name, description);
    let second = extract_key_info(classify(name), name, description);
    assert_eq!(first, second);
    assert!(matches!(first, KeyInfo::Aggregate(_)));
}

#[test]
fn test_no_match_is_not_an_error() {
    for name in ["Exchange", "FileScan", "SortMergeJoin", "Filter", "HashAggregate", "Sort", "Project"] {
        let category = classify(name);
        let info = extract_key_info(category, name, "");
        if category == NodeCategory::Shuffle {
            assert_eq!(info.len(), 1, "{} should only flag the shuffle", name);
        } else {
            assert!(info.is_empty(), "{} should have no facts", name);
        }
    }
}
