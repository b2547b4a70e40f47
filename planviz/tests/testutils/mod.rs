//! Test utilities for planviz integration tests
//!
//! - MockPlan: hand-built host plan node with per-accessor fault injection
//! - MockDataFrame: dataframe-like source with or without an executed plan

#![allow(dead_code)]

pub mod mock_host;
