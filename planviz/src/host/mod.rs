// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Introspection surface of the host query engine
//!
//! The host plan graph is opaque: planviz only sees it through the
//! accessors below. Every accessor is fallible because the host may not
//! expose it for a given operator, or may fail while producing it.

pub mod snapshot;

use crate::plan::node::MetricValue;
use thiserror::Error;

/// Fault raised by a host accessor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("accessor '{0}' is not available")]
    MissingAccessor(String),

    #[error("accessor '{accessor}' failed: {message}")]
    AccessorFailed { accessor: String, message: String },
}

impl HostError {
    pub fn missing(accessor: &str) -> Self {
        HostError::MissingAccessor(accessor.to_string())
    }

    pub fn failed(accessor: &str, message: impl Into<String>) -> Self {
        HostError::AccessorFailed {
            accessor: accessor.to_string(),
            message: message.into(),
        }
    }
}

pub type HostResult<T> = std::result::Result<T, HostError>;

/// One entry of a node's runtime metric map
///
/// The name is always readable; the value read may fail on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct HostMetric {
    pub name: String,
    pub value: HostResult<MetricValue>,
}

impl HostMetric {
    pub fn new(name: impl Into<String>, value: HostResult<MetricValue>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A node of the host's physical plan
///
/// Implementations are cheap handles into the host graph. The graph is
/// assumed finite and is never mutated while a walk is in progress.
pub trait PlanObject: Sized {
    /// Operator identifier, e.g. `SortMergeJoin`
    fn node_name(&self) -> HostResult<String>;

    /// Verbose rendering of the operator's parameters, including its suffix
    fn verbose_string_with_suffix(&self) -> HostResult<String>;

    /// One-line rendering of the operator
    fn simple_string(&self) -> HostResult<String>;

    /// Generic string form of the host object
    fn generic_string(&self) -> HostResult<String>;

    /// Output attributes in column order, already stringified
    fn output(&self) -> HostResult<Vec<String>>;

    /// Runtime metric entries; empty for plans that were never executed
    fn metrics(&self) -> HostResult<Vec<HostMetric>>;

    /// Host-reported children in order
    ///
    /// An `Err` element models a fault raised while iterating the host
    /// sequence: the elements before it are still valid.
    fn children(&self) -> HostResult<Vec<HostResult<Self>>>;

    /// Final plan chosen by adaptive re-planning (adaptive roots only)
    fn final_plan(&self) -> HostResult<Option<Self>>;

    /// Inner plan of a query stage wrapper
    fn wrapped_plan(&self) -> HostResult<Option<Self>>;

    /// Plan referenced by a reused exchange
    fn referenced_plan(&self) -> HostResult<Option<Self>>;
}

/// Dataframe-like object that can hand out its executed plan
///
/// The plan handle may borrow from the source.
pub trait DataFrameSource {
    type Plan<'a>: PlanObject
    where
        Self: 'a;

    /// Executed physical plan; an error means the input is not supported
    fn executed_plan(&self) -> HostResult<Self::Plan<'_>>;
}
