// Copyright (c) 2024-2025 planviz Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for plan extraction and rendering

use crate::host::HostError;
use thiserror::Error;

/// Errors surfaced to callers of the library
///
/// Faults inside a walk never show up here: they are contained on the
/// affected field or node. Only failures to start a walk, to load a
/// snapshot or to render a document escalate.
#[derive(Error, Debug)]
pub enum PlanVizError {
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PlanVizError {
    fn from(error: serde_json::Error) -> Self {
        PlanVizError::Serialization(error.to_string())
    }
}

impl From<HostError> for PlanVizError {
    fn from(error: HostError) -> Self {
        PlanVizError::UnsupportedInput(format!("could not access the execution plan: {}", error))
    }
}

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, PlanVizError>;
