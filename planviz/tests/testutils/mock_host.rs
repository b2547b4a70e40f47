//! In-memory host plan objects for walker tests
//!
//! Every accessor defaults to a working, empty answer so tests only spell
//! out the parts of the host surface they care about.

use planviz::{DataFrameSource, HostError, HostMetric, HostResult, MetricValue, PlanObject};
use std::cell::Cell;
use std::rc::Rc;

/// One element of a mocked child sequence
#[derive(Debug, Clone)]
pub enum MockChild {
    Node(MockPlan),
    /// The host sequence raises when this element is reached
    Fault(String),
}

/// Hand-built host plan node
#[derive(Debug, Clone, Default)]
pub struct MockPlan {
    pub name: Option<String>,
    pub verbose: Option<String>,
    pub simple: Option<String>,
    pub generic: Option<String>,
    pub output: Option<Vec<String>>,
    pub metrics: Option<Vec<(String, Option<MetricValue>)>>,
    pub children: Option<Vec<MockChild>>,
    pub final_plan: Option<Option<Box<MockPlan>>>,
    pub wrapped_plan: Option<Option<Box<MockPlan>>>,
    pub referenced_plan: Option<Option<Box<MockPlan>>>,
    /// Counts calls to `children()`, shared across clones
    pub children_calls: Rc<Cell<usize>>,
}

impl MockPlan {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            verbose: Some(description.to_string()),
            output: Some(Vec::new()),
            metrics: Some(Vec::new()),
            children: Some(Vec::new()),
            ..Default::default()
        }
    }

    pub fn with_child(mut self, child: MockPlan) -> Self {
        self.children
            .get_or_insert_with(Vec::new)
            .push(MockChild::Node(child));
        self
    }

    pub fn with_child_fault(mut self, message: &str) -> Self {
        self.children
            .get_or_insert_with(Vec::new)
            .push(MockChild::Fault(message.to_string()));
        self
    }

    pub fn with_output(mut self, columns: &[&str]) -> Self {
        self.output = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn with_metric(mut self, name: &str, value: Option<MetricValue>) -> Self {
        self.metrics
            .get_or_insert_with(Vec::new)
            .push((name.to_string(), value));
        self
    }

    pub fn with_final_plan(mut self, plan: MockPlan) -> Self {
        self.final_plan = Some(Some(Box::new(plan)));
        self
    }

    pub fn with_wrapped_plan(mut self, plan: MockPlan) -> Self {
        self.wrapped_plan = Some(Some(Box::new(plan)));
        self
    }

    pub fn with_referenced_plan(mut self, plan: MockPlan) -> Self {
        self.referenced_plan = Some(Some(Box::new(plan)));
        self
    }
}

fn missing<T>(accessor: &str) -> HostResult<T> {
    Err(HostError::missing(accessor))
}

fn indirection(
    target: &Option<Option<Box<MockPlan>>>,
    accessor: &str,
) -> HostResult<Option<MockPlan>> {
    match target {
        Some(plan) => Ok(plan.as_deref().cloned()),
        None => missing(accessor),
    }
}

impl PlanObject for MockPlan {
    fn node_name(&self) -> HostResult<String> {
        self.name.clone().ok_or_else(|| HostError::missing("nodeName"))
    }

    fn verbose_string_with_suffix(&self) -> HostResult<String> {
        self.verbose
            .clone()
            .ok_or_else(|| HostError::missing("verboseStringWithSuffix"))
    }

    fn simple_string(&self) -> HostResult<String> {
        self.simple
            .clone()
            .ok_or_else(|| HostError::missing("simpleString"))
    }

    fn generic_string(&self) -> HostResult<String> {
        self.generic.clone().ok_or_else(|| HostError::missing("toString"))
    }

    fn output(&self) -> HostResult<Vec<String>> {
        self.output.clone().ok_or_else(|| HostError::missing("output"))
    }

    fn metrics(&self) -> HostResult<Vec<HostMetric>> {
        let entries = self
            .metrics
            .as_ref()
            .ok_or_else(|| HostError::missing("metrics"))?;
        Ok(entries
            .iter()
            .map(|(name, value)| {
                HostMetric::new(
                    name.clone(),
                    value.ok_or_else(|| HostError::failed("value", "metric not readable")),
                )
            })
            .collect())
    }

    fn children(&self) -> HostResult<Vec<HostResult<Self>>> {
        self.children_calls.set(self.children_calls.get() + 1);
        let children = self
            .children
            .as_ref()
            .ok_or_else(|| HostError::missing("children"))?;
        Ok(children
            .iter()
            .map(|child| match child {
                MockChild::Node(plan) => Ok(plan.clone()),
                MockChild::Fault(message) => {
                    Err(HostError::failed("iterator.next", message.clone()))
                }
            })
            .collect())
    }

    fn final_plan(&self) -> HostResult<Option<Self>> {
        indirection(&self.final_plan, "executedPlan")
    }

    fn wrapped_plan(&self) -> HostResult<Option<Self>> {
        indirection(&self.wrapped_plan, "plan")
    }

    fn referenced_plan(&self) -> HostResult<Option<Self>> {
        indirection(&self.referenced_plan, "child")
    }
}

/// Dataframe-like source; `None` models an object without an executed plan
pub struct MockDataFrame {
    pub plan: Option<MockPlan>,
}

impl MockDataFrame {
    pub fn with_plan(plan: MockPlan) -> Self {
        Self { plan: Some(plan) }
    }

    pub fn unsupported() -> Self {
        Self { plan: None }
    }
}

impl DataFrameSource for MockDataFrame {
    type Plan<'a> = MockPlan;

    fn executed_plan(&self) -> HostResult<Self::Plan<'_>> {
        self.plan
            .clone()
            .ok_or_else(|| HostError::missing("queryExecution"))
    }
}
