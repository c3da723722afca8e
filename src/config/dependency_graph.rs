// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, VecDeque};

use crate::config::Config;
use crate::errors::ExecutionError;

/// Processor dependencies in declaration order: `(id, depends_on)`.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph(pub Vec<(String, Vec<String>)>);

impl DependencyGraph {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self(
            cfg.processors
                .iter()
                .map(|p| (p.id.clone(), p.depends_on.clone()))
                .collect(),
        )
    }

    pub fn add_processor(&mut self, processor_id: impl Into<String>, depends_on: Vec<String>) {
        self.0.push((processor_id.into(), depends_on));
    }

    /// Get the processors `processor_id` depends on
    pub fn dependencies(&self, processor_id: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(id, _)| id == processor_id)
            .map(|(_, deps)| deps.as_slice())
    }

    /// Get all processor IDs in the graph
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.iter().map(|(id, _)| id)
    }

    /// Forward edges: dependency -> [dependents]
    pub fn build_dependents(&self) -> HashMap<&str, Vec<&str>> {
        let mut dependents: HashMap<&str, Vec<&str>> =
            self.0.iter().map(|(id, _)| (id.as_str(), Vec::new())).collect();
        for (id, deps) in &self.0 {
            for dep in deps {
                dependents.entry(dep.as_str()).or_default().push(id.as_str());
            }
        }
        dependents
    }

    /// Execution order by Kahn's algorithm.
    ///
    /// Processors that become ready at the same time keep their declaration
    /// order, so the order is deterministic for a given config.
    pub fn topological_order(&self) -> Result<Vec<String>, ExecutionError> {
        let dependents = self.build_dependents();
        let mut in_degree: HashMap<&str, usize> = self
            .0
            .iter()
            .map(|(id, deps)| (id.as_str(), deps.len()))
            .collect();

        let mut queue: VecDeque<&str> = self
            .0
            .iter()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(id, _)| id.as_str())
            .collect();
        let mut order = Vec::with_capacity(self.0.len());

        while let Some(current) = queue.pop_front() {
            order.push(current.to_string());
            for &dependent in dependents.get(current).map(Vec::as_slice).unwrap_or_default() {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        if order.len() != self.0.len() {
            let remaining = self
                .0
                .iter()
                .map(|(id, _)| id)
                .filter(|id| !order.contains(id))
                .cloned()
                .collect();
            return Err(ExecutionError::CycleDetected { remaining });
        }

        Ok(order)
    }
}

impl From<Vec<(String, Vec<String>)>> for DependencyGraph {
    fn from(graph: Vec<(String, Vec<String>)>) -> Self {
        Self(graph)
    }
}
