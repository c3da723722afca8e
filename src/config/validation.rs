// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for pipeline integrity.
//!
//! Checks run in a fixed order so that later checks can rely on earlier ones:
//!
//! 1. **Uniqueness**: every processor ID is unique
//! 2. **References**: every `depends_on` entry names an existing processor
//! 3. **Implementations**: every `processor` name has a local implementation
//! 4. **Sizes**: batch and window sizes are non-zero, window durations bounded
//! 5. **Cycles**: DFS with a recursion stack, reporting the cycle path
//!
//! Errors from the first four checks accumulate so a user sees them all at
//! once. Cycle detection needs a structurally valid graph and only runs when
//! the reference checks passed.

use std::collections::{HashMap, HashSet};

use crate::backends::local::LocalProcessorFactory;
use crate::config::consts::MAX_WINDOW_SECONDS;
use crate::config::Config;
use crate::errors::ValidationError;

/// Validate a loaded configuration, returning every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    errors.extend(duplicate_processor_ids(config));

    let unresolved = unresolved_dependencies(config);
    let graph_is_sound = errors.is_empty() && unresolved.is_empty();
    errors.extend(unresolved);

    errors.extend(unknown_implementations(config));
    errors.extend(size_bounds(config));

    if graph_is_sound {
        if let Some(cycle) = find_cycle(config) {
            errors.push(ValidationError::CyclicDependency { cycle });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn duplicate_processor_ids(config: &Config) -> Vec<ValidationError> {
    let mut seen_ids = HashSet::new();
    config
        .processors
        .iter()
        .filter(|p| !seen_ids.insert(p.id.as_str()))
        .map(|p| ValidationError::DuplicateProcessorId {
            processor_id: p.id.clone(),
        })
        .collect()
}

fn unresolved_dependencies(config: &Config) -> Vec<ValidationError> {
    let processor_ids: HashSet<&str> = config.processors.iter().map(|p| p.id.as_str()).collect();
    let mut errors = Vec::new();

    for processor in &config.processors {
        for dependency in &processor.depends_on {
            if !processor_ids.contains(dependency.as_str()) {
                errors.push(ValidationError::UnresolvedDependency {
                    processor_id: processor.id.clone(),
                    missing_dependency: dependency.clone(),
                });
            }
        }
    }

    errors
}

fn unknown_implementations(config: &Config) -> Vec<ValidationError> {
    config
        .processors
        .iter()
        .filter(|p| !LocalProcessorFactory::is_implementation_available(&p.processor))
        .map(|p| ValidationError::UnknownProcessor {
            processor_id: p.id.clone(),
            processor: p.processor.clone(),
        })
        .collect()
}

fn size_bounds(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if config.executor_options.batch_size == Some(0) {
        errors.push(ValidationError::ZeroSize {
            option: "executor_options.batch_size",
        });
    }
    if let Some(window) = &config.window {
        if window.size_seconds == 0 {
            errors.push(ValidationError::ZeroSize {
                option: "window.size_seconds",
            });
        }
        let durations = [
            ("window.size_seconds", window.size_seconds),
            ("window.watermark_seconds", window.watermark_seconds),
        ];
        for (option, value) in durations {
            if value > MAX_WINDOW_SECONDS {
                errors.push(ValidationError::SizeTooLarge {
                    option,
                    value,
                    max: MAX_WINDOW_SECONDS,
                });
            }
        }
    }
    errors
}

/// DFS over dependency -> dependent edges. Gray nodes sit on `rec_stack`;
/// meeting one again closes a cycle, which is returned as a path that
/// starts and ends on the same processor.
fn find_cycle(config: &Config) -> Option<Vec<String>> {
    let mut graph: HashMap<&str, Vec<&str>> = config
        .processors
        .iter()
        .map(|p| (p.id.as_str(), Vec::new()))
        .collect();

    for processor in &config.processors {
        for dependency in &processor.depends_on {
            if let Some(dependents) = graph.get_mut(dependency.as_str()) {
                dependents.push(processor.id.as_str());
            }
        }
    }

    // Declaration order keeps the reported cycle stable.
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    config.processors.iter().find_map(|processor| {
        if visited.contains(processor.id.as_str()) {
            return None;
        }
        dfs_cycle_detection(
            processor.id.as_str(),
            &graph,
            &mut visited,
            &mut rec_stack,
            &mut path,
        )
    })
}

fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    for &neighbor in graph.get(node).map(Vec::as_slice).unwrap_or_default() {
        if !visited.contains(neighbor) {
            if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path) {
                return Some(cycle);
            }
        } else if rec_stack.contains(neighbor) {
            let cycle_start = path.iter().position(|&x| x == neighbor).unwrap_or(0);
            let mut cycle: Vec<String> = path[cycle_start..].iter().map(|s| s.to_string()).collect();
            cycle.push(neighbor.to_string());
            return Some(cycle);
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExecutorOptions, ProcessorConfig, WindowConfig};
    use crate::errors::FailureStrategy;
    use crate::records::RecordKind;

    fn processor(id: &str, implementation: &str, depends_on: Vec<&str>) -> ProcessorConfig {
        ProcessorConfig {
            id: id.to_string(),
            processor: implementation.to_string(),
            depends_on: depends_on.iter().map(|s| s.to_string()).collect(),
            options: HashMap::new(),
        }
    }

    fn config(processors: Vec<ProcessorConfig>) -> Config {
        Config {
            kind: RecordKind::UserEvent,
            data_source: "kafka_stream".to_string(),
            failure_strategy: FailureStrategy::FailFast,
            executor_options: ExecutorOptions::default(),
            window: None,
            processors,
        }
    }

    #[test]
    fn test_valid_empty_config() {
        assert!(validate_config(&config(vec![])).is_ok());
    }

    #[test]
    fn test_valid_linear_chain() {
        let cfg = config(vec![
            processor("validate", "validate", vec![]),
            processor("enrich", "enrich", vec!["validate"]),
            processor("summary", "aggregate", vec!["enrich"]),
        ]);
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_valid_diamond_dependency() {
        let cfg = config(vec![
            processor("a", "validate", vec![]),
            processor("b", "enrich", vec!["a"]),
            processor("c", "aggregate", vec!["a"]),
            processor("d", "aggregate", vec!["b", "c"]),
        ]);
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_duplicate_processor_ids() {
        let cfg = config(vec![
            processor("a", "validate", vec![]),
            processor("a", "enrich", vec![]),
        ]);

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateProcessorId {
                processor_id: "a".into()
            }]
        );
    }

    #[test]
    fn test_unresolved_dependency() {
        let cfg = config(vec![processor("b", "enrich", vec!["nonexistent"])]);

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::UnresolvedDependency { .. }
        ));
    }

    #[test]
    fn test_unknown_implementation() {
        let cfg = config(vec![processor("x", "reverse_text", vec![])]);

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnknownProcessor {
                processor_id: "x".into(),
                processor: "reverse_text".into(),
            }]
        );
    }

    #[test]
    fn test_simple_cycle_reports_path() {
        let cfg = config(vec![
            processor("a", "validate", vec!["b"]),
            processor("b", "enrich", vec!["a"]),
        ]);

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec!["a".into(), "b".into(), "a".into()]
            }]
        );
    }

    #[test]
    fn test_self_dependency_cycle() {
        let cfg = config(vec![processor("a", "validate", vec!["a"])]);
        let errors = validate_config(&cfg).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::CyclicDependency { ref cycle } if cycle == &["a", "a"]
        ));
    }

    #[test]
    fn test_complex_cycle() {
        let cfg = config(vec![
            processor("a", "validate", vec!["b"]),
            processor("b", "enrich", vec!["c"]),
            processor("c", "enrich", vec!["d"]),
            processor("d", "enrich", vec!["b"]),
        ]);

        let errors = validate_config(&cfg).unwrap_err();
        match &errors[0] {
            ValidationError::CyclicDependency { cycle } => {
                assert_eq!(cycle.first(), cycle.last());
                assert_eq!(cycle.len(), 4);
                assert!(!cycle.contains(&"a".to_string()));
            }
            other => panic!("expected a cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_sizes() {
        let mut cfg = config(vec![]);
        cfg.executor_options.batch_size = Some(0);
        cfg.window = Some(WindowConfig {
            size_seconds: 0,
            watermark_seconds: 0,
        });

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::ZeroSize { .. })));
    }

    #[test]
    fn test_window_durations_are_bounded() {
        let mut cfg = config(vec![processor("validate", "validate", vec![])]);
        cfg.window = Some(WindowConfig {
            size_seconds: MAX_WINDOW_SECONDS + 1,
            watermark_seconds: 100_000_000_000_000,
        });

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::SizeTooLarge {
                    option: "window.size_seconds",
                    value: MAX_WINDOW_SECONDS + 1,
                    max: MAX_WINDOW_SECONDS,
                },
                ValidationError::SizeTooLarge {
                    option: "window.watermark_seconds",
                    value: 100_000_000_000_000,
                    max: MAX_WINDOW_SECONDS,
                },
            ]
        );

        cfg.window = Some(WindowConfig {
            size_seconds: MAX_WINDOW_SECONDS,
            watermark_seconds: MAX_WINDOW_SECONDS,
        });
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_multiple_errors_accumulate() {
        let cfg = config(vec![
            processor("a", "validate", vec!["nonexistent"]),
            processor("a", "enrich", vec![]),
            processor("b", "unknown", vec!["missing"]),
        ]);

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
