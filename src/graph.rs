//! Service dependency graph and acyclicity check.
//!
//! The graph is derived from the definitions: an edge `a -> b` exists when
//! one of `a`'s arguments is the reference `@b`. Acyclicity is proven by a
//! bounded fixed-point iteration rather than a depth-first search: each
//! round marks every service whose direct dependencies are all validated,
//! and a cycle (or a chain deeper than [`MAX_DEPENDENCY_DEPTH`]) is the
//! case where the rounds run out before everything is validated.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::descriptors::ServiceDefinition;
use crate::{DiError, DiResult};

/// Rounds allowed before the graph is declared cyclic.
pub const MAX_DEPENDENCY_DEPTH: usize = 100;

/// Direct service-to-service dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Derives the graph from validated definitions.
    pub fn from_definitions(definitions: &BTreeMap<String, ServiceDefinition>) -> Self {
        let edges = definitions
            .iter()
            .map(|(name, definition)| {
                let mut seen = HashSet::new();
                let deps: Vec<String> = definition
                    .service_dependencies()
                    .filter(|dep| seen.insert(*dep))
                    .map(str::to_string)
                    .collect();
                (name.clone(), deps)
            })
            .collect();
        Self { edges }
    }

    /// Builds a graph from explicit edges; every key is a node.
    pub fn from_edges<I, S, D>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, D)>,
        S: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            edges: edges
                .into_iter()
                .map(|(name, deps)| (name.into(), deps.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// All node names, sorted.
    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Direct dependencies of `name`, in declaration order.
    pub fn dependencies_of(&self, name: &str) -> Option<&[String]> {
        self.edges.get(name).map(Vec::as_slice)
    }

    /// Services that reference `name` directly, sorted.
    pub fn dependents_of(&self, name: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|(_, deps)| deps.iter().any(|d| d == name))
            .map(|(service, _)| service.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Proves the graph acyclic within [`MAX_DEPENDENCY_DEPTH`] rounds.
    pub fn check_acyclic(&self) -> DiResult<()> {
        self.check_acyclic_within(MAX_DEPENDENCY_DEPTH)
    }

    /// Proves the graph acyclic within `max_depth` rounds.
    ///
    /// Fails with [`DiError::UnknownServiceName`] as soon as a service depends
    /// on a name that is not a node, and with
    /// [`DiError::MaxDependencyDepthReached`] when the rounds run out.
    pub fn check_acyclic_within(&self, max_depth: usize) -> DiResult<()> {
        let mut validated: HashMap<&str, bool> =
            self.edges.keys().map(|name| (name.as_str(), false)).collect();

        let mut rounds = 0;
        while validated.values().any(|done| !done) {
            for (service, deps) in &self.edges {
                let mut pending = 0;
                for dep in deps {
                    match validated.get(dep.as_str()) {
                        Some(true) => {}
                        Some(false) => pending += 1,
                        None => {
                            return Err(DiError::UnknownServiceName {
                                service: service.clone(),
                                dependency: dep.clone(),
                                known: self.edges.keys().cloned().collect(),
                            })
                        }
                    }
                }
                validated.insert(service.as_str(), pending == 0);
            }

            rounds += 1;
            if rounds > max_depth {
                let mut unresolved: Vec<String> = validated
                    .iter()
                    .filter(|(_, done)| !**done)
                    .map(|(name, _)| name.to_string())
                    .collect();
                unresolved.sort();
                return Err(DiError::MaxDependencyDepthReached { max_depth, unresolved });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: Vec<(&str, Vec<&str>)>) -> DependencyGraph {
        DependencyGraph::from_edges(edges)
    }

    #[test]
    fn test_empty_graph_is_acyclic() {
        assert!(DependencyGraph::default().check_acyclic().is_ok());
    }

    #[test]
    fn test_diamond_is_acyclic() {
        let g = graph(vec![
            ("app", vec!["repo", "cache"]),
            ("repo", vec!["db"]),
            ("cache", vec!["db"]),
            ("db", vec![]),
        ]);
        assert!(g.check_acyclic().is_ok());
        assert_eq!(g.dependents_of("db"), ["cache", "repo"]);
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let g = graph(vec![("a", vec!["a"])]);
        match g.check_acyclic().unwrap_err() {
            DiError::MaxDependencyDepthReached { max_depth, unresolved } => {
                assert_eq!(max_depth, MAX_DEPENDENCY_DEPTH);
                assert_eq!(unresolved, ["a"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cycle_leaves_dependents_unresolved() {
        let g = graph(vec![
            ("a", vec!["b"]),
            ("b", vec!["c"]),
            ("c", vec!["a"]),
            ("d", vec!["a"]),
            ("e", vec![]),
        ]);
        match g.check_acyclic().unwrap_err() {
            DiError::MaxDependencyDepthReached { unresolved, .. } => {
                assert_eq!(unresolved, ["a", "b", "c", "d"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_dependency_lists_known_services() {
        let g = graph(vec![("a", vec!["ghost"]), ("b", vec![])]);
        match g.check_acyclic().unwrap_err() {
            DiError::UnknownServiceName { service, dependency, known } => {
                assert_eq!(service, "a");
                assert_eq!(dependency, "ghost");
                assert_eq!(known, ["a", "b"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_long_chain_against_iteration_order() {
        // s000 -> s001 -> ... : name order visits dependents before their
        // dependencies, so each round validates exactly one more link.
        let names: Vec<String> = (0..20).map(|i| format!("s{i:03}")).collect();
        let edges = names.iter().enumerate().map(|(i, name)| {
            let deps: Vec<String> = names.get(i + 1).cloned().into_iter().collect();
            (name.clone(), deps)
        });
        let g = DependencyGraph::from_edges(edges);

        assert!(g.check_acyclic().is_ok());
        assert!(matches!(
            g.check_acyclic_within(5),
            Err(DiError::MaxDependencyDepthReached { max_depth: 5, .. })
        ));
    }

    #[test]
    fn test_repeated_references_yield_one_edge() {
        use crate::config::ConfigValue;
        use crate::lifetime::Lifetime;

        let definition = ServiceDefinition {
            class_path: "pkg.App".to_string(),
            arguments: vec!["@a".into(), "@b".into(), "@ a".into()],
            named_arguments: BTreeMap::from([("again".to_string(), ConfigValue::from("@b"))]),
            lifetime: Lifetime::Transient,
            location: "app.yaml".to_string(),
        };
        let definitions = BTreeMap::from([("app".to_string(), definition)]);

        let g = DependencyGraph::from_definitions(&definitions);
        assert_eq!(g.dependencies_of("app").unwrap(), ["a", "b"]);
    }
}
