//! Dependency graph construction and cycle detection
//!
//! Nodes are file paths in file-set order. Edges are produced only for
//! imports that resolve to another file in the set; unresolved relative
//! imports are dropped without a trace. External package imports never
//! become edges; they are kept in a separate list for reporting and take
//! no part in cycle detection or fan-out counting.

use super::imports;
use crate::project::ProjectFile;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether a dependency stays inside the analyzed file set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Internal,
    External,
}

/// One dependency between two modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
}

/// Directed module dependency graph for one file set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraph {
    /// File paths in input order
    pub nodes: Vec<String>,
    /// Resolved internal dependencies, in scan order
    pub edges: Vec<DependencyEdge>,
    /// Imports of packages outside the file set; `to` is the raw specifier
    pub external_imports: Vec<DependencyEdge>,
    /// Every cycle found, as a node sequence ending on its starting node
    pub cycles: Vec<Vec<String>>,
}

/// Build the dependency graph for a file set
pub fn build_graph(files: &[ProjectFile]) -> DependencyGraph {
    let nodes: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
    let mut edges = Vec::new();
    let mut external_imports = Vec::new();

    for file in files {
        for specifier in imports::extract_imports(&file.content) {
            if imports::is_internal(&specifier) {
                if let Some(target) = imports::resolve_import(&specifier, files) {
                    edges.push(DependencyEdge {
                        from: file.path.clone(),
                        to: target,
                        kind: EdgeKind::Internal,
                    });
                }
                // Unresolved relative imports produce no edge at all.
            } else {
                external_imports.push(DependencyEdge {
                    from: file.path.clone(),
                    to: specifier,
                    kind: EdgeKind::External,
                });
            }
        }
    }

    let cycles = detect_cycles(&nodes, &edges);

    DependencyGraph {
        nodes,
        edges,
        external_imports,
        cycles,
    }
}

/// Count of outgoing internal edges for a node
pub fn fan_out(graph: &DependencyGraph, node: &str) -> usize {
    graph.edges.iter().filter(|e| e.from == node).count()
}

/// Find every cycle reachable from any unvisited node
///
/// Depth-first search restarted per unvisited node in node order, visiting
/// neighbors in edge-list order. When a neighbor already on the current
/// exploration path is reached again, the cycle is recorded as the path
/// slice from that neighbor's first occurrence with the neighbor appended,
/// so a two-node cycle comes out as `[A, B, A]` and a self-import as
/// `[A, A]`. Cycles that are rotations of each other are reported
/// independently. Runs on an explicit stack so adversarial graphs cannot
/// exhaust the call stack.
pub fn detect_cycles(nodes: &[String], edges: &[DependencyEdge]) -> Vec<Vec<String>> {
    struct Frame {
        node: String,
        path: Vec<String>,
        neighbors: Vec<String>,
        next: usize,
    }

    let neighbors_of = |node: &str| -> Vec<String> {
        edges
            .iter()
            .filter(|e| e.from == node)
            .map(|e| e.to.clone())
            .collect()
    };

    let mut cycles = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut on_stack: HashSet<String> = HashSet::new();

    for root in nodes {
        if visited.contains(root) {
            continue;
        }

        visited.insert(root.clone());
        on_stack.insert(root.clone());
        let mut stack = vec![Frame {
            node: root.clone(),
            path: vec![root.clone()],
            neighbors: neighbors_of(root),
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.neighbors.len() {
                on_stack.remove(&frame.node);
                stack.pop();
                continue;
            }

            let neighbor = frame.neighbors[frame.next].clone();
            frame.next += 1;

            if !visited.contains(&neighbor) {
                visited.insert(neighbor.clone());
                on_stack.insert(neighbor.clone());
                let mut path = frame.path.clone();
                path.push(neighbor.clone());
                let neighbors = neighbors_of(&neighbor);
                stack.push(Frame {
                    node: neighbor,
                    path,
                    neighbors,
                    next: 0,
                });
            } else if on_stack.contains(&neighbor)
                && let Some(start) = frame.path.iter().position(|n| *n == neighbor)
            {
                let mut cycle: Vec<String> = frame.path[start..].to_vec();
                cycle.push(neighbor);
                cycles.push(cycle);
            }
        }
    }

    cycles
}
