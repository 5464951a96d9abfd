//! Generation assignment
//!
//! Generation 0 is the oldest row. Two passes:
//!
//! 1. Breadth-first search from every root (a person with no recorded
//!    parent). A child's generation is the max of what it already has and
//!    its parent's generation plus one. Each root's traversal keeps its own
//!    visited set, so PARENT cycles terminate while a person reachable from
//!    several roots still gets the deepest value.
//! 2. A bounded fixed point over two rules: partners share the larger of
//!    their generations, and a child sits strictly below every parent. A
//!    parent link that closes a loop of parent and partner links can never
//!    hold, so links inside such a loop are left out of the second rule.
//!    Everything outside the loop is still ordered.

use crate::graph::FamilyGraph;
use crate::model::PersonId;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

/// Generation per person, aligned with the graph's dense indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generations {
    values: Vec<u32>,
    index: HashMap<PersonId, usize>,
    converged: bool,
}

impl Generations {
    pub fn of(&self, idx: usize) -> u32 {
        self.values[idx]
    }

    pub fn get(&self, id: &PersonId) -> Option<u32> {
        self.index.get(id).map(|&idx| self.values[idx])
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    /// Deepest generation, `None` for an empty graph
    pub fn max(&self) -> Option<u32> {
        self.values.iter().copied().max()
    }

    /// False when some parent links loop back on themselves and had to be
    /// left out of the ordering
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Compute a generation for every person in the graph
pub fn assign_generations(graph: &FamilyGraph<'_>) -> Generations {
    let n = graph.node_count();
    let mut generation: Vec<Option<u32>> = vec![None; n];

    let roots = graph.roots();
    debug!("Assigning generations from {} root(s) over {} person(s)", roots.len(), n);

    for &root in &roots {
        generation[root] = Some(generation[root].unwrap_or(0));

        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        visited[root] = true;
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            let next = generation[current].unwrap_or(0) + 1;
            for &child in &graph.node(current).child_ids {
                generation[child] = Some(generation[child].map_or(next, |g| g.max(next)));
                if !visited[child] {
                    visited[child] = true;
                    queue.push_back(child);
                }
            }
        }
    }

    // Unreached: no root above them, or no roots at all
    let mut values: Vec<u32> = generation.into_iter().map(|g| g.unwrap_or(0)).collect();

    let component = loop_components(graph);
    let looped = graph
        .nodes()
        .iter()
        .enumerate()
        .flat_map(|(idx, node)| node.child_ids.iter().map(move |&child| (idx, child)))
        .filter(|&(parent, child)| component[parent] == component[child])
        .count();
    if looped > 0 {
        warn!(
            "{} parent link(s) loop back through their own descendants; they do not order generations",
            looped
        );
    }

    let settled = settle(graph, &mut values, &component);
    if !settled {
        warn!("Generations did not settle after {} rounds", n + 1);
    }
    let converged = settled && looped == 0;

    Generations {
        values,
        index: graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id().clone(), idx))
            .collect(),
        converged,
    }
}

/// Apply the partner rule and, for parent links between different
/// components, the parent rule until nothing moves, at most `n + 1` rounds.
/// Values only ever increase.
fn settle(graph: &FamilyGraph<'_>, values: &mut [u32], component: &[usize]) -> bool {
    let rounds = graph.node_count() + 1;

    for _ in 0..rounds {
        let mut changed = false;

        for (idx, node) in graph.nodes().iter().enumerate() {
            for &partner in &node.spouse_ids {
                let level = values[idx].max(values[partner]);
                if values[idx] != level || values[partner] != level {
                    values[idx] = level;
                    values[partner] = level;
                    changed = true;
                }
            }
            for &child in &node.child_ids {
                if component[child] != component[idx] && values[child] <= values[idx] {
                    values[child] = values[idx] + 1;
                    changed = true;
                }
            }
        }

        if !changed {
            return true;
        }
    }

    false
}

/// Strongly connected components over "never above" links: parent to child,
/// and both ways between partners. Returns a component id per person.
///
/// Two passes of iterative depth-first search (Kosaraju): finish order on the
/// forward links, then collect components on the reversed links.
fn loop_components(graph: &FamilyGraph<'_>) -> Vec<usize> {
    let n = graph.node_count();
    let forward: Vec<Vec<usize>> = graph
        .nodes()
        .iter()
        .map(|node| node.child_ids.iter().chain(&node.spouse_ids).copied().collect())
        .collect();

    let mut seen = vec![false; n];
    let mut finished = Vec::with_capacity(n);
    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut stack = vec![(start, 0)];
        while let Some(top) = stack.last_mut() {
            let (current, next) = *top;
            if let Some(&child) = forward[current].get(next) {
                top.1 += 1;
                if !seen[child] {
                    seen[child] = true;
                    stack.push((child, 0));
                }
            } else {
                finished.push(current);
                stack.pop();
            }
        }
    }

    let mut component = vec![usize::MAX; n];
    let mut count = 0;
    for &start in finished.iter().rev() {
        if component[start] != usize::MAX {
            continue;
        }
        component[start] = count;
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            let node = graph.node(current);
            for &other in node.parent_ids.iter().chain(&node.spouse_ids) {
                if component[other] == usize::MAX {
                    component[other] = count;
                    stack.push(other);
                }
            }
        }
        count += 1;
    }

    component
}
