//! Tree layout facade
//!
//! (persons, relationships, spacing) -> positioned nodes + classified edges.
//! Never fails: whatever subset of the input is usable gets laid out.

use crate::edges::{classify, LayoutEdge};
use crate::generation::assign_generations;
use crate::graph::FamilyGraph;
use crate::model::{Person, PersonId, RelationshipEdge};
use crate::position::{position, Position, Spacing};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One positioned person
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct LayoutNode {
    pub person_id: PersonId,
    pub position: Position,
    pub generation: u32,
}

/// Layout output: one node per distinct person, in input order
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FamilyLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

impl FamilyLayout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &PersonId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| &n.person_id == id)
    }

    /// Number of generation rows
    pub fn depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.generation + 1).max().unwrap_or(0)
    }
}

/// Layout engine holding the spacing to apply
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeLayout {
    spacing: Spacing,
}

impl TreeLayout {
    pub fn new(spacing: Spacing) -> Self {
        Self { spacing }
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn run(&self, persons: &[Person], relationships: &[RelationshipEdge]) -> FamilyLayout {
        if persons.is_empty() {
            return FamilyLayout::default();
        }

        let graph = FamilyGraph::build(persons, relationships);
        let generations = assign_generations(&graph);
        let positions = position(&graph, &generations, self.spacing);

        let nodes = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(idx, node)| LayoutNode {
                person_id: node.id().clone(),
                position: positions.of(idx),
                generation: generations.of(idx),
            })
            .collect();

        // Only edges the graph accepted, so every edge end has a node
        let drawable: Vec<RelationshipEdge> = relationships
            .iter()
            .filter(|edge| graph.accepts(edge))
            .map(RelationshipEdge::normalized)
            .collect();
        let edges = classify(&drawable);

        debug!(
            "Laid out {} person(s), {} edge(s), {} relationship(s) skipped",
            graph.node_count(),
            edges.len(),
            graph.skipped_edges()
        );

        FamilyLayout { nodes, edges }
    }
}

/// Lay out a family with the given spacing
///
/// Every person gets exactly one node, in input order. Person ids are
/// expected to be unique: a repeated id keeps only its first record, so the
/// node count can then be lower than `persons.len()`.
pub fn layout(
    persons: &[Person],
    relationships: &[RelationshipEdge],
    spacing: Spacing,
) -> FamilyLayout {
    TreeLayout::new(spacing).run(persons, relationships)
}
