//! Relationship graph builder
//!
//! Turns the flat person and relationship lists into a dense, integer-indexed
//! graph. Index `i` is the position of the person in the input list, so
//! iterating adjacency sets in index order is the same as iterating in input
//! order.

use crate::model::{Person, PersonId, RelationType, RelationshipEdge};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// A person plus its adjacency, by dense index
#[derive(Debug, Clone)]
pub struct GraphNode<'a> {
    pub person: &'a Person,
    pub child_ids: BTreeSet<usize>,
    pub parent_ids: BTreeSet<usize>,
    pub spouse_ids: BTreeSet<usize>,
    pub sibling_ids: BTreeSet<usize>,
}

impl<'a> GraphNode<'a> {
    fn new(person: &'a Person) -> Self {
        GraphNode {
            person,
            child_ids: BTreeSet::new(),
            parent_ids: BTreeSet::new(),
            spouse_ids: BTreeSet::new(),
            sibling_ids: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &PersonId {
        &self.person.id
    }

    pub fn is_root(&self) -> bool {
        self.parent_ids.is_empty()
    }
}

/// Family graph, immutable once built
#[derive(Debug, Clone)]
pub struct FamilyGraph<'a> {
    nodes: Vec<GraphNode<'a>>,
    node_to_index: HashMap<PersonId, usize>,
    skipped_edges: usize,
}

impl<'a> FamilyGraph<'a> {
    /// Build the graph. Edges that cannot be placed are skipped, never fatal.
    pub fn build(persons: &'a [Person], edges: &[RelationshipEdge]) -> Self {
        let mut nodes = Vec::with_capacity(persons.len());
        let mut node_to_index = HashMap::with_capacity(persons.len());

        for person in persons {
            if node_to_index.contains_key(&person.id) {
                debug!("Skipping duplicate person record {}", person.id);
                continue;
            }
            node_to_index.insert(person.id.clone(), nodes.len());
            nodes.push(GraphNode::new(person));
        }

        let mut graph = FamilyGraph {
            nodes,
            node_to_index,
            skipped_edges: 0,
        };

        for edge in edges {
            if !graph.add_edge(&edge.normalized()) {
                graph.skipped_edges += 1;
            }
        }

        graph
    }

    /// Fold one normalized edge in. Returns false if it was dropped.
    fn add_edge(&mut self, edge: &RelationshipEdge) -> bool {
        let Some((u, v)) = self.endpoints(edge) else {
            debug!(
                "Dropping {} edge {} -> {}: unknown person or self reference",
                edge.relation_type, edge.from, edge.to
            );
            return false;
        };

        match edge.relation_type {
            RelationType::Parent => {
                self.nodes[u].child_ids.insert(v);
                self.nodes[v].parent_ids.insert(u);
            }
            RelationType::Spouse | RelationType::ExSpouse => {
                self.nodes[u].spouse_ids.insert(v);
                self.nodes[v].spouse_ids.insert(u);
            }
            RelationType::Sibling => {
                self.nodes[u].sibling_ids.insert(v);
                self.nodes[v].sibling_ids.insert(u);
            }
            RelationType::Child | RelationType::Unknown => {
                debug!("Dropping {} edge {} -> {}", edge.relation_type, edge.from, edge.to);
                return false;
            }
        }
        true
    }

    /// Dense indices of both endpoints if the edge can be placed in this graph
    pub fn endpoints(&self, edge: &RelationshipEdge) -> Option<(usize, usize)> {
        let u = *self.node_to_index.get(&edge.from)?;
        let v = *self.node_to_index.get(&edge.to)?;
        (u != v).then_some((u, v))
    }

    /// Whether the graph accepted this edge when it was built
    pub fn accepts(&self, edge: &RelationshipEdge) -> bool {
        let edge = edge.normalized();
        !matches!(edge.relation_type, RelationType::Unknown) && self.endpoints(&edge).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn skipped_edges(&self) -> usize {
        self.skipped_edges
    }

    pub fn nodes(&self) -> &[GraphNode<'a>] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> &GraphNode<'a> {
        &self.nodes[idx]
    }

    pub fn index_of(&self, id: &PersonId) -> Option<usize> {
        self.node_to_index.get(id).copied()
    }

    pub fn get(&self, id: &PersonId) -> Option<&GraphNode<'a>> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    /// Resolve a set of dense indices back to person ids
    pub fn ids_of<'s>(&'s self, set: &'s BTreeSet<usize>) -> impl Iterator<Item = &'s PersonId> + 's {
        set.iter().map(move |&idx| self.nodes[idx].id())
    }

    /// Root indices (no recorded parent) in input order
    pub fn roots(&self) -> Vec<usize> {
        (0..self.nodes.len())
            .filter(|&idx| self.nodes[idx].is_root())
            .collect()
    }
}
