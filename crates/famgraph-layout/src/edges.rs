//! Edge classifier
//!
//! Maps relationship records to renderable edge descriptors.

use crate::model::{PersonId, RelationType, RelationshipEdge};
use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Renderable category of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "kebab-case"))]
pub enum EdgeKind {
    ParentChild,
    Spouse,
    ExSpouse,
    Sibling,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::ParentChild => "parent-child",
            EdgeKind::Spouse => "spouse",
            EdgeKind::ExSpouse => "ex-spouse",
            EdgeKind::Sibling => "sibling",
        }
    }

    /// `None` for types that are never drawn on their own
    pub fn from_relation(relation_type: RelationType) -> Option<Self> {
        match relation_type {
            RelationType::Parent => Some(EdgeKind::ParentChild),
            RelationType::Spouse => Some(EdgeKind::Spouse),
            RelationType::ExSpouse => Some(EdgeKind::ExSpouse),
            RelationType::Sibling => Some(EdgeKind::Sibling),
            RelationType::Child | RelationType::Unknown => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EdgeKind::ParentChild => "child",
            EdgeKind::Spouse => "partner",
            EdgeKind::ExSpouse => "ex-partner",
            EdgeKind::Sibling => "sibling",
        }
    }

    pub fn style(&self) -> EdgeStyle {
        match self {
            EdgeKind::ParentChild => EdgeStyle::new(LineStyle::Solid, 2, "#10B981"),
            EdgeKind::Spouse => EdgeStyle::new(LineStyle::Solid, 3, "#F59E0B"),
            EdgeKind::ExSpouse => EdgeStyle::new(LineStyle::Dashed, 2, "#EF4444").with_dash("5,5"),
            EdgeKind::Sibling => EdgeStyle::new(LineStyle::SolidStep, 2, "#8B5CF6"),
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "kebab-case"))]
pub enum LineStyle {
    Solid,
    Dashed,
    /// Solid, drawn with right-angle steps
    SolidStep,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct EdgeStyle {
    pub line: LineStyle,
    /// Stroke width
    pub weight: u8,
    pub color: &'static str,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub dash: Option<&'static str>,
}

impl EdgeStyle {
    fn new(line: LineStyle, weight: u8, color: &'static str) -> Self {
        EdgeStyle {
            line,
            weight,
            color,
            dash: None,
        }
    }

    fn with_dash(mut self, dash: &'static str) -> Self {
        self.dash = Some(dash);
        self
    }
}

/// A classified edge ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct LayoutEdge {
    pub id: String,
    pub source_id: PersonId,
    pub target_id: PersonId,
    pub kind: EdgeKind,
    pub label: &'static str,
    pub style: EdgeStyle,
}

impl LayoutEdge {
    fn new(source_id: PersonId, target_id: PersonId, kind: EdgeKind) -> Self {
        LayoutEdge {
            id: format!("{}-{}-{}", source_id, target_id, kind),
            source_id,
            target_id,
            kind,
            label: kind.label(),
            style: kind.style(),
        }
    }
}

/// Classify relationship records. CHILD and unknown types are dropped; a
/// repeat of the same unordered pair and kind keeps the first record.
pub fn classify(edges: &[RelationshipEdge]) -> Vec<LayoutEdge> {
    let mut seen: HashSet<(PersonId, PersonId, EdgeKind)> = HashSet::new();
    let mut out = Vec::new();

    for edge in edges {
        let Some(kind) = EdgeKind::from_relation(edge.relation_type) else {
            continue;
        };

        let key = if edge.from <= edge.to {
            (edge.from.clone(), edge.to.clone(), kind)
        } else {
            (edge.to.clone(), edge.from.clone(), kind)
        };
        if !seen.insert(key) {
            continue;
        }

        out.push(LayoutEdge::new(edge.from.clone(), edge.to.clone(), kind));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_per_type() {
        let edges = vec![
            RelationshipEdge::parent("p", "c"),
            RelationshipEdge::spouse("a", "b"),
            RelationshipEdge::new("a", "x", RelationType::ExSpouse),
            RelationshipEdge::new("c", "d", RelationType::Sibling),
        ];
        let out = classify(&edges);
        assert_eq!(out.len(), 4);

        assert_eq!(out[0].kind, EdgeKind::ParentChild);
        assert_eq!(out[0].label, "child");
        assert_eq!(out[0].style.line, LineStyle::Solid);
        assert_eq!(out[0].style.weight, 2);
        assert_eq!(out[0].source_id, PersonId::from("p"));
        assert_eq!(out[0].id, "p-c-parent-child");

        assert_eq!(out[1].label, "partner");
        assert_eq!(out[1].style.weight, 3);

        assert_eq!(out[2].kind, EdgeKind::ExSpouse);
        assert_eq!(out[2].label, "ex-partner");
        assert_eq!(out[2].style.line, LineStyle::Dashed);
        assert_eq!(out[2].style.dash, Some("5,5"));

        assert_eq!(out[3].label, "sibling");
        assert_eq!(out[3].style.line, LineStyle::SolidStep);
    }

    #[test]
    fn test_child_and_unknown_dropped() {
        let edges = vec![
            RelationshipEdge::new("c", "p", RelationType::Child),
            RelationshipEdge::new("a", "b", RelationType::Unknown),
        ];
        assert!(classify(&edges).is_empty());
    }

    #[test]
    fn test_reverse_duplicates_render_once() {
        let edges = vec![
            RelationshipEdge::spouse("p1", "p2"),
            RelationshipEdge::spouse("p2", "p1"),
            RelationshipEdge::new("p2", "p1", RelationType::ExSpouse),
        ];
        let out = classify(&edges);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].source_id, PersonId::from("p1"));
        assert_eq!(out[1].kind, EdgeKind::ExSpouse);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&EdgeKind::ParentChild).unwrap();
        assert_eq!(json, "\"parent-child\"");
    }
}
