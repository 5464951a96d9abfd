pub mod model;
pub mod graph;
pub mod generation;
pub mod position;
pub mod edges;
pub mod layout;

pub use model::{Gender, Person, PersonId, RelationType, RelationshipEdge};
pub use graph::{FamilyGraph, GraphNode};
pub use generation::{assign_generations, Generations};
pub use position::{position, Position, Positions, Spacing};
pub use edges::{classify, EdgeKind, EdgeStyle, LayoutEdge, LineStyle};
pub use layout::{layout, FamilyLayout, LayoutNode, TreeLayout};
