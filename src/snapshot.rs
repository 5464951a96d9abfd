//! Family snapshots
//!
//! A snapshot is what the data layer hands over for one family: its persons
//! and the relationship records between them, as JSON.
//!
//! ```json
//! {
//!   "familyId": "f1",
//!   "persons": [{ "id": "p1", "firstName": "Anna", "lastName": "Berger" }],
//!   "relationships": [{ "personId": "p1", "relatedPersonId": "p2", "type": "PARENT" }]
//! }
//! ```

use crate::config::LayoutConfig;
use crate::error::FamgraphResult;
use famgraph_layout::{FamilyLayout, Person, RelationshipEdge, TreeLayout};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, info_span};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_id: Option<String>,

    #[serde(default)]
    pub persons: Vec<Person>,

    #[serde(default)]
    pub relationships: Vec<RelationshipEdge>,
}

impl FamilySnapshot {
    pub fn new(persons: Vec<Person>, relationships: Vec<RelationshipEdge>) -> Self {
        FamilySnapshot {
            family_id: None,
            persons,
            relationships,
        }
    }

    pub fn from_json_str(json: &str) -> FamgraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FamgraphResult<Self> {
        let path = path.as_ref();
        debug!("Reading family snapshot from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.id.as_str() == id)
    }

    /// Lay out this family
    pub fn layout(&self, config: &LayoutConfig) -> FamilyLayout {
        let family = self.family_id.as_deref().unwrap_or("-");
        let _span = info_span!("layout", family).entered();

        let out = TreeLayout::new(config.spacing()).run(&self.persons, &self.relationships);
        info!(
            "Family tree ready: {} person(s), {} edge(s), {} generation(s)",
            out.nodes.len(),
            out.edges.len(),
            out.depth()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famgraph_layout::{Gender, RelationType};

    const SNAPSHOT: &str = r#"{
        "familyId": "fam-1",
        "persons": [
            { "id": "p1", "firstName": "Karl", "lastName": "Meyer", "gender": "MALE",
              "birthYear": 1931, "deathYear": 2004, "familyId": "fam-1" },
            { "id": "p2", "firstName": "Lena", "lastName": "Meyer", "birthName": "Vogt",
              "gender": "FEMALE" },
            { "id": "p3", "firstName": "Jonas", "lastName": "Meyer", "photo": "/img/p3.jpg" }
        ],
        "relationships": [
            { "id": "r1", "personId": "p1", "relatedPersonId": "p2", "type": "SPOUSE",
              "startDate": "1955-08-20" },
            { "id": "r2", "personId": "p3", "relatedPersonId": "p1", "type": "CHILD" },
            { "id": "r3", "personId": "p2", "relatedPersonId": "p3", "type": "PARENT" },
            { "id": "r4", "personId": "p3", "relatedPersonId": "p9", "type": "GODPARENT" }
        ]
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = FamilySnapshot::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(snapshot.family_id.as_deref(), Some("fam-1"));
        assert_eq!(snapshot.persons.len(), 3);

        let karl = snapshot.person("p1").unwrap();
        assert_eq!(karl.gender, Gender::Male);
        assert_eq!(karl.lifespan().as_deref(), Some("1931-2004"));
        assert_eq!(snapshot.person("p2").unwrap().birth_name.as_deref(), Some("Vogt"));
        assert_eq!(snapshot.person("p3").unwrap().gender, Gender::Other);

        assert_eq!(snapshot.relationships[1].relation_type, RelationType::Child);
        assert_eq!(snapshot.relationships[3].relation_type, RelationType::Unknown);
    }

    #[test]
    fn test_layout_snapshot() {
        let snapshot = FamilySnapshot::from_json_str(SNAPSHOT).unwrap();
        let out = snapshot.layout(&LayoutConfig::default());

        assert_eq!(out.nodes.len(), 3);
        assert_eq!(out.node(&"p3".into()).unwrap().generation, 1);
        // spouse + two parent-child edges; the unknown type is not drawn
        assert_eq!(out.edges.len(), 3);
    }

    #[test]
    fn test_bad_json() {
        assert!(FamilySnapshot::from_json_str("{ \"persons\": 3 }").is_err());
        let empty = FamilySnapshot::from_json_str("{}").unwrap();
        assert!(empty.layout(&LayoutConfig::default()).is_empty());
    }
}
