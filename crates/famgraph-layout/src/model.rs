//! Input records: persons and the typed relationships between them
//!
//! These mirror what the data layer stores. The layout code only reads them.

use chrono::NaiveDate;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a person
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        PersonId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        PersonId(s)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        PersonId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

/// A person in a family
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct Person {
    pub id: PersonId,

    #[cfg_attr(feature = "serde", serde(default))]
    pub first_name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub last_name: String,

    /// Surname at birth, if it differs
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub birth_name: Option<String>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub birth_year: Option<i32>,

    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub death_year: Option<i32>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub gender: Gender,

    /// Photo URL
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub photo: Option<String>,
}

impl Person {
    /// Create a person with only an id; every other attribute is empty
    pub fn new(id: impl Into<PersonId>) -> Self {
        Person {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            birth_name: None,
            birth_year: None,
            death_year: None,
            gender: Gender::Other,
            photo: None,
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn with_years(mut self, birth: Option<i32>, death: Option<i32>) -> Self {
        self.birth_year = birth;
        self.death_year = death;
        self
    }

    /// "First Last", falling back to the id when both names are empty
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.id.to_string()
        } else {
            name.to_string()
        }
    }

    /// "1920-1990", "1920-" or "-1990"
    pub fn lifespan(&self) -> Option<String> {
        match (self.birth_year, self.death_year) {
            (None, None) => None,
            (birth, death) => Some(format!(
                "{}-{}",
                birth.map(|y| y.to_string()).unwrap_or_default(),
                death.map(|y| y.to_string()).unwrap_or_default()
            )),
        }
    }
}

/// Type of relationship recorded between two persons
///
/// The record reads "`from` is the <type> of `to`": `Parent` means `from` is
/// a parent of `to`, `Child` means `from` is a child of `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RelationType {
    Parent,
    Child,
    Spouse,
    ExSpouse,
    Sibling,
    /// Any value the data layer sent that we do not understand
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl RelationType {
    /// Spouse and ex-spouse links place partners side by side
    pub fn is_partnership(&self) -> bool {
        matches!(self, RelationType::Spouse | RelationType::ExSpouse)
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelationType::Parent => "PARENT",
            RelationType::Child => "CHILD",
            RelationType::Spouse => "SPOUSE",
            RelationType::ExSpouse => "EX_SPOUSE",
            RelationType::Sibling => "SIBLING",
            RelationType::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

/// A directed, typed relationship record
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct RelationshipEdge {
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,

    #[cfg_attr(feature = "serde", serde(rename = "personId"))]
    pub from: PersonId,

    #[cfg_attr(feature = "serde", serde(rename = "relatedPersonId"))]
    pub to: PersonId,

    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub relation_type: RelationType,

    /// Start of a partnership
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub start_date: Option<NaiveDate>,

    /// End of a partnership
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub end_date: Option<NaiveDate>,
}

impl RelationshipEdge {
    pub fn new(
        from: impl Into<PersonId>,
        to: impl Into<PersonId>,
        relation_type: RelationType,
    ) -> Self {
        RelationshipEdge {
            id: None,
            from: from.into(),
            to: to.into(),
            relation_type,
            start_date: None,
            end_date: None,
        }
    }

    pub fn parent(parent: impl Into<PersonId>, child: impl Into<PersonId>) -> Self {
        Self::new(parent, child, RelationType::Parent)
    }

    pub fn spouse(a: impl Into<PersonId>, b: impl Into<PersonId>) -> Self {
        Self::new(a, b, RelationType::Spouse)
    }

    /// Partnership dates; ignored for non-partnership types
    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        if self.relation_type.is_partnership() {
            self.start_date = start;
            self.end_date = end;
        }
        self
    }

    /// Rewrite `CHILD(a -> b)` as `PARENT(b -> a)`; every other type is returned as is
    pub fn normalized(&self) -> RelationshipEdge {
        match self.relation_type {
            RelationType::Child => RelationshipEdge {
                id: self.id.clone(),
                from: self.to.clone(),
                to: self.from.clone(),
                relation_type: RelationType::Parent,
                start_date: None,
                end_date: None,
            },
            _ => self.clone(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}
