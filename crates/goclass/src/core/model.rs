//! Class diagram model
//!
//! The value produced by extraction and consumed by renderers.

use serde::{Serialize, Serializer};
use std::fmt;

/// Cardinality marker on a field or relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Multiplicity {
    /// Exactly one
    #[default]
    One,
    /// Array or slice typed (`0..*`)
    Many,
}

impl Multiplicity {
    pub fn as_str(self) -> &'static str {
        match self {
            Multiplicity::One => "",
            Multiplicity::Many => "0..*",
        }
    }

    pub fn is_many(self) -> bool {
        self == Multiplicity::Many
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Multiplicity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Kind of a relation between two classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationKind {
    /// Embedded member: the container includes it without a name
    Composition,
    /// Named member referring to another named type
    Association,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::Composition => write!(f, "Composition"),
            RelationKind::Association => write!(f, "Association"),
        }
    }
}

/// A scalar or otherwise non-referenceable member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Empty for an embedded member
    pub name: String,
    #[serde(rename = "type")]
    pub type_signature: String,
    pub multiplicity: Multiplicity,
}

impl Field {
    pub fn new(name: impl Into<String>, type_signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_signature: type_signature.into(),
            multiplicity: Multiplicity::One,
        }
    }

    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

/// An edge from a class to another named type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    /// Field name; empty for an embedded member
    pub label: String,
    /// Element type signature of the member
    pub target: String,
    pub kind: RelationKind,
    pub multiplicity: Multiplicity,
}

impl Relation {
    pub fn composition(target: impl Into<String>) -> Self {
        Self {
            label: String::new(),
            target: target.into(),
            kind: RelationKind::Composition,
            multiplicity: Multiplicity::One,
        }
    }

    pub fn association(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            kind: RelationKind::Association,
            multiplicity: Multiplicity::One,
        }
    }

    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }
}

/// One struct type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Class {
    pub name: String,
    pub fields: Vec<Field>,
    pub relations: Vec<Relation>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    /// Number of fields plus relations
    pub fn member_count(&self) -> usize {
        self.fields.len() + self.relations.len()
    }
}

/// All classes extracted from one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    pub qualified_name: String,
    pub classes: Vec<Class>,
}

impl Package {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            classes: Vec::new(),
        }
    }

    pub fn add_class(&mut self, class: Class) {
        self.classes.push(class);
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn get_class(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Total number of relations across all classes
    pub fn relation_count(&self) -> usize {
        self.classes.iter().map(|c| c.relations.len()).sum()
    }
}
