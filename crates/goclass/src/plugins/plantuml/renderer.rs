//! PlantUML class diagram renderer
//!
//! Emits one `class` block per struct, then one arrow per relation:
//!
//! ```text
//! @startuml
//! package "example.com/shop" {
//!   class Order {
//!     ID : string
//!     Tags : string [0..*]
//!   }
//! }
//! Order --> "0..*" Item : Items
//! Order *-- Base
//! @enduml
//! ```

use std::borrow::Cow;
use std::fmt::Write;

use anyhow::Result;
use tracing::{debug, span, Level};

use crate::core::{Class, Field, Package, Relation, RelationKind, Renderer};

/// Renders a [`Package`] as PlantUML text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantUmlRenderer {
    package_block: bool,
}

impl Default for PlantUmlRenderer {
    fn default() -> Self {
        Self {
            package_block: true,
        }
    }
}

impl PlantUmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap the classes in a `package "<name>" { ... }` block (default on)
    pub fn with_package_block(mut self, package_block: bool) -> Self {
        self.package_block = package_block;
        self
    }

    fn write_class(&self, out: &mut String, class: &Class, indent: &str) -> Result<()> {
        writeln!(out, "{}class {} {{", indent, class.name)?;
        for field in &class.fields {
            writeln!(out, "{}  {}", indent, field_line(field))?;
        }
        writeln!(out, "{}}}", indent)?;
        Ok(())
    }
}

/// One member line; `{field}` keeps braces in inline struct and interface
/// signatures from being read as modifiers
fn field_line(field: &Field) -> String {
    let mut line = if field.is_anonymous() {
        field.type_signature.clone()
    } else {
        format!("{} : {}", field.name, field.type_signature)
    };
    if field.multiplicity.is_many() {
        line.push_str(&format!(" [{}]", field.multiplicity));
    }
    if line.contains(['{', '}']) {
        line.insert_str(0, "{field} ");
    }
    line
}

/// Qualified targets need quotes to stay a single name
fn class_ref(name: &str) -> Cow<'_, str> {
    if name.contains('.') {
        Cow::Owned(format!("\"{}\"", name))
    } else {
        Cow::Borrowed(name)
    }
}

fn relation_line(owner: &str, relation: &Relation) -> String {
    let arrow = match relation.kind {
        RelationKind::Composition => "*--",
        RelationKind::Association => "-->",
    };
    let mut line = format!("{} {} ", class_ref(owner), arrow);
    if relation.multiplicity.is_many() {
        line.push_str(&format!("\"{}\" ", relation.multiplicity));
    }
    line.push_str(&class_ref(&relation.target));
    if !relation.label.is_empty() {
        line.push_str(" : ");
        line.push_str(&relation.label);
    }
    line
}

impl Renderer for PlantUmlRenderer {
    fn render(&self, package: &Package) -> Result<String> {
        let render_span = span!(
            Level::DEBUG,
            "render_plantuml",
            package = %package.qualified_name,
            class_count = package.class_count()
        );
        let _enter = render_span.enter();

        let mut out = String::new();
        writeln!(out, "@startuml")?;

        let indent = if self.package_block {
            writeln!(out, "package \"{}\" {{", package.qualified_name)?;
            "  "
        } else {
            ""
        };
        for class in package.classes() {
            self.write_class(&mut out, class, indent)?;
        }
        if self.package_block {
            writeln!(out, "}}")?;
        }

        for class in package.classes() {
            for relation in &class.relations {
                writeln!(out, "{}", relation_line(&class.name, relation))?;
            }
        }
        writeln!(out, "@enduml")?;

        debug!(output_len = out.len(), "Rendered PlantUML");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "puml"
    }

    fn file_extension(&self) -> &'static str {
        "puml"
    }
}
