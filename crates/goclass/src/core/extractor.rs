//! Class extraction
//!
//! Walks the top-level declarations of parsed files and builds one
//! [`Class`] per struct type.

use tracing::{debug, span, trace, Level};

use crate::core::config::ExtractConfig;
use crate::core::signature::{classify, element_type, multiplicity, Classification};
use crate::core::syntax::{self, FieldList, SourceFile};
use crate::core::{Class, Field, Package, Relation};

/// Builds a [`Package`] model from parsed source files
#[derive(Debug, Clone, Default)]
pub struct ClassExtractor {
    config: ExtractConfig,
}

impl ClassExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract every struct type declared in `files`, in encounter order
    pub fn extract(&self, qualified_name: &str, files: &[SourceFile]) -> Package {
        let extract_span = span!(
            Level::INFO,
            "extract_package",
            package = qualified_name,
            file_count = files.len()
        );
        let _enter = extract_span.enter();

        let mut package = Package::new(qualified_name);
        for file in files {
            self.extract_file(&mut package, file);
        }

        debug!(
            class_count = package.class_count(),
            relation_count = package.relation_count(),
            "Extraction completed"
        );
        package
    }

    fn extract_file(&self, package: &mut Package, file: &SourceFile) {
        for spec in file.type_specs() {
            let Some(fields) = spec.struct_fields() else {
                trace!(name = %spec.name, alias = spec.alias, "Skipping non-struct type");
                continue;
            };

            let mut class = Class::new(&spec.name);
            self.extract_fields(&mut class, fields);
            debug!(
                class = %class.name,
                type_params = ?spec.type_params,
                alias = spec.alias,
                fields = class.fields.len(),
                relations = class.relations.len(),
                "Extracted class"
            );
            package.add_class(class);
        }
    }

    fn extract_fields(&self, class: &mut Class, fields: &FieldList) {
        for member in fields.iter() {
            self.extract_member(class, member);
        }
    }

    fn extract_member(&self, class: &mut Class, member: &syntax::Field) {
        let multiplicity = multiplicity(&member.ty);
        let element = element_type(&member.ty);
        let classification = classify(&member.ty, &self.config);
        trace!(
            names = ?member.names,
            element = %element,
            ?classification,
            "Classified member"
        );

        match classification {
            Classification::Field => {
                let field = Field::new("", element).with_multiplicity(multiplicity);
                if member.is_embedded() {
                    class.add_field(field);
                    return;
                }
                for name in &member.names {
                    class.add_field(Field {
                        name: name.clone(),
                        ..field.clone()
                    });
                }
            }
            Classification::Relation => {
                if member.is_embedded() {
                    class.add_relation(
                        Relation::composition(element).with_multiplicity(multiplicity),
                    );
                    return;
                }
                for name in &member.names {
                    class.add_relation(
                        Relation::association(name, element.as_str())
                            .with_multiplicity(multiplicity),
                    );
                }
            }
        }
    }
}
