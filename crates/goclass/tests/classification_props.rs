//! Property tests for member classification
//!
//! Generated type expressions check that the structural classification,
//! the rendered signatures, and extraction agree with each other.

use goclass::core::signature::{classify, element_type, multiplicity, signature, Classification};
use goclass::core::syntax::{ChanDir, Decl, Field, FieldList, FuncType, SourceFile, TypeExpr, TypeSpec};
use goclass::{ClassExtractor, ExtractConfig, Multiplicity, SCALAR_TYPES};
use proptest::prelude::*;

/// Scalar names and composite renderings, which contain a space or `[`
fn is_primitive_signature(signature: &str) -> bool {
    SCALAR_TYPES.contains(&signature) || signature.contains([' ', '['])
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("int"),
        Just("string"),
        Just("float64"),
        Just("byte"),
        Just("error"),
        Just("Foo"),
        Just("Node"),
    ]
    .prop_map(String::from)
}

fn arb_qualified() -> impl Strategy<Value = TypeExpr> {
    (
        prop_oneof![Just("io"), Just("time"), Just("pkg")],
        prop_oneof![Just("Reader"), Just("Duration"), Just("int")],
    )
        .prop_map(|(package, name)| TypeExpr::qualified(package, name))
}

fn arb_type() -> impl Strategy<Value = TypeExpr> {
    let leaf = prop_oneof![arb_name().prop_map(TypeExpr::Ident), arb_qualified()];

    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeExpr::slice),
            (1usize..8, inner.clone()).prop_map(|(n, elem)| TypeExpr::array(n.to_string(), elem)),
            inner.clone().prop_map(TypeExpr::pointer),
            inner.clone().prop_map(|elem| TypeExpr::Paren(Box::new(elem))),
            (inner.clone(), inner.clone()).prop_map(|(key, value)| TypeExpr::map(key, value)),
            inner.clone().prop_map(|elem| TypeExpr::chan(ChanDir::Recv, elem)),
            prop::collection::vec(inner.clone(), 0..3).prop_map(|params| {
                TypeExpr::Func(FuncType {
                    params: FieldList::new(params.into_iter().map(Field::embedded).collect()),
                    results: None,
                })
            }),
            prop::collection::vec(inner.clone(), 1..3).prop_map(|args| TypeExpr::Generic {
                base: Box::new(TypeExpr::ident("List")),
                args,
            }),
            prop::collection::vec(inner, 0..3).prop_map(|types| {
                TypeExpr::Struct(FieldList::new(
                    types
                        .into_iter()
                        .enumerate()
                        .map(|(i, ty)| Field::named([format!("F{}", i)], ty))
                        .collect(),
                ))
            }),
        ]
    })
}

/// A struct member: zero names means embedded
fn arb_member() -> impl Strategy<Value = Field> {
    (
        prop::collection::vec(prop_oneof![Just("A"), Just("B"), Just("C")], 0..3),
        arb_type(),
    )
        .prop_map(|(names, ty)| Field::named(names, ty))
}

fn single_struct(members: Vec<Field>) -> SourceFile {
    let mut file = SourceFile::new("props");
    file.decls.push(Decl::Type(vec![TypeSpec::new(
        "T",
        TypeExpr::Struct(FieldList::new(members)),
    )]));
    file
}

proptest! {
    #[test]
    fn structural_classification_matches_rendered_element(ty in arb_type()) {
        let structural = classify(&ty, &ExtractConfig::default()) == Classification::Relation;
        let textual = !is_primitive_signature(&element_type(&ty));
        prop_assert_eq!(structural, textual);
    }

    #[test]
    fn signatures_erase_pointer_and_slice_wrappers(ty in arb_type()) {
        let rendered = signature(&ty);
        prop_assert!(!rendered.contains('*'));
        prop_assert!(!rendered.contains("[]"));
        prop_assert_eq!(signature(&TypeExpr::pointer(ty.clone())), rendered.clone());
        prop_assert_eq!(signature(&TypeExpr::slice(ty)), rendered);
    }

    #[test]
    fn multiplicity_follows_outermost_wrapper(ty in arb_type()) {
        prop_assert_eq!(multiplicity(&TypeExpr::slice(ty.clone())), Multiplicity::Many);
        prop_assert_eq!(multiplicity(&TypeExpr::pointer(ty.clone())), Multiplicity::One);
        prop_assert_eq!(multiplicity(&ty).is_many(), ty.is_array());
    }

    #[test]
    fn every_member_yields_exactly_one_entry_per_name(
        members in prop::collection::vec(arb_member(), 0..6)
    ) {
        let expected: usize = members.iter().map(|m| m.names.len().max(1)).sum();
        let package = ClassExtractor::new().extract("props", &[single_struct(members)]);
        prop_assert_eq!(package.classes[0].member_count(), expected);
    }

    #[test]
    fn extraction_is_idempotent(members in prop::collection::vec(arb_member(), 0..6)) {
        let files = [single_struct(members)];
        let extractor = ClassExtractor::new();
        prop_assert_eq!(extractor.extract("props", &files), extractor.extract("props", &files));
    }

    #[test]
    fn extra_scalars_only_demote_relations(members in prop::collection::vec(arb_member(), 0..6)) {
        let files = [single_struct(members)];
        let plain = ClassExtractor::new().extract("props", &files);
        let configured = ClassExtractor::with_config(
            ExtractConfig::new().with_scalars(["Foo", "io.Reader"]),
        )
        .extract("props", &files);

        let plain = &plain.classes[0];
        let configured = &configured.classes[0];
        prop_assert!(configured.relations.len() <= plain.relations.len());
        prop_assert_eq!(configured.member_count(), plain.member_count());
    }
}
