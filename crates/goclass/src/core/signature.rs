//! Type signature resolution
//!
//! Renders a [`TypeExpr`] as the canonical signature string used for display
//! and decides whether a member's type is something a diagram can draw an
//! edge to.
//!
//! Array and pointer wrappers are erased from signatures: `[]*Foo` renders
//! as `Foo`. Composite shapes render with a keyword prefix:
//!
//! | shape            | signature                       |
//! |------------------|---------------------------------|
//! | `map[string]int` | `map[string]int`                |
//! | `chan<- T`       | `chan out T`                    |
//! | `<-chan T`       | `chan in T`                     |
//! | `chan T`         | `chan both T`                   |
//! | `func(int) error`| `func interror`                 |
//! | `struct{ X int }`| `struct {int}`                  |
//! | `interface{}`    | `interface {}`                  |

use crate::core::config::ExtractConfig;
use crate::core::syntax::{FieldList, FuncType, InterfaceElem, TypeExpr, UnionTerm};
use crate::core::Multiplicity;

/// Canonical signature of a type expression
pub fn signature(expr: &TypeExpr) -> String {
    match expr {
        TypeExpr::Ident(name) => name.clone(),
        TypeExpr::Qualified { package, name } => format!("{package}.{name}"),
        TypeExpr::Array { elem, .. } => signature(elem),
        TypeExpr::Pointer(elem) => signature(elem),
        TypeExpr::Func(func) => func_signature(func),
        TypeExpr::Map { key, value } => {
            format!("map[{}]{}", signature(key), signature(value))
        }
        TypeExpr::Interface(elems) => {
            let body: String = elems.iter().map(interface_elem_signature).collect();
            format!("interface {{{body}}}")
        }
        TypeExpr::Struct(fields) => format!("struct {{{}}}", field_list_signature(fields)),
        TypeExpr::Chan { dir, elem } => format!("chan {} {}", dir.word(), signature(elem)),
        TypeExpr::Paren(inner) => signature(inner),
        TypeExpr::Variadic(elem) => format!("...{}", signature(elem)),
        TypeExpr::Generic { base, args } => {
            let args: Vec<String> = args.iter().map(signature).collect();
            format!("{}[{}]", signature(base), args.join(","))
        }
    }
}

/// Concatenated signatures of every entry's type, one per entry
pub fn field_list_signature(fields: &FieldList) -> String {
    fields.iter().map(|field| signature(&field.ty)).collect()
}

fn func_signature(func: &FuncType) -> String {
    let results = func
        .results
        .as_ref()
        .map(field_list_signature)
        .unwrap_or_default();
    format!("func {}{}", field_list_signature(&func.params), results)
}

fn interface_elem_signature(elem: &InterfaceElem) -> String {
    match elem {
        InterfaceElem::Method { func, .. } => func_signature(func),
        InterfaceElem::Union(terms) => terms
            .iter()
            .map(union_term_signature)
            .collect::<Vec<_>>()
            .join("|"),
    }
}

fn union_term_signature(term: &UnionTerm) -> String {
    if term.tilde {
        format!("~{}", signature(&term.ty))
    } else {
        signature(&term.ty)
    }
}

/// The node left after stripping array, pointer and parenthesis wrappers
pub fn element_node(expr: &TypeExpr) -> &TypeExpr {
    match expr {
        TypeExpr::Array { elem, .. } | TypeExpr::Pointer(elem) | TypeExpr::Paren(elem) => {
            element_node(elem)
        }
        other => other,
    }
}

/// Signature of the element type: `[]*pkg.Foo` gives `pkg.Foo`
pub fn element_type(expr: &TypeExpr) -> String {
    signature(element_node(expr))
}

/// Multiplicity from the outermost shape only
///
/// Only a top-level array or slice counts; `*[]T` and `map[K][]V` stay
/// singular, and `[][]T` is a single `0..*`.
pub fn multiplicity(expr: &TypeExpr) -> Multiplicity {
    if expr.is_array() {
        Multiplicity::Many
    } else {
        Multiplicity::One
    }
}

/// How a struct member is represented in the diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Listed as an attribute of the class
    Field,
    /// Drawn as an edge to another named type
    Relation,
}

/// Classify a member type by the shape of its element node
///
/// Only bare or qualified names outside the scalar set are relation targets.
pub fn classify(expr: &TypeExpr, config: &ExtractConfig) -> Classification {
    match element_node(expr) {
        TypeExpr::Ident(name) if !config.is_scalar(name) => Classification::Relation,
        node @ TypeExpr::Qualified { .. } if !config.is_scalar(&signature(node)) => {
            Classification::Relation
        }
        _ => Classification::Field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::{ChanDir, Field};

    fn ident(name: &str) -> TypeExpr {
        TypeExpr::ident(name)
    }

    #[test]
    fn test_identifier_signature() {
        assert_eq!(signature(&ident("int")), "int");
        assert_eq!(signature(&ident("Foo")), "Foo");
    }

    #[test]
    fn test_wrappers_are_erased() {
        let expr = TypeExpr::slice(TypeExpr::pointer(ident("Foo")));
        assert_eq!(signature(&expr), "Foo");
        assert_eq!(signature(&TypeExpr::array("4", ident("byte"))), "byte");
        assert_eq!(signature(&TypeExpr::Paren(Box::new(ident("T")))), "T");
    }

    #[test]
    fn test_qualified_signature() {
        let expr = TypeExpr::pointer(TypeExpr::qualified("sync", "Mutex"));
        assert_eq!(signature(&expr), "sync.Mutex");
    }

    #[test]
    fn test_map_signature() {
        let expr = TypeExpr::map(ident("string"), ident("int"));
        assert_eq!(signature(&expr), "map[string]int");

        let nested = TypeExpr::map(ident("string"), TypeExpr::slice(ident("Foo")));
        assert_eq!(signature(&nested), "map[string]Foo");
    }

    #[test]
    fn test_chan_signatures() {
        assert_eq!(
            signature(&TypeExpr::chan(ChanDir::Both, ident("byte"))),
            "chan both byte"
        );
        assert_eq!(
            signature(&TypeExpr::chan(ChanDir::Send, ident("int"))),
            "chan out int"
        );
        assert_eq!(
            signature(&TypeExpr::chan(ChanDir::Recv, ident("error"))),
            "chan in error"
        );
    }

    #[test]
    fn test_func_signature() {
        let func = FuncType {
            params: FieldList::new(vec![
                Field::named(["a", "b"], ident("int")),
                Field::named(["s"], ident("string")),
            ]),
            results: Some(FieldList::new(vec![Field::embedded(ident("error"))])),
        };
        assert_eq!(signature(&TypeExpr::Func(func)), "func intstringerror");

        assert_eq!(signature(&TypeExpr::Func(FuncType::default())), "func ");
    }

    #[test]
    fn test_struct_and_interface_signatures() {
        let st = TypeExpr::Struct(FieldList::new(vec![
            Field::named(["X"], ident("int")),
            Field::named(["Y"], ident("string")),
        ]));
        assert_eq!(signature(&st), "struct {intstring}");
        assert_eq!(signature(&TypeExpr::Struct(FieldList::default())), "struct {}");
        assert_eq!(signature(&TypeExpr::Interface(Vec::new())), "interface {}");

        let iface = TypeExpr::Interface(vec![
            InterfaceElem::Method {
                name: "Read".to_string(),
                func: FuncType {
                    params: FieldList::new(vec![Field::named(
                        ["p"],
                        TypeExpr::slice(ident("byte")),
                    )]),
                    results: Some(FieldList::new(vec![
                        Field::named(["n"], ident("int")),
                        Field::named(["err"], ident("error")),
                    ])),
                },
            },
            InterfaceElem::Union(vec![UnionTerm {
                tilde: false,
                ty: TypeExpr::qualified("io", "Closer"),
            }]),
        ]);
        assert_eq!(signature(&iface), "interface {func byteinterrorio.Closer}");
    }

    #[test]
    fn test_union_and_generic_signatures() {
        let iface = TypeExpr::Interface(vec![InterfaceElem::Union(vec![
            UnionTerm {
                tilde: true,
                ty: ident("int"),
            },
            UnionTerm {
                tilde: false,
                ty: ident("string"),
            },
        ])]);
        assert_eq!(signature(&iface), "interface {~int|string}");

        let generic = TypeExpr::Generic {
            base: Box::new(TypeExpr::qualified("list", "List")),
            args: vec![ident("K"), TypeExpr::slice(ident("V"))],
        };
        assert_eq!(signature(&generic), "list.List[K,V]");
        assert_eq!(
            signature(&TypeExpr::Variadic(Box::new(ident("int")))),
            "...int"
        );
    }

    #[test]
    fn test_multiplicity_outermost_only() {
        assert_eq!(multiplicity(&TypeExpr::slice(ident("int"))), Multiplicity::Many);
        assert_eq!(
            multiplicity(&TypeExpr::array("3", TypeExpr::slice(ident("int")))),
            Multiplicity::Many
        );
        assert_eq!(
            multiplicity(&TypeExpr::pointer(TypeExpr::slice(ident("int")))),
            Multiplicity::One
        );
        assert_eq!(
            multiplicity(&TypeExpr::map(ident("string"), TypeExpr::slice(ident("int")))),
            Multiplicity::One
        );
    }

    #[test]
    fn test_classify() {
        let config = ExtractConfig::default();
        assert_eq!(classify(&ident("int"), &config), Classification::Field);
        assert_eq!(classify(&ident("Foo"), &config), Classification::Relation);
        assert_eq!(
            classify(&TypeExpr::slice(TypeExpr::pointer(ident("Foo"))), &config),
            Classification::Relation
        );
        assert_eq!(
            classify(&TypeExpr::qualified("io", "Reader"), &config),
            Classification::Relation
        );
        assert_eq!(
            classify(&TypeExpr::map(ident("string"), ident("Foo")), &config),
            Classification::Field
        );
        assert_eq!(
            classify(&TypeExpr::chan(ChanDir::Both, ident("Foo")), &config),
            Classification::Field
        );
        assert_eq!(
            classify(
                &TypeExpr::Generic {
                    base: Box::new(ident("List")),
                    args: vec![ident("int")],
                },
                &config
            ),
            Classification::Field
        );
    }

    #[test]
    fn test_classify_with_extra_scalars() {
        let config = ExtractConfig::new().with_scalars(["error", "time.Time"]);
        assert_eq!(classify(&ident("error"), &config), Classification::Field);
        assert_eq!(
            classify(&TypeExpr::qualified("time", "Time"), &config),
            Classification::Field
        );
        assert_eq!(
            classify(&TypeExpr::qualified("time", "Duration"), &config),
            Classification::Relation
        );
    }
}
