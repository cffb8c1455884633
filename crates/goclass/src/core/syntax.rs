//! Go syntax tree
//!
//! A closed model of the parts of a Go source file that class extraction
//! looks at. Every syntactic shape a type expression can take is a variant
//! of [`TypeExpr`], so consumers match exhaustively instead of carrying an
//! "unknown node" fallback.

use anyhow::Result;

/// A parsed Go source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Name from the `package` clause
    pub package: String,
    /// Top-level declarations in source order
    pub decls: Vec<Decl>,
}

impl SourceFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            decls: Vec::new(),
        }
    }

    /// Iterate over every type spec declared in this file, in order
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec> {
        self.decls.iter().flat_map(|decl| match decl {
            Decl::Type(specs) => specs.as_slice(),
            Decl::Other(_) => &[][..],
        })
    }
}

/// A top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `type` declaration, single or grouped
    Type(Vec<TypeSpec>),
    /// Any declaration that is not modeled structurally
    Other(DeclKind),
}

/// Kinds of declarations that are recognized but not modeled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Import,
    Const,
    Var,
    Func,
}

/// One `Name [TypeParams] [=] Type` specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    /// Names of the declared type parameters, if any
    pub type_params: Vec<String>,
    /// `type A = B` rather than `type A B`
    pub alias: bool,
    pub ty: TypeExpr,
}

impl TypeSpec {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            alias: false,
            ty,
        }
    }

    /// The struct body if this spec declares a struct type
    pub fn struct_fields(&self) -> Option<&FieldList> {
        match &self.ty {
            TypeExpr::Struct(fields) => Some(fields),
            _ => None,
        }
    }
}

/// A type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Bare identifier: `int`, `Foo`
    Ident(String),
    /// Package-qualified name: `io.Reader`
    Qualified { package: String, name: String },
    /// Array or slice; `len` is `None` for a slice
    Array {
        len: Option<String>,
        elem: Box<TypeExpr>,
    },
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `func(params) results`
    Func(FuncType),
    /// `map[K]V`
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `interface { ... }`
    Interface(Vec<InterfaceElem>),
    /// Inline `struct { ... }`
    Struct(FieldList),
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan { dir: ChanDir, elem: Box<TypeExpr> },
    /// `(T)`
    Paren(Box<TypeExpr>),
    /// `...T` in a parameter list
    Variadic(Box<TypeExpr>),
    /// `T[A, B]`
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Array {
            len: None,
            elem: Box::new(elem),
        }
    }

    pub fn array(len: impl Into<String>, elem: TypeExpr) -> Self {
        TypeExpr::Array {
            len: Some(len.into()),
            elem: Box::new(elem),
        }
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(elem))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(dir: ChanDir, elem: TypeExpr) -> Self {
        TypeExpr::Chan {
            dir,
            elem: Box::new(elem),
        }
    }

    /// True for array and slice types
    pub fn is_array(&self) -> bool {
        matches!(self, TypeExpr::Array { .. })
    }
}

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
    /// `chan T`
    Both,
}

impl ChanDir {
    /// The word used for this direction in signatures
    pub fn word(self) -> &'static str {
        match self {
            ChanDir::Send => "out",
            ChanDir::Recv => "in",
            ChanDir::Both => "both",
        }
    }
}

/// Parameters and results of a function type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuncType {
    pub params: FieldList,
    /// `None` when the function declares no results
    pub results: Option<FieldList>,
}

/// Ordered list of fields (struct members or parameters)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldList {
    pub fields: Vec<Field>,
}

impl FieldList {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }
}

/// A struct member or parameter group: zero or more names sharing one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Empty for embedded members and unnamed parameters
    pub names: Vec<String>,
    pub ty: TypeExpr,
}

impl Field {
    pub fn named<S: Into<String>>(names: impl IntoIterator<Item = S>, ty: TypeExpr) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            ty,
        }
    }

    pub fn embedded(ty: TypeExpr) -> Self {
        Self {
            names: Vec::new(),
            ty,
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// An element of an interface body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceElem {
    /// `Name(params) results`
    Method { name: String, func: FuncType },
    /// Embedded interface or type-set union: `io.Reader`, `~int | ~string`
    Union(Vec<UnionTerm>),
}

/// One term of a type-set union
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionTerm {
    /// `~T` rather than `T`
    pub tilde: bool,
    pub ty: TypeExpr,
}

/// Turns Go source text into a [`SourceFile`]
///
/// Parsing is a pre-stage of extraction: implementations live outside the
/// core so other front ends can be swapped in.
pub trait SourceParser: Send + Sync {
    /// Parse one file; `path` is only used for error reporting
    fn parse_file(&self, path: &std::path::Path, source: &str) -> Result<SourceFile>;

    /// Name of this parser
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_specs_flatten_grouped_decls() {
        let mut file = SourceFile::new("demo");
        file.decls.push(Decl::Other(DeclKind::Import));
        file.decls.push(Decl::Type(vec![
            TypeSpec::new("A", TypeExpr::Struct(FieldList::default())),
            TypeSpec::new("B", TypeExpr::ident("int")),
        ]));
        file.decls.push(Decl::Other(DeclKind::Func));
        file.decls
            .push(Decl::Type(vec![TypeSpec::new("C", TypeExpr::ident("string"))]));

        let names: Vec<&str> = file.type_specs().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_struct_fields_only_for_structs() {
        let st = TypeSpec::new("A", TypeExpr::Struct(FieldList::default()));
        let named = TypeSpec::new("B", TypeExpr::ident("int"));
        assert!(st.struct_fields().is_some());
        assert!(named.struct_fields().is_none());
    }

    #[test]
    fn test_chan_dir_words() {
        assert_eq!(ChanDir::Send.word(), "out");
        assert_eq!(ChanDir::Recv.word(), "in");
        assert_eq!(ChanDir::Both.word(), "both");
    }

    #[test]
    fn test_field_constructors() {
        let f = Field::named(["a", "b"], TypeExpr::ident("int"));
        assert_eq!(f.names, vec!["a".to_string(), "b".to_string()]);
        assert!(!f.is_embedded());

        let e = Field::embedded(TypeExpr::ident("Base"));
        assert!(e.is_embedded());
        assert!(e.names.is_empty());
    }
}
