//! Go declaration parser using chumsky
//!
//! Runs over the token stream produced by the lexer and builds the
//! [`SourceFile`] tree. Only type declarations are modeled; `import`,
//! `const`, `var`, and `func` declarations are recognized and skipped as
//! balanced token runs.

use std::path::Path;

use anyhow::Result;
use chumsky::prelude::*;
use tracing::{debug, span, trace, Level};

use super::lexer::{tokenize, Token, TokenStream};
use crate::core::chumsky_utils::line_column;
use crate::core::syntax::{
    ChanDir, Decl, DeclKind, Field, FieldList, FuncType, InterfaceElem, SourceFile, SourceParser,
    TypeExpr, TypeSpec, UnionTerm,
};
use crate::core::ExtractError;

type Extra<'tok> = extra::Err<Rich<'tok, Token>>;

/// Parser for Go source files
#[derive(Debug, Clone, Copy, Default)]
pub struct GoParser;

impl GoParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse an already tokenized file
    pub fn parse_tokens(
        &self,
        path: &Path,
        source: &str,
        stream: &TokenStream,
    ) -> Result<SourceFile, ExtractError> {
        file_parser()
            .parse(stream.tokens.as_slice())
            .into_result()
            .map_err(|errors| match errors.into_iter().next() {
                Some(error) => to_syntax_error(path, source, stream, &error),
                None => ExtractError::syntax_error(path, "invalid source file", 1, 1),
            })
    }
}

impl SourceParser for GoParser {
    fn parse_file(&self, path: &Path, source: &str) -> Result<SourceFile> {
        let parse_span = span!(Level::DEBUG, "parse_file", file = %path.display());
        let _enter = parse_span.enter();

        let stream = tokenize(path, source)?;
        let file = self.parse_tokens(path, source, &stream)?;

        debug!(
            package = %file.package,
            decl_count = file.decls.len(),
            "Parsed file"
        );
        Ok(file)
    }

    fn name(&self) -> &'static str {
        "go"
    }
}

fn to_syntax_error(
    path: &Path,
    source: &str,
    stream: &TokenStream,
    error: &Rich<'_, Token>,
) -> ExtractError {
    let index = error.span().start;
    let (line, column) = line_column(source, stream.offset_of(index));

    let inserted = stream
        .spans
        .get(index)
        .map(|span| span.start == span.end)
        .unwrap_or(false);
    let mut message = match error.found() {
        Some(Token::Semicolon) if inserted => "unexpected newline".to_string(),
        Some(token) => format!("unexpected `{}`", token),
        None => "unexpected end of file".to_string(),
    };

    let expected: Vec<String> = error.expected().map(|e| e.to_string()).collect();
    if !expected.is_empty() {
        message.push_str(&format!(", expected {}", expected.join(" or ")));
    }

    trace!(index, line, column, "Syntax error");
    ExtractError::syntax_error(path, message, line, column)
}

fn ident<'tok>() -> impl Parser<'tok, &'tok [Token], String, Extra<'tok>> + Clone {
    select! { Token::Ident(name) => name }.labelled("identifier")
}

fn string_lit<'tok>() -> impl Parser<'tok, &'tok [Token], String, Extra<'tok>> + Clone {
    select! { Token::Str(text) => text }.labelled("string literal")
}

/// One entry of a parameter list before names are grouped
enum ParamEntry {
    Named(String, TypeExpr),
    Unnamed(TypeExpr),
}

/// Group parameter entries the way Go does
///
/// When any entry carries a name, a bare identifier entry is a name that
/// shares the type of the next named entry: `a, b int` is one group.
/// Otherwise every entry is an unnamed type.
fn group_params(entries: Vec<ParamEntry>) -> FieldList {
    let any_named = entries
        .iter()
        .any(|entry| matches!(entry, ParamEntry::Named(..)));

    if !any_named {
        return FieldList::new(
            entries
                .into_iter()
                .map(|entry| match entry {
                    ParamEntry::Unnamed(ty) => Field::embedded(ty),
                    ParamEntry::Named(name, ty) => Field::named([name], ty),
                })
                .collect(),
        );
    }

    let mut fields = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    for entry in entries {
        match entry {
            ParamEntry::Unnamed(TypeExpr::Ident(name)) => pending.push(name),
            ParamEntry::Unnamed(ty) => fields.push(Field::embedded(ty)),
            ParamEntry::Named(name, ty) => {
                pending.push(name);
                fields.push(Field::named(pending.drain(..), ty));
            }
        }
    }
    fields.extend(
        pending
            .into_iter()
            .map(|name| Field::embedded(TypeExpr::Ident(name))),
    );
    FieldList::new(fields)
}

/// Parser for a single type expression
pub fn type_parser<'tok>() -> impl Parser<'tok, &'tok [Token], TypeExpr, Extra<'tok>> + Clone {
    recursive(|ty| {
        let type_args = ty
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LBracket), just(Token::RBracket));

        // `Name`, `pkg.Name`, `Name[A, B]`
        let named = ident()
            .then(just(Token::Dot).ignore_then(ident()).or_not())
            .map(|(first, second)| match second {
                Some(name) => TypeExpr::Qualified {
                    package: first,
                    name,
                },
                None => TypeExpr::Ident(first),
            })
            .then(type_args.or_not())
            .map(|(base, args)| match args {
                Some(args) => TypeExpr::Generic {
                    base: Box::new(base),
                    args,
                },
                None => base,
            });

        let pointer = just(Token::Star)
            .ignore_then(ty.clone())
            .map(TypeExpr::pointer);

        let array_len = none_of([Token::RBracket])
            .repeated()
            .at_least(1)
            .collect::<Vec<Token>>()
            .map(|tokens| tokens.iter().map(ToString::to_string).collect::<String>());
        let array = array_len
            .or_not()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .then(ty.clone())
            .map(|(len, elem)| TypeExpr::Array {
                len,
                elem: Box::new(elem),
            });

        let map = just(Token::Map)
            .ignore_then(
                ty.clone()
                    .delimited_by(just(Token::LBracket), just(Token::RBracket)),
            )
            .then(ty.clone())
            .map(|(key, value)| TypeExpr::map(key, value));

        let chan = choice((
            just(Token::Arrow)
                .ignore_then(just(Token::Chan))
                .ignore_then(ty.clone())
                .map(|elem| TypeExpr::chan(ChanDir::Recv, elem)),
            just(Token::Chan)
                .ignore_then(just(Token::Arrow))
                .ignore_then(ty.clone())
                .map(|elem| TypeExpr::chan(ChanDir::Send, elem)),
            just(Token::Chan)
                .ignore_then(ty.clone())
                .map(|elem| TypeExpr::chan(ChanDir::Both, elem)),
        ));

        let param_type = just(Token::Ellipsis)
            .ignore_then(ty.clone())
            .map(|elem| TypeExpr::Variadic(Box::new(elem)))
            .or(ty.clone());
        let param_entry = choice((
            ident()
                .then(param_type.clone())
                .map(|(name, ty)| ParamEntry::Named(name, ty)),
            param_type.map(ParamEntry::Unnamed),
        ));
        let params = param_entry
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map(group_params);
        let results = choice((
            params.clone(),
            ty.clone()
                .map(|result| FieldList::new(vec![Field::embedded(result)])),
        ))
        .or_not();
        let signature = params
            .then(results)
            .map(|(params, results)| FuncType { params, results })
            .boxed();

        let func = just(Token::Func)
            .ignore_then(signature.clone())
            .map(TypeExpr::Func);

        let named_field = ident()
            .separated_by(just(Token::Comma))
            .at_least(1)
            .collect::<Vec<_>>()
            .then(ty.clone())
            .then_ignore(string_lit().or_not())
            .map(|(names, ty)| Field { names, ty });
        let embedded_field = just(Token::Star)
            .or_not()
            .then(named.clone())
            .then_ignore(string_lit().or_not())
            .map(|(star, ty)| match star {
                Some(_) => Field::embedded(TypeExpr::pointer(ty)),
                None => Field::embedded(ty),
            });
        let struct_type = just(Token::Struct)
            .ignore_then(
                choice((named_field, embedded_field))
                    .separated_by(just(Token::Semicolon))
                    .allow_trailing()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::LBrace), just(Token::RBrace)),
            )
            .map(|fields| TypeExpr::Struct(FieldList::new(fields)));

        let method = ident()
            .then(signature)
            .map(|(name, func)| InterfaceElem::Method { name, func });
        let union = union_terms(ty.clone()).map(InterfaceElem::Union);
        let interface_type = just(Token::Interface)
            .ignore_then(
                choice((method, union))
                    .separated_by(just(Token::Semicolon))
                    .allow_trailing()
                    .collect::<Vec<_>>()
                    .delimited_by(just(Token::LBrace), just(Token::RBrace)),
            )
            .map(TypeExpr::Interface);

        let paren = ty
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map(|inner| TypeExpr::Paren(Box::new(inner)));

        choice((
            named,
            pointer,
            array,
            map,
            chan,
            func,
            struct_type,
            interface_type,
            paren,
        ))
        .labelled("type")
    })
}

/// `~A | B | ~C`
fn union_terms<'tok, P>(ty: P) -> impl Parser<'tok, &'tok [Token], Vec<UnionTerm>, Extra<'tok>> + Clone
where
    P: Parser<'tok, &'tok [Token], TypeExpr, Extra<'tok>> + Clone,
{
    just(Token::Tilde)
        .or_not()
        .then(ty)
        .map(|(tilde, ty)| UnionTerm {
            tilde: tilde.is_some(),
            ty,
        })
        .separated_by(just(Token::Pipe))
        .at_least(1)
        .collect::<Vec<_>>()
}

/// Type shapes that can never appear in an expression
fn is_type_elem(ty: &TypeExpr) -> bool {
    match ty {
        TypeExpr::Array { .. }
        | TypeExpr::Struct(_)
        | TypeExpr::Func(_)
        | TypeExpr::Interface(_)
        | TypeExpr::Map { .. }
        | TypeExpr::Chan { .. } => true,
        TypeExpr::Paren(inner) => is_type_elem(inner),
        _ => false,
    }
}

/// Whether a lone `[P *C]` or `[P (C)]` is really an array length
///
/// These read as the expressions `P*C` and `P(C)` unless a comma follows or
/// some term is a type element.
fn is_array_length(terms: &[UnionTerm], comma_follows: bool) -> bool {
    let Some((first, rest)) = terms.split_first() else {
        return false;
    };
    if comma_follows || first.tilde || rest.iter().any(|t| t.tilde || is_type_elem(&t.ty)) {
        return false;
    }
    match &first.ty {
        TypeExpr::Pointer(inner) | TypeExpr::Paren(inner) => !is_type_elem(inner),
        _ => false,
    }
}

/// Tokens of a declaration that is not modeled, up to its terminating `;`
fn skipped_decl_body<'tok>() -> impl Parser<'tok, &'tok [Token], (), Extra<'tok>> + Clone {
    let tree = recursive(|tree| {
        let group = |open: Token, close: Token| {
            tree.clone()
                .repeated()
                .delimited_by(just(open), just(close))
                .ignored()
        };
        choice((
            group(Token::LParen, Token::RParen),
            group(Token::LBrace, Token::RBrace),
            group(Token::LBracket, Token::RBracket),
            none_of([
                Token::LParen,
                Token::RParen,
                Token::LBrace,
                Token::RBrace,
                Token::LBracket,
                Token::RBracket,
            ])
            .ignored(),
        ))
    });

    tree.and_is(just(Token::Semicolon).not()).repeated()
}

/// Parser for a whole file: package clause followed by declarations
pub fn file_parser<'tok>() -> impl Parser<'tok, &'tok [Token], SourceFile, Extra<'tok>> {
    let semicolons = just(Token::Semicolon).repeated();
    let ty = type_parser();

    // `[K comparable, V any]`, `[T ~int | ~string]`
    let type_params = ident()
        .separated_by(just(Token::Comma))
        .at_least(1)
        .collect::<Vec<_>>()
        .then(union_terms(ty.clone()))
        .separated_by(just(Token::Comma))
        .at_least(1)
        .collect::<Vec<(Vec<String>, Vec<UnionTerm>)>>()
        .then(just(Token::Comma).or_not())
        .delimited_by(just(Token::LBracket), just(Token::RBracket))
        .try_map(|(groups, trailing), span| {
            let comma_follows = groups.len() > 1 || trailing.is_some();
            let ambiguous = groups
                .first()
                .is_some_and(|(names, terms)| {
                    names.len() == 1 && is_array_length(terms, comma_follows)
                });
            if ambiguous {
                return Err(Rich::custom(span, "array length, not type parameters"));
            }
            Ok(groups
                .into_iter()
                .flat_map(|(names, _)| names)
                .collect::<Vec<_>>())
        });

    let type_spec = ident()
        .then(type_params.or_not())
        .then(just(Token::Assign).or_not())
        .then(ty)
        .map(|(((name, type_params), assign), ty)| TypeSpec {
            name,
            type_params: type_params.unwrap_or_default(),
            alias: assign.is_some(),
            ty,
        });

    let type_decl = just(Token::Type)
        .ignore_then(choice((
            type_spec
                .clone()
                .separated_by(just(Token::Semicolon))
                .allow_trailing()
                .collect::<Vec<_>>()
                .delimited_by(just(Token::LParen), just(Token::RParen)),
            type_spec.map(|spec| vec![spec]),
        )))
        .map(Decl::Type);

    let other_kind = select! {
        Token::Import => DeclKind::Import,
        Token::Const => DeclKind::Const,
        Token::Var => DeclKind::Var,
        Token::Func => DeclKind::Func,
    };
    let other_decl = other_kind
        .then_ignore(skipped_decl_body())
        .map(Decl::Other);

    let package_clause = just(Token::Package)
        .ignore_then(ident())
        .labelled("package clause");

    semicolons
        .clone()
        .ignore_then(package_clause)
        .then_ignore(semicolons.clone())
        .then(
            choice((type_decl, other_decl))
                .then_ignore(semicolons)
                .repeated()
                .collect::<Vec<_>>(),
        )
        .then_ignore(end())
        .map(|(package, decls)| SourceFile { package, decls })
}
