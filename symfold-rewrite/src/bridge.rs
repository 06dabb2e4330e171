//! The textual round-trip between the syntax tree and the symbolic engine.
//!
//! The engine never works on syntax-tree nodes directly: a node is rendered to canonical source
//! text, the text is parsed into a [`SymExpr`], the transform chain runs, and the result is
//! rendered and re-parsed into a fresh syntax-tree node. Working over freshly serialized text
//! keeps the two representations decoupled and makes the interop boundary a single fallible
//! operation: the only error channel is an expression the engine cannot represent, reported as
//! [`UnsupportedExpression`](kind::UnsupportedExpression) with the span of the original node.

use crate::error::{kind, Error};
use crate::symbolic::{expr::SymExpr, Unsupported};
use symfold_parser::{Parser, parser::{ast::expr::Expr as AstExpr, fmt::Render}};

/// Runs a syntax-tree expression through the symbolic engine and back.
///
/// Fails with `UnsupportedExpression` if the rendered node cannot be parsed into the engine's
/// arithmetic fragment, or if the transform chain itself reports [`Unsupported`].
pub fn roundtrip<F>(expr: &AstExpr, transform: F) -> Result<AstExpr, Error>
where
    F: FnOnce(SymExpr) -> Result<SymExpr, Unsupported>,
{
    let unsupported = || Error::new(vec![expr.span()], kind::UnsupportedExpression);

    let text = expr.to_source();
    let parsed = Parser::new(&text)
        .try_parse_full::<AstExpr>()
        .map_err(|_| unsupported())?;
    let sym = SymExpr::from_ast(&parsed).map_err(|_| unsupported())?;

    let transformed = transform(sym).map_err(|_| unsupported())?;

    let rendered = transformed.to_string();
    Parser::new(&rendered)
        .try_parse_full::<AstExpr>()
        .map_err(|_| unsupported())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parses a single expression from source text.
    fn parse(input: &str) -> AstExpr {
        Parser::new(input).try_parse_full::<AstExpr>().unwrap()
    }

    #[test]
    fn identity_round_trip() {
        let expr = parse("4 * (2 + 3)");
        let back = roundtrip(&expr, Ok).unwrap();
        assert_eq!(back.to_source(), "4 * (2 + 3)");
    }

    #[test]
    fn transform_output_is_reparsed() {
        let expr = parse("x");
        let back = roundtrip(&expr, |sym| {
            Ok(SymExpr::Exp(Box::new(sym), Box::new(SymExpr::from_ast(&parse("2")).unwrap())))
        }).unwrap();
        assert_eq!(back.to_source(), "x ** 2");
    }

    #[test]
    fn unsupported_content_fails() {
        let expr = parse("'hello' + 1");
        let err = roundtrip(&expr, Ok).unwrap_err();
        assert_eq!(err.spans, vec![expr.span()]);
    }

    #[test]
    fn transform_errors_surface() {
        let expr = parse("x + 1");
        assert!(roundtrip(&expr, |_| Err(Unsupported)).is_err());
    }
}
