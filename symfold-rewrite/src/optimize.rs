//! The optimization pipeline: rewrite every arithmetic binary node through the symbolic engine.

use crate::bridge;
use crate::error::Error;
use crate::symbolic::{factor::factor, simplify::{expand, simplify}};
use symfold_parser::parser::ast::{
    binary::{Binary, Compare},
    call::Call,
    expr::Expr,
    member::Attribute,
    paren::Paren,
    stmt::Stmt,
    tuple::Tuple,
    unary::Unary,
    Script,
    assign::Assign,
};
use tracing::debug;

/// Rewrites arithmetic binary nodes bottom-up through the symbolic transform chain:
/// simplify, factor, and (optionally) expand.
///
/// Everything that is not an arithmetic binary node passes through untouched; statement
/// structure is never changed.
#[derive(Debug, Clone, Copy)]
pub struct Optimizer {
    /// Whether to expand the factored result, distributing products and powers.
    expand: bool,
}

impl Optimizer {
    /// Creates an optimizer. With `expand` disabled the factored form is final; with it
    /// enabled, the factored result is fully multiplied out.
    pub fn new(expand: bool) -> Self {
        Self { expand }
    }

    /// Optimizes every arithmetic binary node of the script, returning the rewritten script.
    ///
    /// Fails with `UnsupportedExpression` on the first binary node whose rendered text the
    /// symbolic engine cannot represent.
    pub fn optimize(&self, script: Script) -> Result<Script, Error> {
        debug!(statements = script.stmts.len(), expand = self.expand, "optimizing script");

        let span = script.span.clone();
        let stmts = script.stmts.into_iter()
            .map(|stmt| self.optimize_stmt(stmt))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Script { stmts, span })
    }

    fn optimize_stmt(&self, stmt: Stmt) -> Result<Stmt, Error> {
        match stmt {
            Stmt::Assign(assign) => {
                let Assign { targets, value, line, span } = assign;
                let value = self.optimize_expr(value)?;
                Ok(Stmt::Assign(Assign { targets, value, line, span }))
            },
            Stmt::Expr(expr) => Ok(Stmt::Expr(self.optimize_expr(expr)?)),
        }
    }

    /// Rebuilds an expression with every arithmetic binary node optimized, children first.
    fn optimize_expr(&self, expr: Expr) -> Result<Expr, Error> {
        match expr {
            Expr::Literal(_) => Ok(expr),
            Expr::Paren(paren) => Ok(Expr::Paren(Paren {
                expr: Box::new(self.optimize_expr(*paren.expr)?),
                span: paren.span,
            })),
            Expr::Call(call) => Ok(Expr::Call(Call {
                target: Box::new(self.optimize_expr(*call.target)?),
                args: call.args.into_iter()
                    .map(|arg| self.optimize_expr(arg))
                    .collect::<Result<Vec<_>, _>>()?,
                span: call.span,
            })),
            Expr::Attribute(attr) => Ok(Expr::Attribute(Attribute {
                target: Box::new(self.optimize_expr(*attr.target)?),
                name: attr.name,
                span: attr.span,
            })),
            Expr::Tuple(tuple) => Ok(Expr::Tuple(Tuple {
                elements: tuple.elements.into_iter()
                    .map(|element| self.optimize_expr(element))
                    .collect::<Result<Vec<_>, _>>()?,
                span: tuple.span,
            })),
            Expr::Unary(unary) => Ok(Expr::Unary(Unary {
                op: unary.op,
                operand: Box::new(self.optimize_expr(*unary.operand)?),
                span: unary.span,
            })),
            Expr::Compare(compare) => Ok(Expr::Compare(Compare {
                lhs: Box::new(self.optimize_expr(*compare.lhs)?),
                op: compare.op,
                rhs: Box::new(self.optimize_expr(*compare.rhs)?),
                span: compare.span,
            })),
            Expr::Binary(binary) => {
                // children first, then the child-optimized node itself
                let node = Expr::Binary(Binary {
                    lhs: Box::new(self.optimize_expr(*binary.lhs)?),
                    op: binary.op,
                    rhs: Box::new(self.optimize_expr(*binary.rhs)?),
                    span: binary.span,
                });
                self.optimize_node(&node)
            },
        }
    }

    /// Runs a single binary node through the transform chain.
    fn optimize_node(&self, node: &Expr) -> Result<Expr, Error> {
        bridge::roundtrip(node, |sym| {
            let factored = factor(&simplify(&sym));
            Ok(if self.expand {
                expand(&factored)
            } else {
                factored
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use symfold_parser::{Parser, parser::fmt::Render};

    /// Parses, optimizes, and re-renders a script.
    fn optimized(source: &str, expand: bool) -> String {
        let script = Parser::new(source).try_parse_full::<Script>().unwrap();
        Optimizer::new(expand).optimize(script).unwrap().to_source()
    }

    #[test]
    fn constant_folding() {
        assert_eq!(optimized("y = 4 * (2 + 3)", false), "y = 20");
        assert_eq!(optimized("z = (1 + 2) * ((3 + 4) + 5)", false), "z = 36");
        assert_eq!(optimized("c = 5 - (2 + 3)", false), "c = 0");
        assert_eq!(optimized("result = 2 * (3 + (4 + 1))", false), "result = 16");
    }

    #[test]
    fn algebraic_collection() {
        assert_eq!(optimized("a = 2 * x + 2 * x", false), "a = 4 * x");
        assert_eq!(optimized("b = (x + 3) + (x + 3)", false), "b = 2 * (x + 3)");
    }

    #[test]
    fn factoring_without_expand() {
        assert_eq!(optimized("a = (x + 2) * (x + 2)", false), "a = (x + 2) ** 2");
        assert_eq!(optimized("b = (x - 1) * (2 * x + 2)", false), "b = 2 * (x - 1) * (x + 1)");
    }

    #[test]
    fn factoring_with_expand() {
        assert_eq!(optimized("a = (x + 2) * (x + 2)", true), "a = x ** 2 + 4 * x + 4");
        assert_eq!(optimized("b = (x - 1) * (2 * x + 2)", true), "b = 2 * x ** 2 - 2");
    }

    #[test]
    fn non_arithmetic_passes_through() {
        assert_eq!(optimized("print('hello')", false), "print('hello')");
        assert_eq!(optimized("x = y", false), "x = y");
        assert_eq!(optimized("obj.attr = f()", false), "obj.attr = f()");
    }

    #[test]
    fn operations_inside_other_nodes() {
        assert_eq!(optimized("print(2 + 3)", false), "print(5)");
        assert_eq!(optimized("a = x < 2 + 3", false), "a = x < 5");
        assert_eq!(optimized("a, b = 1 + 1, 2 + 2", false), "a, b = 2, 4");
        assert_eq!(optimized("y = -(2 + 3)", false), "y = -5");
    }

    #[test]
    fn calls_as_opaque_atoms() {
        assert_eq!(optimized("a = sin(x) + sin(x)", false), "a = 2 * sin(x)");
    }

    #[test]
    fn unsupported_content_is_fatal() {
        let script = Parser::new("a = 'x' + 1").try_parse_full::<Script>().unwrap();
        assert!(Optimizer::new(false).optimize(script).is_err());
    }

    #[test]
    fn optimizing_twice_is_stable() {
        for source in [
            "y = 4 * (2 + 3)",
            "a = (x + 2) * (x + 2)",
            "b = (x - 1) * (2 * x + 2)",
            "c = x ** 3 / 3",
        ] {
            let once = optimized(source, false);
            assert_eq!(optimized(&once, false), once);
        }
    }

    #[test]
    fn multiple_statements() {
        assert_eq!(
            optimized("y = 4 * (2 + 3)\nprint('hello')\nz = x + x", false),
            "y = 20\nprint('hello')\nz = 2 * x",
        );
    }
}
