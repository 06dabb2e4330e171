//! Enumeration of the arithmetic binary nodes of a script.
//!
//! This pass exists for diagnostics and testing: it rewrites nothing, and nothing downstream
//! depends on its output.

use symfold_parser::parser::ast::{expr::Expr, stmt::Stmt, Script, binary::Binary};

/// Collects references to every arithmetic binary node in the script, in parent-before-child,
/// left-to-right order.
pub fn binary_ops(script: &Script) -> Vec<&Binary> {
    let mut out = Vec::new();
    for stmt in &script.stmts {
        match stmt {
            Stmt::Assign(assign) => walk(&assign.value, &mut out),
            Stmt::Expr(expr) => walk(expr, &mut out),
        }
    }
    out
}

fn walk<'a>(expr: &'a Expr, out: &mut Vec<&'a Binary>) {
    if let Expr::Binary(binary) = expr {
        out.push(binary);
    }

    match expr {
        Expr::Literal(_) => {},
        Expr::Paren(paren) => walk(&paren.expr, out),
        Expr::Call(call) => {
            walk(&call.target, out);
            for arg in &call.args {
                walk(arg, out);
            }
        },
        Expr::Attribute(attr) => walk(&attr.target, out),
        Expr::Tuple(tuple) => {
            for element in &tuple.elements {
                walk(element, out);
            }
        },
        Expr::Unary(unary) => walk(&unary.operand, out),
        Expr::Binary(binary) => {
            walk(&binary.lhs, out);
            walk(&binary.rhs, out);
        },
        Expr::Compare(compare) => {
            walk(&compare.lhs, out);
            walk(&compare.rhs, out);
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use symfold_parser::{Parser, parser::fmt::Render};

    fn parse(source: &str) -> Script {
        Parser::new(source).try_parse_full::<Script>().unwrap()
    }

    #[test]
    fn parent_before_child_order() {
        let script = parse("y = 4 * (2 + 3)");
        let ops = binary_ops(&script);
        let rendered = ops.iter().map(|op| op.to_source()).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["4 * (2 + 3)", "2 + 3"]);
    }

    #[test]
    fn finds_operations_in_every_position() {
        let script = parse("f(1 + 2, g(3 * 4))\na = x < 5 + 6\nb, c = 7 + 8, 9");
        let ops = binary_ops(&script);
        let rendered = ops.iter().map(|op| op.to_source()).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["1 + 2", "3 * 4", "5 + 6", "7 + 8"]);
    }

    #[test]
    fn no_operations() {
        let script = parse("print('hello')\nx = y");
        assert!(binary_ops(&script).is_empty());
    }

    #[test]
    fn enumeration_does_not_change_the_tree() {
        let script = parse("z = (1 + 2) * 3");
        let before = script.to_source();
        let _ = binary_ops(&script);
        assert_eq!(script.to_source(), before);
    }
}
