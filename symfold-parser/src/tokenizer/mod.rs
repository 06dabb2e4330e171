pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn power_and_float() {
        compare_tokens(
            "y = x ** 2.5",
            [
                (TokenKind::Name, "y"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Assign, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Pow, "**"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Float, "2.5"),
            ],
        );
    }

    #[test]
    fn call_with_string() {
        compare_tokens(
            "print('hello')",
            [
                (TokenKind::Name, "print"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Str, "'hello'"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }

    #[test]
    fn comments_and_lines() {
        compare_tokens(
            "x = 1 # one\ny = 2",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Assign, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Comment, "# one"),
                (TokenKind::NewLine, "\n"),
                (TokenKind::Name, "y"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Assign, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "2"),
            ],
        );
    }

    #[test]
    fn comparisons() {
        compare_tokens(
            "a == b != c <= d >= e",
            [
                (TokenKind::Name, "a"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Eq, "=="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "b"),
                (TokenKind::Whitespace, " "),
                (TokenKind::NotEq, "!="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "c"),
                (TokenKind::Whitespace, " "),
                (TokenKind::LessEq, "<="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "d"),
                (TokenKind::Whitespace, " "),
                (TokenKind::GreaterEq, ">="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "e"),
            ],
        );
    }

    #[test]
    fn garbage_symbol() {
        compare_tokens(
            "3 $ x",
            [
                (TokenKind::Int, "3"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x"),
            ],
        );
    }
}
