//! Error kinds raised by the rewrite passes.

pub use symfold_error::Error;

pub mod kind {
    use symfold_attrs::ErrorKind;
    use symfold_error::ErrorKind;

    /// An expression is outside the symbolic engine's arithmetic fragment.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "unsupported expression",
        labels = ["this expression cannot be rewritten symbolically"],
        help = "only arithmetic over numbers, names, and calls can be transformed",
    )]
    pub struct UnsupportedExpression;

    /// A token of a `--diff-lines` filter is not an integer or an inclusive range.
    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = "malformed line filter",
        labels = ["this is not a line number or range"],
        help = "use comma-separated integers and inclusive ranges, like `2,5-7`",
    )]
    pub struct InvalidLineSpec;
}
