use std::path::Path;

/// Packages the ways a single file can fail, together with the text the failure should be
/// reported against: parse errors and rewrite errors point into different renderings of the
/// source.
#[derive(Debug)]
pub enum FileError {
    /// The source (or the re-rendered source between passes) could not be parsed.
    Syntax {
        err: symfold_parser::parser::error::Error,
        source: String,
    },

    /// A rewrite pass rejected an expression.
    Rewrite {
        err: symfold_error::Error,
        source: String,
    },

    /// The file could not be read or written.
    Io(anyhow::Error),
}

impl FileError {
    /// Reports the error to stderr.
    ///
    /// The `ariadne` reports do not implement `Display`, so printing is the only option.
    pub fn report(&self, path: &Path) {
        let src_id = path.display().to_string();
        match self {
            Self::Syntax { err, source } => {
                let _ = err.report_to_stderr(&src_id, source);
            },
            Self::Rewrite { err, source } => {
                let _ = err.report_to_stderr(&src_id, source);
            },
            Self::Io(err) => eprintln!("symfold: {err:#}"),
        }
    }
}

impl From<anyhow::Error> for FileError {
    fn from(err: anyhow::Error) -> Self {
        Self::Io(err)
    }
}
