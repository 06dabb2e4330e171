//! Output sinks for processed files.
//!
//! The per-file pipeline writes its result through an explicit [`Output`] value supplied by the
//! caller, rather than printing on its own; tests swap in a buffer.

use anyhow::Context;
use similar::TextDiff;
use std::{fs, io::Write, path::Path};

/// A destination for the result of processing one file.
pub trait Output {
    /// Emits the result for `path`: `original` is the pre-optimization rendering, `optimized`
    /// the final one.
    fn emit(&mut self, path: &Path, original: &str, optimized: &str) -> anyhow::Result<()>;
}

/// Overwrites each processed file with its optimized text, printing a one-line confirmation.
pub struct InPlace<W> {
    pub out: W,
}

impl<W: Write> Output for InPlace<W> {
    fn emit(&mut self, path: &Path, _original: &str, optimized: &str) -> anyhow::Result<()> {
        let mut text = optimized.to_owned();
        text.push('\n');
        fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        writeln!(self.out, "updated: {}", path.display())
            .context("failed to write to output")
    }
}

/// Prints each processed file to the writer: a unified diff against the pre-optimization text,
/// or the raw optimized source.
pub struct Console<W> {
    pub diff: bool,
    pub out: W,
}

impl<W: Write> Output for Console<W> {
    fn emit(&mut self, path: &Path, original: &str, optimized: &str) -> anyhow::Result<()> {
        if self.diff {
            if original == optimized {
                writeln!(self.out, "{}: no changes", path.display())
                    .context("failed to write to output")?;
            } else {
                let diff = TextDiff::from_lines(original, optimized);
                let rendered = diff.unified_diff()
                    .header(&path.display().to_string(), "optimized")
                    .to_string();
                write!(self.out, "{}", rendered).context("failed to write to output")?;
            }
        } else {
            writeln!(self.out, "{}", optimized).context("failed to write to output")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use std::path::PathBuf;

    fn emit_console(diff: bool, original: &str, optimized: &str) -> String {
        let mut sink = Console { diff, out: Vec::new() };
        sink.emit(&PathBuf::from("demo.sym"), original, optimized).unwrap();
        String::from_utf8(sink.out).unwrap()
    }

    #[test]
    fn raw_output() {
        assert_eq!(emit_console(false, "y = 4 * (2 + 3)", "y = 20"), "y = 20\n");
    }

    #[test]
    fn diff_output() {
        let rendered = emit_console(true, "y = 4 * (2 + 3)\nz = x\n", "y = 20\nz = x\n");
        assert!(rendered.starts_with("--- demo.sym\n+++ optimized\n"));
        assert!(rendered.contains("-y = 4 * (2 + 3)"));
        assert!(rendered.contains("+y = 20"));
        assert!(rendered.contains(" z = x"));
    }

    #[test]
    fn diff_with_no_changes() {
        assert_eq!(emit_console(true, "z = x\n", "z = x\n"), "demo.sym: no changes\n");
    }

    #[test]
    fn inplace_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.sym");
        fs::write(&path, "y = 4 * (2 + 3)\n").unwrap();

        let mut sink = InPlace { out: Vec::new() };
        sink.emit(&path, "y = 4 * (2 + 3)", "y = 20").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "y = 20\n");
        assert_eq!(
            String::from_utf8(sink.out).unwrap(),
            format!("updated: {}\n", path.display()),
        );
    }
}
