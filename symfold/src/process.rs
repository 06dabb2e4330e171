//! The per-file pipeline: parse, calculus transform, re-render, re-parse, extract, optimize,
//! emit.

use crate::error::FileError;
use crate::output::Output;
use anyhow::Context;
use std::{fs, path::Path};
use symfold_parser::{Parser, parser::{ast::Script, fmt::Render}};
use symfold_rewrite::{extract, Calculus, Optimizer};
use tracing::debug;

/// Parses the given source, mapping failures to a [`FileError`] that reports against it.
fn parse(source: &str) -> Result<Script, FileError> {
    Parser::new(source)
        .try_parse_full::<Script>()
        .map_err(|err| FileError::Syntax { err, source: source.to_owned() })
}

/// Runs the whole pipeline over one file and emits the result through the given sink.
///
/// The optimizer deliberately operates on freshly re-rendered and re-parsed text, never on live
/// nodes from the calculus pass.
pub fn process_file(
    path: &Path,
    calculus: &Calculus,
    optimizer: &Optimizer,
    sink: &mut dyn Output,
) -> Result<(), FileError> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let script = parse(&source)?;
    let script = calculus.apply(script)
        .map_err(|err| FileError::Rewrite { err, source: source.clone() })?;

    // serialize and re-parse before the optimization passes
    let full_src = script.to_source();
    let script = parse(&full_src)?;

    let ops = extract::binary_ops(&script);
    debug!(path = %path.display(), count = ops.len(), "collected binary operation nodes");

    let script = optimizer.optimize(script)
        .map_err(|err| FileError::Rewrite { err, source: full_src.clone() })?;
    let optimized = script.to_source();

    sink.emit(path, &full_src, &optimized)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::output::{Console, InPlace};
    use std::collections::BTreeSet;
    use symfold_rewrite::LineSet;

    fn write_script(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.sym");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn names(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn optimizes_and_prints_raw() {
        let (_dir, path) = write_script("y = 4 * (2 + 3)\nprint('hello')\n");
        let mut sink = Console { diff: false, out: Vec::new() };
        process_file(&path, &Calculus::default(), &Optimizer::new(false), &mut sink).unwrap();
        assert_eq!(
            String::from_utf8(sink.out).unwrap(),
            "y = 20\nprint('hello')\n",
        );
    }

    #[test]
    fn calculus_runs_before_optimization() {
        let (_dir, path) = write_script("y = x ** 3\n");
        let calculus = Calculus::new(names(&["y"]), names(&[]), LineSet::empty());
        let mut sink = Console { diff: false, out: Vec::new() };
        process_file(&path, &calculus, &Optimizer::new(false), &mut sink).unwrap();

        // d(x^3)/dy is 0: the derivative is taken with respect to the assignment target
        assert_eq!(String::from_utf8(sink.out).unwrap(), "y = 0\n");
    }

    #[test]
    fn inplace_overwrites() {
        let (_dir, path) = write_script("a = (x + 2) * (x + 2)\n");
        let mut sink = InPlace { out: Vec::new() };
        process_file(&path, &Calculus::default(), &Optimizer::new(false), &mut sink).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a = (x + 2) ** 2\n");
    }

    #[test]
    fn diff_shows_both_renderings() {
        let (_dir, path) = write_script("y = 4*(2+3)\n");
        let mut sink = Console { diff: true, out: Vec::new() };
        process_file(&path, &Calculus::default(), &Optimizer::new(false), &mut sink).unwrap();

        let rendered = String::from_utf8(sink.out).unwrap();
        // the "from" side is the normalized re-rendering, not the raw file bytes
        assert!(rendered.contains("-y = 4 * (2 + 3)"));
        assert!(rendered.contains("+y = 20"));
    }

    #[test]
    fn syntax_errors_abort() {
        let (_dir, path) = write_script("y = (1 + \n");
        let mut sink = Console { diff: true, out: Vec::new() };
        let result = process_file(&path, &Calculus::default(), &Optimizer::new(false), &mut sink);
        assert!(matches!(result, Err(FileError::Syntax { .. })));
    }

    #[test]
    fn unsupported_expressions_abort() {
        let (_dir, path) = write_script("y = 'text' + 1\n");
        let mut sink = Console { diff: true, out: Vec::new() };
        let result = process_file(&path, &Calculus::default(), &Optimizer::new(false), &mut sink);
        assert!(matches!(result, Err(FileError::Rewrite { .. })));
    }
}
