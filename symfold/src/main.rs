//! Optimize arithmetic (and optionally differentiate / integrate) in a symfold script, or in
//! every script under a directory.

mod error;
mod output;
mod process;

use anyhow::Context;
use clap::Parser as CliParser;
use output::{Console, InPlace, Output};
use process::process_file;
use std::{io, path::{Path, PathBuf}, process::ExitCode};
use symfold_rewrite::{Calculus, LineSet, Optimizer};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// The file extension of symfold scripts.
const EXTENSION: &str = "sym";

#[derive(Debug, CliParser)]
#[command(name = "symfold", about = "Optimize math (and optionally differentiate/integrate) in FILE or all .sym scripts under a directory")]
struct Cli {
    /// File or directory to process
    target: PathBuf,

    /// Enable the polynomial expand pass
    #[arg(long, overrides_with = "no_expand")]
    expand: bool,

    /// Disable the polynomial expand pass (the default)
    #[arg(long = "no-expand")]
    no_expand: bool,

    /// Variable names to differentiate
    #[arg(short = 'd', long = "differentiate", value_name = "NAME")]
    differentiate: Vec<String>,

    /// Variable names to integrate
    #[arg(short = 'i', long = "integrate", value_name = "NAME")]
    integrate: Vec<String>,

    /// Comma/range list of line numbers to filter diff/int, e.g. "2,5-7"
    #[arg(long = "diff-lines", value_name = "SPEC", default_value = "")]
    diff_lines: String,

    /// Overwrite source files in place
    #[arg(long)]
    inplace: bool,

    /// When target is a directory, recurse into subfolders
    #[arg(long)]
    recursive: bool,

    /// Show a unified diff instead of raw code (the default)
    #[arg(long, overrides_with = "no_diff")]
    diff: bool,

    /// Show the raw optimized code instead of a diff
    #[arg(long = "no-diff")]
    no_diff: bool,
}

/// Collects the files to process: the target itself, or every script under the target
/// directory, in sorted path order.
fn collect_paths(target: &Path, recursive: bool) -> anyhow::Result<Vec<PathBuf>> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    let depth = if recursive { usize::MAX } else { 1 };
    let mut paths = Vec::new();
    for entry in WalkDir::new(target).max_depth(depth) {
        let entry = entry.with_context(|| format!("failed to scan {}", target.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == EXTENSION)
        {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // a malformed line filter is fatal before any file is touched
    let lines = match LineSet::parse(&cli.diff_lines) {
        Ok(lines) => lines,
        Err(err) => {
            let _ = err.report_to_stderr("--diff-lines", &cli.diff_lines);
            return ExitCode::FAILURE;
        },
    };

    if !cli.target.exists() {
        eprintln!("symfold: target does not exist: {}", cli.target.display());
        return ExitCode::FAILURE;
    }

    let calculus = Calculus::new(
        cli.differentiate.into_iter().collect(),
        cli.integrate.into_iter().collect(),
        lines,
    );
    let optimizer = Optimizer::new(cli.expand);

    let paths = match collect_paths(&cli.target, cli.recursive) {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("symfold: {err:#}");
            return ExitCode::FAILURE;
        },
    };

    let mut sink: Box<dyn Output> = if cli.inplace {
        Box::new(InPlace { out: io::stdout() })
    } else {
        Box::new(Console { diff: !cli.no_diff, out: io::stdout() })
    };

    // no isolation between files: the first failure aborts the whole invocation
    for path in paths {
        if let Err(err) = process_file(&path, &calculus, &optimizer, sink.as_mut()) {
            err.report(&path);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["symfold", "scripts"]);
        assert!(!cli.expand);
        assert!(!cli.no_diff);
        assert!(!cli.inplace);
        assert!(!cli.recursive);
        assert!(cli.differentiate.is_empty());
        assert_eq!(cli.diff_lines, "");
    }

    #[test]
    fn cli_negating_flags() {
        let cli = Cli::parse_from(["symfold", "scripts", "--expand", "--no-expand"]);
        assert!(!cli.expand);

        let cli = Cli::parse_from(["symfold", "scripts", "--no-diff", "--diff"]);
        assert!(!cli.no_diff);

        let cli = Cli::parse_from(["symfold", "scripts", "--diff", "--no-diff"]);
        assert!(cli.no_diff);
    }

    #[test]
    fn cli_repeatable_variables() {
        let cli = Cli::parse_from(["symfold", "scripts", "-d", "x", "-d", "y", "-i", "z"]);
        assert_eq!(cli.differentiate, vec!["x", "y"]);
        assert_eq!(cli.integrate, vec!["z"]);
    }

    #[test]
    fn collects_scripts_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.sym"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("a.sym"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("ignored.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.sym"), "x = 1\n").unwrap();

        let flat = collect_paths(dir.path(), false).unwrap();
        let flat: Vec<_> = flat.iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(flat, vec!["a.sym", "b.sym"]);

        let nested = collect_paths(dir.path(), true).unwrap();
        assert_eq!(nested.len(), 3);
        assert!(nested.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
