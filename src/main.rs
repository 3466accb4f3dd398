//! npdoc — generate missing NumPy-style docstring stubs in Python files.
//!
//! Three modes:
//!
//! - **stdin mode**: `npdoc < file.py > documented.py`
//! - **file mode**: `npdoc a.py b.py` — rewrites each file in place,
//!   keeping an `a.py--` backup
//! - **dir mode**: `npdoc --dir src/` — recursively processes every
//!   `*.py` file under the directory

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the backup copy written before overwriting.
const BACKUP_SUFFIX: &str = "--";

#[derive(Parser)]
#[command(
    name = "npdoc",
    about = "Generate missing NumPy-style docstring stubs in Python source files"
)]
struct Cli {
    /// Input files, rewritten in place. If omitted (and --dir is not
    /// given), reads from stdin and writes to stdout.
    files: Vec<PathBuf>,

    /// Directory to process recursively (every *.py file under it)
    #[arg(short = 'd', long)]
    dir: Option<PathBuf>,

    /// How many indentation spaces the source uses
    #[arg(long, default_value_t = npdoc::INDENTATION_SPACES)]
    indentation_spaces: usize,

    /// Don't write backup copies alongside rewritten files
    #[arg(long)]
    no_backup: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.files.is_empty() && cli.dir.is_none() {
        return stdin_mode(&cli);
    }

    let mut files = cli.files.clone();
    if let Some(ref dir) = cli.dir {
        files.extend(collect_python_files(dir)?);
    }
    for path in &files {
        if let Err(err) = process_in_place(path, &cli) {
            eprintln!("warning: skipping {}: {}", path.display(), err);
        }
    }
    Ok(())
}

/// stdin mode: read one file's content, write the processed content to
/// stdout. A parse failure is fatal here — there is no file to skip.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    let output = npdoc::process_file(&input, cli.indentation_spaces)?;
    io::stdout()
        .write_all(output.as_bytes())
        .context("failed to write stdout")?;
    Ok(())
}

/// Rewrite one file in place, printing the processed path. The original
/// content goes to a `<path>--` backup first unless --no-backup is set.
fn process_in_place(path: &Path, cli: &Cli) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let processed = npdoc::process_file(&content, cli.indentation_spaces)?;
    if !cli.no_backup {
        let backup = backup_path(path);
        fs::write(&backup, &content)
            .with_context(|| format!("failed to write backup {}", backup.display()))?;
    }
    fs::write(path, &processed).with_context(|| format!("failed to write {}", path.display()))?;
    println!("processed {}", path.display());
    Ok(())
}

/// `src/app.py` → `src/app.py--`
fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Every `*.py` file under `dir`, recursively, sorted for a
/// deterministic processing order.
fn collect_python_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("unknown directory: {}", dir.display());
    }
    let pattern = dir.join("**").join("*.py");
    let pattern = pattern.to_string_lossy().into_owned();
    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("invalid glob pattern: {pattern}"))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_keeps_the_full_name() {
        assert_eq!(
            backup_path(Path::new("src/app.py")),
            PathBuf::from("src/app.py--")
        );
    }

    #[test]
    fn backup_of_extensionless_path() {
        assert_eq!(backup_path(Path::new("script")), PathBuf::from("script--"));
    }
}
