use anyhow::{Context, Result, bail};
use clap::Parser;
use globset::Glob;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// CLI arguments for the esmify binary.
#[derive(Parser, Debug)]
#[command(name = "esmify", version, about = "Convert AMD modules to ES modules")]
struct Args {
    /// Input file; the converted source is written to stdout unless
    /// --replace is given.
    file: Option<PathBuf>,

    /// Directory of the source files.
    #[arg(long)]
    src: Option<PathBuf>,

    /// Directory of the destination files.
    #[arg(long)]
    dest: Option<PathBuf>,

    /// Glob pattern for files under --src (default `*.js`).
    #[arg(long)]
    glob: Option<String>,

    /// Set the glob pattern to `**/*.js` with no hassle.
    #[arg(long)]
    recursive: bool,

    /// Replace the input files with the results.
    #[arg(long)]
    replace: bool,

    /// Replace the suffix of the output files (e.g. `mjs`).
    #[arg(long)]
    suffix: Option<String>,

    /// Separate import/body/export sections with blank lines.
    #[arg(long)]
    beautify: bool,

    /// Print the parsed syntax tree as JSON and exit.
    #[arg(long = "dump-ast")]
    dump_ast: bool,
}

fn main() -> Result<()> {
    // Zero cost unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let options = esmify::Options {
        beautify: args.beautify,
    };

    if args.src.is_none() {
        let Some(file) = args.file.as_deref() else {
            bail!("please provide a file, or --src and --dest");
        };
        return convert_single_file(file, &args, &options);
    }

    if args.dest.is_none() && !args.replace {
        bail!("please provide --src and --dest");
    }
    convert_directory(&args, &options)
}

fn convert_single_file(file: &Path, args: &Args, options: &esmify::Options) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    if args.dump_ast {
        let module = esmify_parser::parse(&content)
            .map_err(|diagnostic| anyhow::anyhow!("{diagnostic}"))?;
        println!("{}", serde_json::to_string_pretty(&module.arena)?);
        return Ok(());
    }
    let compiled = esmify::convert(&content, options)
        .with_context(|| format!("failed to convert {}", file.display()))?;
    if args.replace {
        write_output(file, file, args.suffix.as_deref(), &compiled)?;
    } else {
        print!("{compiled}");
    }
    Ok(())
}

fn convert_directory(args: &Args, options: &esmify::Options) -> Result<()> {
    let src = args.src.as_deref().expect("checked by caller");
    let pattern = if args.recursive {
        "**/*.js".to_string()
    } else {
        args.glob.clone().unwrap_or_else(|| "*.js".to_string())
    };
    let matcher = Glob::new(&pattern)
        .with_context(|| format!("invalid glob pattern `{pattern}`"))?
        .compile_matcher();

    let mut converted = 0usize;
    for entry in WalkDir::new(src) {
        let entry = entry.context("failed to walk the source directory")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(src)
            .expect("walked entries live under src");
        if !matcher.is_match(relative) {
            continue;
        }
        let content = fs::read_to_string(entry.path())
            .with_context(|| format!("failed to read {}", entry.path().display()))?;
        let compiled = esmify::convert(&content, options)
            .with_context(|| format!("failed to convert {}", entry.path().display()))?;
        let dest = if args.replace {
            entry.path().to_path_buf()
        } else {
            args.dest.as_deref().expect("checked by caller").join(relative)
        };
        write_output(entry.path(), &dest, args.suffix.as_deref(), &compiled)?;
        converted += 1;
        tracing::debug!(file = %entry.path().display(), "converted");
    }
    tracing::info!(converted, "done");
    Ok(())
}

/// Write the converted source, applying the optional suffix rename. When the
/// suffix changes the name of an in-place conversion, the original file is
/// removed.
fn write_output(original: &Path, dest: &Path, suffix: Option<&str>, compiled: &str) -> Result<()> {
    let dest = match suffix {
        Some(suffix) => dest.with_extension(suffix),
        None => dest.to_path_buf(),
    };
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&dest, compiled)
        .with_context(|| format!("failed to write {}", dest.display()))?;
    if suffix.is_some() && dest != original && original.exists() {
        fs::remove_file(original)
            .with_context(|| format!("failed to remove {}", original.display()))?;
    }
    Ok(())
}
