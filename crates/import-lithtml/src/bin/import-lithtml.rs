//! import-lithtml CLI
//!
//! Runs the transform over template files on disk, the way a bundler would.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use import_lithtml::{ImportLitHtml, PluginOptions, TransformOutput};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "import-lithtml")]
#[command(about = "Wrap HTML templates in lit modules, importing the directives they use")]
#[command(version)]
struct Args {
    /// Template files to transform
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// JSON file with plugin options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Include pattern (repeatable); replaces the configured include
    #[arg(long, value_name = "GLOB")]
    include: Vec<String>,

    /// Exclude pattern (repeatable); replaces the configured exclude
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,

    /// Directive to consider (repeatable); replaces the configured list
    #[arg(long = "directive", value_name = "NAME")]
    directives: Vec<String>,

    /// Rebuild the directive catalog for every file
    #[arg(long)]
    no_cache: bool,

    /// Project root holding node_modules; patterns are relative to it
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Output directory for generated modules
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Print the host-facing JSON result instead of raw code
    #[arg(long)]
    json: bool,

    /// Report skipped and written files
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("import-lithtml failed: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let options = load_options(args)?;
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to read working directory")?,
    };
    let plugin = ImportLitHtml::with_root(options, &root)?;

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let mut written = 0;
    for input in &args.inputs {
        let code = fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let id = module_id(input)?;

        let Some(output) = plugin.transform(&code, &id) else {
            if args.verbose {
                eprintln!("Skipped: {}", input.display());
            }
            continue;
        };

        match &args.out_dir {
            Some(dir) => {
                let path = write_output(dir, input, &output, args.json)?;
                written += 1;
                if args.verbose {
                    println!("Wrote: {}", path.display());
                }
            }
            None => println!("{}", render(&output, args.json)?),
        }
    }

    if let Some(dir) = &args.out_dir {
        println!("Transformed {} file(s) into {}", written, dir.display());
    }

    Ok(())
}

/// Options from `--config`, overridden by any flags given.
fn load_options(args: &Args) -> Result<PluginOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            PluginOptions::from_json(&json)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => PluginOptions::default(),
    };

    if !args.include.is_empty() {
        options = options.include(args.include.clone());
    }
    if !args.exclude.is_empty() {
        options = options.exclude(args.exclude.clone());
    }
    if !args.directives.is_empty() {
        options = options.directives(args.directives.clone());
    }
    if args.no_cache {
        options = options.cache(false);
    }

    Ok(options)
}

/// Hosts hand the plugin absolute ids. The id names the file that was read,
/// whatever `--root` is.
fn module_id(input: &Path) -> Result<String> {
    let path = std::path::absolute(input)
        .with_context(|| format!("Failed to resolve {}", input.display()))?;
    Ok(path.to_string_lossy().into_owned())
}

fn render(output: &TransformOutput, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(output)?)
    } else {
        Ok(output.code.clone())
    }
}

fn write_output(dir: &Path, input: &Path, output: &TransformOutput, json: bool) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .with_context(|| format!("No file name in {}", input.display()))?;
    let extension = if json { "json" } else { "js" };
    let path = dir.join(format!("{}.{}", file_name.to_string_lossy(), extension));

    fs::write(&path, render(output, json)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
