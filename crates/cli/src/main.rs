//! CLI tool for adding script text boxes to PowerPoint slides.

use anyhow::{Context, Result};
use clap::Parser;
use script_core::{parse_script, ConversionRequest, ScriptMapping, DEFAULT_OUTPUT_SUFFIX};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Add a text box with title and script text to each slide named in a script.
#[derive(Parser, Debug)]
#[command(name = "pptx-script")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PowerPoint file (.pptx)
    #[arg(required_unless_present = "preview")]
    input: Option<PathBuf>,

    /// Script file with [SLIDE N] blocks ("-" reads stdin)
    #[arg(short, long)]
    script: PathBuf,

    /// Output file (default: input name with the suffix, next to the input)
    #[arg(short, long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Suffix inserted before the .pptx extension of the output name
    #[arg(long, default_value = DEFAULT_OUTPUT_SUFFIX)]
    suffix: String,

    /// Print the parsed slides and exit without touching any presentation
    #[arg(short, long)]
    preview: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let script = read_script(&args.script)?;

    if args.preview {
        print!("{}", format_preview(&parse_script(&script)));
        return Ok(());
    }

    let input_path = args
        .input
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("An input .pptx file is required"))?;

    let archive = std::fs::read(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("presentation.pptx");

    let request = ConversionRequest::new(filename, script, archive);
    let output = script_pptx::convert(&request, &args.suffix)
        .map_err(|e| anyhow::anyhow!("Error processing {}: {}", input_path.display(), e))?;

    let output_path = get_output_path(
        input_path,
        &output.filename,
        args.output.as_ref(),
        args.output_dir.as_ref(),
    )?;
    write_output(&output_path, &output.archive)?;

    if args.verbose {
        eprintln!(
            "  Added text boxes to {} slides, skipped {}",
            output.report.patched.len(),
            output.report.skipped.len()
        );
        eprintln!("Written to: {}", output_path.display());
    }

    Ok(())
}

/// Read the script from a file, or from stdin when the path is "-".
fn read_script(path: &Path) -> Result<String> {
    let mut script = String::new();

    if path == Path::new("-") {
        io::stdin()
            .read_to_string(&mut script)
            .context("Failed to read script from stdin")?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut script))
            .with_context(|| format!("Failed to read script {}", path.display()))?;
    }

    Ok(script)
}

/// List parsed slides in slide order, one block per slide.
fn format_preview(mapping: &ScriptMapping) -> String {
    let mut out = format!("{} slides detected\n", mapping.len());

    for block in mapping.sorted() {
        out.push_str(&format!("\nSlide {}\n  {}\n", block.index, block.title));
        for line in block.body.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }

    out
}

/// Determine the output path for a generated presentation.
fn get_output_path(
    input_path: &Path,
    output_filename: &str,
    output_file: Option<&PathBuf>,
    output_dir: Option<&PathBuf>,
) -> Result<PathBuf> {
    if let Some(file) = output_file {
        return Ok(file.clone());
    }

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write the patched archive to a file.
fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
