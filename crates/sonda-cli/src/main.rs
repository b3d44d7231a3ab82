// SPDX-License-Identifier: MIT OR Apache-2.0
//! sonda CLI binary - inspect structured documents from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sonda_core::Encoding;
use sonda_inspect::{Inspector, Registry, Unmarshalled, VectorInspector};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sonda")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input encoding: json, xml, url or hal
    #[arg(short, long, global = true, default_value = "json")]
    encoding: Encoding,

    /// Path segment separator
    #[arg(long, global = true, default_value = ".")]
    sep: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for sonda CLI
#[derive(Subcommand)]
enum Commands {
    /// Describe the value at a path
    Get {
        /// Separated path, empty for the root
        path: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Compare the value at a path against an operand
    Cmp {
        /// Separated path
        path: String,
        /// Operator: == != > >= < <= (or eq ne gt ge lt le)
        op: String,
        /// Right-hand operand
        operand: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Print key and value of each child of a container
    Loop {
        /// Separated path
        path: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
        /// Stop after this many children
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Print the child count at a path
    Len {
        /// Separated path
        path: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// Check two documents for structural equality
    Eq {
        /// First document
        file1: PathBuf,
        /// Second document
        file2: PathBuf,
        /// Dotted path to ignore; repeatable
        #[arg(long)]
        exclude: Vec<String>,
    },
    /// Print the raw bytes of the value at a path
    Bytes {
        /// Separated path
        path: String,
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut registry = Registry::new();
    sonda_inspect::init(&mut registry);

    if let Err(e) = run(&args, &registry) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(default: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args, registry: &Registry) -> Result<()> {
    let ins = VectorInspector::new();
    let sep = args.sep.as_str();
    match &args.command {
        Commands::Get { path, input } => {
            let doc = read_doc(&ins, input.as_ref(), args.encoding)?;
            let out = sonda_cli::get(&ins, &doc, path, sep)?;
            write_output(args.output.as_ref(), format!("{out}\n").as_bytes())
        }
        Commands::Cmp {
            path,
            op,
            operand,
            input,
        } => {
            let doc = read_doc(&ins, input.as_ref(), args.encoding)?;
            let result = sonda_cli::cmp(&ins, &doc, path, sep, op, operand)?;
            write_output(args.output.as_ref(), format!("{result}\n").as_bytes())
        }
        Commands::Loop { path, input, limit } => {
            let doc = read_doc(&ins, input.as_ref(), args.encoding)?;
            let out = sonda_cli::loop_lines(&ins, &doc, path, sep, *limit)?;
            write_output(args.output.as_ref(), out.as_bytes())
        }
        Commands::Len { path, input } => {
            let doc = read_doc(&ins, input.as_ref(), args.encoding)?;
            let n = sonda_cli::len(&ins, &doc, path, sep)?;
            write_output(args.output.as_ref(), format!("{n}\n").as_bytes())
        }
        Commands::Eq {
            file1,
            file2,
            exclude,
        } => {
            let a = read_doc(&ins, Some(file1), args.encoding)?;
            let b = read_doc(&ins, Some(file2), args.encoding)?;
            let equal = sonda_cli::eq(&ins, &a, &b, exclude);
            write_output(args.output.as_ref(), format!("{equal}\n").as_bytes())
        }
        Commands::Bytes { path, input } => {
            let doc = read_doc(&ins, input.as_ref(), args.encoding)?;
            let out = sonda_cli::bytes(registry, &doc, path, sep)?;
            write_output(args.output.as_ref(), &out)
        }
    }
}

fn read_doc(ins: &dyn Inspector, path: Option<&PathBuf>, encoding: Encoding) -> Result<Unmarshalled> {
    let input = read_input(path)?;
    sonda_cli::load(ins, &input, encoding)
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    if let Some(p) = path {
        fs::read(p).with_context(|| format!("failed to read {}", p.display()))
    } else {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read stdin")?;
        Ok(input)
    }
}

fn write_output(path: Option<&PathBuf>, output: &[u8]) -> Result<()> {
    if let Some(p) = path {
        fs::write(p, output).with_context(|| format!("failed to write {}", p.display()))
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(output)?;
        Ok(())
    }
}
