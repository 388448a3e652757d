use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use log::{debug, info};
use parser::{DEFAULT_MAX_DEPTH, ParseError, ParseOptions, parse_nix_with};
use thiserror::Error;

/// How a parsed file is printed.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    /// The syntax tree, trivia included
    #[default]
    Debug,
    /// A compact s-expression outline without trivia
    Outline,
    /// The source text rebuilt from the tree
    Source,
}

#[derive(Parser, Debug)]
#[command(name = "nixcst")]
#[command(about = "Parse a Nix expression into a lossless syntax tree", long_about = None)]
struct Args {
    /// Input file, stdin if omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    #[arg(short, long, default_value = "debug")]
    format: Format,

    /// Maximum expression nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{name}: {source}")]
    Parse { name: String, source: ParseError },

    #[error("{name}: the tree does not reproduce the input")]
    RoundTrip { name: String },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let (name, buf) = match &args.file {
        Some(path) => (path.display().to_string(), fs::read(path)?),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            ("<stdin>".to_owned(), buf)
        }
    };
    info!("parsing {name} ({} bytes)", buf.len());

    let options = ParseOptions {
        max_depth: args.max_depth,
    };
    let root = parse_nix_with(&buf, options).map_err(|source| CliError::Parse {
        name: name.clone(),
        source,
    })?;

    match args.format {
        Format::Debug => println!("{root:#?}"),
        Format::Outline => println!("{}", root.outline()),
        Format::Source => {
            let rebuilt = root.to_string();
            if rebuilt.as_bytes() != buf.as_slice() {
                return Err(CliError::RoundTrip { name });
            }
            debug!("{name} round-trips");
            print!("{rebuilt}");
        }
    }
    Ok(())
}
