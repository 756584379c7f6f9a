//! decjson CLI.
//!
//! Small front end over the library: validate JSON files, reformat them
//! without disturbing numeric literals, and dump token streams.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use decjson::{JsonReader, JsonWriter, TokenKind, WriteOptions};

#[derive(Parser)]
#[command(name = "decjson")]
#[command(about = "JSON toolkit with lossless numeric literals", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON file, reporting the first error with its position
    Check {
        /// Path to the JSON file
        path: PathBuf,
    },

    /// Re-emit a JSON file, preserving numeric literals byte for byte
    Fmt {
        /// Path to the JSON file
        path: PathBuf,
        /// Emit compact output instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Dump the token stream of a JSON file
    Tokens {
        /// Path to the JSON file
        path: PathBuf,
        /// Emit the dump as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}

/// One row of the `tokens --json` dump.
#[derive(Serialize)]
struct TokenRecord {
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    line: u64,
    column: u64,
}

fn open(path: &PathBuf) -> io::Result<JsonReader<decjson::ByteSource<BufReader<File>>>> {
    Ok(JsonReader::from_seekable(BufReader::new(File::open(path)?)))
}

fn check(path: &PathBuf) -> Result<(), String> {
    let mut reader = open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut tokens = 0u64;
    loop {
        match reader.read_next() {
            Ok(true) => tokens += 1,
            Ok(false) => break,
            Err(e) => return Err(format!("{}: {e}", path.display())),
        }
    }
    println!("{}: OK ({tokens} tokens)", path.display());
    Ok(())
}

fn fmt(path: &PathBuf, compact: bool) -> Result<(), String> {
    let mut reader = open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let options = if compact {
        WriteOptions::compact()
    } else {
        WriteOptions::pretty()
    };
    let stdout = io::stdout();
    let mut writer = JsonWriter::with_options(BufWriter::new(stdout.lock()), options);
    let mut any = false;
    loop {
        match reader.read_next() {
            Ok(true) => {
                any = true;
                reader
                    .copy_value_to(&mut writer)
                    .map_err(|e| format!("{}: {e}", path.display()))?;
            }
            Ok(false) => break,
            Err(e) => return Err(format!("{}: {e}", path.display())),
        }
    }
    let mut out = writer
        .finish()
        .map_err(|e| format!("{}: {e}", path.display()))?;
    if any {
        let _ = out.write_all(b"\n");
    }
    let _ = out.flush();
    Ok(())
}

fn tokens(path: &PathBuf, as_json: bool) -> Result<(), String> {
    let mut reader = open(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let mut records = Vec::new();
    loop {
        let line = reader.line();
        let column = reader.column();
        match reader.read_next() {
            Ok(true) => {
                let text = match reader.kind() {
                    TokenKind::Bool => reader.as_bool().ok().map(|b| b.to_string()),
                    TokenKind::String | TokenKind::PropertyName => {
                        reader.as_str().ok().map(str::to_string)
                    }
                    TokenKind::Number => reader
                        .as_number()
                        .ok()
                        .map(|(value, format)| value.format(&format)),
                    _ => None,
                };
                records.push(TokenRecord {
                    kind: format!("{:?}", reader.kind()),
                    text,
                    line,
                    column,
                });
            }
            Ok(false) => break,
            Err(e) => return Err(format!("{}: {e}", path.display())),
        }
    }
    if as_json {
        match serde_json::to_string_pretty(&records) {
            Ok(dump) => println!("{dump}"),
            Err(e) => return Err(e.to_string()),
        }
    } else {
        for record in &records {
            match &record.text {
                Some(text) => println!(
                    "{}:{}\t{}\t{}",
                    record.line, record.column, record.kind, text
                ),
                None => println!("{}:{}\t{}", record.line, record.column, record.kind),
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Check { path } => check(path),
        Commands::Fmt { path, compact } => fmt(path, *compact),
        Commands::Tokens { path, json } => tokens(path, *json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
