use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use huffkit::{compress_with_stats, decompress, search_lines, suggest, COMMANDS};


#[derive(Debug, Parser)]
#[command(name = "huffkit", about = "Huffman text archives, pattern search and command suggestions")]
struct Cli {

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,

}


#[derive(Debug, Subcommand)]
enum Command {

    /// Compress a file into a textual Huffman archive
    Compress {
        input: PathBuf,
        output: PathBuf,
    },

    /// Restore the original content of an archive
    Decompress {
        input: PathBuf,

        /// Write the content to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List every occurrence of a pattern, line by line
    Search {
        file: PathBuf,
        pattern: String,
    },

    /// Suggest the closest known command for a mistyped one
    Suggest {
        token: String,
    },

}


fn init_logger(verbose: u8) {

    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}


fn main() -> Result<()> {

    let cli = Cli::parse();

    init_logger(cli.verbose);

    match cli.command {

        Command::Compress { input, output } => {

            let data = fs::read(&input)
                .with_context(|| format!("could not read {}", input.display()))?;

            let (archive, stats) = compress_with_stats(&data)
                .with_context(|| format!("could not compress {}", input.display()))?;

            fs::write(&output, archive)
                .with_context(|| format!("could not write {}", output.display()))?;

            println!("Original size: {} bytes\nArchive size: {} bytes\nPacked payload size: {} bytes\nDistinct symbols: {}",
                stats.original_len, stats.archive_len, stats.packed_payload_bytes(), stats.distinct_symbols);

            if let Some(ratio) = stats.archive_ratio() {
                println!("Archive ratio: {:.2}", ratio);
            }
        },

        Command::Decompress { input, output } => {

            let archive = fs::read_to_string(&input)
                .with_context(|| format!("could not read {}", input.display()))?;

            let content = decompress(&archive)
                .with_context(|| format!("could not decompress {}", input.display()))?;

            match output {
                Some(path) => fs::write(&path, content)
                    .with_context(|| format!("could not write {}", path.display()))?,
                None => io::stdout().write_all(&content)?,
            }
        },

        Command::Search { file, pattern } => {

            let text = fs::read(&file)
                .with_context(|| format!("could not read {}", file.display()))?;

            let report = search_lines(&text, pattern.as_bytes())?;

            if report.occurrences.is_empty() {
                println!("Pattern '{}' not found in '{}'", pattern, file.display());
            } else {
                println!("Pattern '{}' found:", pattern);
            }

            for found in &report.occurrences {
                println!("Line {}, Position {}", found.line, found.offset);
            }

            println!("\nMatches: {} in {} different lines", report.occurrences.len(), report.matched_lines);
            println!("Lines: {} | Text length: {} chars | Pattern length: {}",
                report.line_count, report.text_len, pattern.len());
        },

        Command::Suggest { token } => {

            if COMMANDS.iter().any(|&command| command == token) {
                println!("'{}' is a valid command", token);
                return Ok(());
            }

            match suggest(&token, COMMANDS) {
                Some(found) => println!("Unknown command '{}'. Did you mean '{}'?", token, found),
                None => bail!("no command to suggest for '{}'", token),
            }
        },

    }

    Ok(())
}
