//! Command-line interface for saxo.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::extract::Extractor;
use crate::parser::Saxo;
use crate::registry::HandlerNode;

/// Saxo - Declarative tag-tree event dispatch for XML documents.
#[derive(Parser)]
#[command(name = "saxo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the elements matching one or more path patterns.
    Extract {
        /// XML file to read
        file: PathBuf,

        /// Slash-separated element path, `*` matching any element (repeatable)
        #[arg(short, long = "pattern", required = true)]
        patterns: Vec<String>,

        /// Print this attribute instead of the element text
        #[arg(short, long)]
        attr: Option<String>,

        /// Keep whitespace in text exactly as written
        #[arg(long)]
        raw: bool,
    },

    /// Check that a file is well-formed XML.
    Check {
        /// XML file to read
        file: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            file,
            patterns,
            attr,
            raw,
        } => extract_command(&file, &patterns, attr.as_deref(), raw),
        Commands::Check { file } => check_command(&file),
    }
}

/// Execute the extract command.
fn extract_command(file: &Path, patterns: &[String], attr: Option<&str>, raw: bool) -> Result<()> {
    let options = if raw {
        ParseOptions::new()
            .with_trim_text(false)
            .with_normalize_whitespace(false)
    } else {
        ParseOptions::default()
    };

    // Validate patterns before touching the file
    let extractor = Extractor::with_options(patterns, options)?;
    let matches = extractor.extract_path(file)?;

    for found in &matches {
        let value = match attr {
            Some(name) => found.attributes.get(name).map(String::as_str),
            None => found.text.as_deref(),
        };
        // Elements without the requested value are listed but left blank
        println!("{}\t{}", style(&found.path).cyan(), value.unwrap_or_default());
    }

    eprintln!(
        "{} {} match(es) in {}",
        style("Found").bold(),
        style(matches.len()).green(),
        file.display()
    );

    Ok(())
}

/// Execute the check command.
fn check_command(file: &Path) -> Result<()> {
    let saxo: Saxo = Saxo::new(HandlerNode::new());
    saxo.parse_path(file)?;

    println!(
        "{} {}",
        style("Well-formed:").green().bold(),
        file.display()
    );

    Ok(())
}
