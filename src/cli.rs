use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::matcher::DEFAULT_STEP_BUDGET;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pattern file (JSON, or YAML with a .yml/.yaml extension)
    pub pattern_file: PathBuf,

    /// Annotated document file (JSON object or array of objects); repeatable
    #[arg(short, long = "doc")]
    pub docs: Vec<PathBuf>,

    /// Raw text to match after blank tokenization; repeatable
    #[arg(short, long)]
    pub text: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Walker states allowed per match attempt
    #[arg(long, default_value_t = DEFAULT_STEP_BUDGET)]
    pub step_budget: usize,

    /// Print a token table with label descriptions before the matches
    #[arg(long)]
    pub explain: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
