use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use rayon::prelude::*;
use serde_json::to_string_pretty;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use lexmatch::cli::{Cli, OutputFormat};
use lexmatch::report::{DocumentReport, format_matches, section_header, token_table};
use lexmatch::{Document, Match, Matcher, MatcherConfig, Vocab};

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.step_budget == 0 {
        bail!("--step-budget must be at least 1");
    }

    let documents = load_inputs(&cli)?;
    if documents.is_empty() {
        bail!("No documents to match: pass --doc or --text");
    }

    let matcher = init_matcher(&cli.pattern_file, cli.step_budget)?;
    info!(
        "Matching {} document(s) against {} pattern name(s)",
        documents.len(),
        matcher.len()
    );

    let results: Vec<Vec<Match>> = documents
        .par_iter()
        .enumerate()
        .map(|(n, doc)| {
            matcher
                .matches(doc)
                .with_context(|| format!("Matching failed for document {}", n + 1))
        })
        .collect::<Result<_>>()?;

    let rendered = match cli.format {
        OutputFormat::Text => render_text(&documents, &results, cli.explain),
        OutputFormat::Json => {
            let reports: Vec<DocumentReport> = documents
                .iter()
                .zip(&results)
                .map(|(doc, matches)| DocumentReport::new(matches, &matcher, doc))
                .collect();
            to_string_pretty(&reports).context("Failed to serialize matches")? + "\n"
        }
    };

    match &cli.output {
        Some(path) => {
            write_output(path, &rendered)?;
            println!("Output written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn load_inputs(cli: &Cli) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for path in &cli.docs {
        documents.extend(lexmatch::load_documents(path)?);
    }
    documents.extend(cli.text.iter().map(|text| lexmatch::tokenize(text)));
    Ok(documents)
}

fn init_matcher(pattern_file: &Path, step_budget: usize) -> Result<Matcher> {
    let patterns = lexmatch::load_pattern_set(pattern_file)?;
    let mut matcher = Matcher::with_config(Arc::new(Vocab::new()), MatcherConfig { step_budget });
    patterns.register(&mut matcher)?;
    Ok(matcher)
}

fn render_text(documents: &[Document], results: &[Vec<Match>], explain: bool) -> String {
    let mut out = String::new();
    for (n, (doc, matches)) in documents.iter().zip(results).enumerate() {
        out.push_str(&section_header(&format!("document {}", n + 1), 2));
        out.push_str(&doc.text());
        out.push_str("\n\n");
        if explain {
            out.push_str(&token_table(doc));
            out.push('\n');
        }
        out.push_str(&format_matches(matches, doc));
    }
    out
}

fn write_output(path: &Path, rendered: &str) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    file.write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write output file {}", path.display()))?;
    Ok(())
}
