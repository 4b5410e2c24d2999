// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Handlers for every subcommand except `inspect`.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use sphindex::{
    dump_index, load_index, read_index, run_build, stemmer, verify, BuildOptions, Error,
    ResultKind, Scorer, Searcher, WellFormedIndex,
};

use super::display::{
    self, error, format_size, kind_badge, kv_row, ok, row, score_value, section_bot,
    section_mid, section_top, styled, themed, warning, BOLD, CYAN, DIM, GRAY,
};

pub fn verify_file(file: &Path, strict: bool) -> Result<ExitCode> {
    let index = read_index(file).with_context(|| format!("cannot load {}", file.display()))?;
    let report = verify(&index);

    for err in &report.errors {
        println!("{}", error(&err.to_string()));
    }
    for warn in &report.warnings {
        println!("{}", warning(&warn.to_string()));
    }

    let failed = !report.is_ok() || (strict && !report.is_clean());
    let summary = format!(
        "{}: {} error(s), {} warning(s)",
        file.display(),
        report.errors.len(),
        report.warnings.len()
    );
    if failed {
        println!("{}", error(&summary));
        Ok(ExitCode::FAILURE)
    } else {
        println!("{}", ok(&summary));
        Ok(ExitCode::SUCCESS)
    }
}

pub fn search_file(
    file: &Path,
    query: &str,
    limit: usize,
    scorer: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let index = read_index(file).with_context(|| format!("cannot load {}", file.display()))?;
    let index = WellFormedIndex::new(index)
        .map_err(Error::Invalid)
        .with_context(|| format!("{} is not searchable", file.display()))?;
    let scorer = match scorer {
        Some(path) => Scorer::from_json_file(path)?,
        None => Scorer::default(),
    };

    let results = Searcher::new(&index).with_scorer(scorer).search(query, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(ExitCode::SUCCESS);
    }

    section_top("SEARCH");
    kv_row("query", &themed(CYAN, &[BOLD], query));
    kv_row("results", &results.len().to_string());
    if results.is_empty() {
        section_mid("RESULTS");
        row(&format!("  {}", styled(&[DIM], "no matches")));
        section_bot();
        return Ok(ExitCode::SUCCESS);
    }

    section_mid("RESULTS");
    for (rank, hit) in results.results.iter().enumerate() {
        let kind = match hit.kind {
            ResultKind::Object => "object",
            ResultKind::Text => "text",
        };
        row(&format!(
            "  {:>2}. {} {}  {}",
            rank + 1,
            score_value(hit.score),
            kind_badge(kind),
            styled(&[BOLD], &display::truncate(&hit.title, 52)),
        ));
        row(&format!(
            "              {}",
            themed(GRAY, &[], &display::truncate(&hit.link(), 60))
        ));
        if let Some(description) = &hit.description {
            row(&format!(
                "              {}",
                styled(&[DIM], &display::truncate(description, 60))
            ));
        }
    }
    section_bot();
    Ok(ExitCode::SUCCESS)
}

pub fn build(input: &Path, output: &Path, incremental: bool) -> Result<ExitCode> {
    let options = BuildOptions {
        incremental,
        progress: display::stderr_is_tty(),
    };
    let summary = run_build(input, output, options)
        .with_context(|| format!("build from {} failed", input.display()))?;

    section_top("BUILD");
    kv_row("output", &summary.output.display().to_string());
    kv_row("documents", &summary.documents.to_string());
    kv_row("re-indexed", &summary.fed.to_string());
    if incremental {
        kv_row("carried over", &summary.kept.to_string());
    }
    kv_row("terms", &summary.terms.to_string());
    kv_row("title terms", &summary.titleterms.to_string());
    kv_row("objects", &summary.objects.to_string());
    kv_row("size", &format_size(summary.bytes));
    section_bot();
    Ok(ExitCode::SUCCESS)
}

pub fn fmt(file: &Path, output: Option<&Path>, check: bool) -> Result<ExitCode> {
    let original =
        fs::read_to_string(file).with_context(|| format!("cannot read {}", file.display()))?;
    let index = load_index(&original).with_context(|| format!("cannot parse {}", file.display()))?;
    let canonical = dump_index(&index)?;

    if check {
        return if canonical == original {
            println!("{}", ok(&format!("{} is canonical", file.display())));
            Ok(ExitCode::SUCCESS)
        } else {
            println!("{}", error(&format!("{} would be reformatted", file.display())));
            Ok(ExitCode::FAILURE)
        };
    }

    let target = output.unwrap_or(file);
    fs::write(target, &canonical).with_context(|| format!("cannot write {}", target.display()))?;
    println!(
        "{}",
        ok(&format!(
            "wrote {} ({})",
            target.display(),
            format_size(canonical.len())
        ))
    );
    Ok(ExitCode::SUCCESS)
}

pub fn stem(words: &[String]) -> Result<ExitCode> {
    for word in words {
        println!("{}\t{}", word, stemmer::stem(word));
    }
    Ok(ExitCode::SUCCESS)
}
