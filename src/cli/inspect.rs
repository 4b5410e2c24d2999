// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `sphindex inspect`: a boxed report on one search index.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use crc32fast::Hasher as Crc32Hasher;
use sphindex::{dump_index, load_index, verify, EnvVersion, IndexStats};

use super::display::{
    error, format_size, kv_row, ok, pad_left, pad_right, row, savings, section_bot, section_mid,
    section_top, styled, themed, title, warning, BOLD, CYAN, DIM, YELLOW,
};

/// Quality 11 with a 4 MiB window, what static file servers use for
/// precompressed assets.
fn brotli_size(data: &[u8]) -> Result<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder.write_all(data).context("brotli compression failed")?;
    }
    Ok(compressed.len())
}

fn crc32(data: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// One `(label, value)` row per envversion entry.
fn envversion_rows(envversion: &EnvVersion) -> Vec<(String, String)> {
    match envversion {
        EnvVersion::Legacy(version) => {
            vec![("envversion".to_string(), format!("{} (legacy)", version))]
        }
        EnvVersion::Domains(domains) if domains.is_empty() => {
            vec![("envversion".to_string(), "-".to_string())]
        }
        EnvVersion::Domains(domains) => domains
            .iter()
            .map(|(domain, version)| (format!("envversion {}", domain), version.to_string()))
            .collect(),
    }
}

fn term_rows(terms: &[(String, usize)], doc_count: usize) {
    if terms.is_empty() {
        row(&format!("  {}", styled(&[DIM], "none")));
        return;
    }
    let widest = terms.iter().map(|(t, _)| t.chars().count()).max().unwrap_or(0).min(40);
    for (term, count) in terms {
        let share = if doc_count == 0 {
            0.0
        } else {
            *count as f64 * 100.0 / doc_count as f64
        };
        row(&format!(
            "  {}  {} {}",
            pad_right(&themed(YELLOW, &[], term), widest),
            pad_left(&count.to_string(), 6),
            styled(&[DIM], &format!("pages ({:.0}%)", share)),
        ));
    }
}

pub fn inspect_file(file: &Path, top: usize) -> Result<ExitCode> {
    let bytes = fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let text = std::str::from_utf8(&bytes)
        .with_context(|| format!("{} is not UTF-8", file.display()))?;
    let index = load_index(text).with_context(|| format!("cannot parse {}", file.display()))?;
    let stats = IndexStats::compute(&index, top)?;
    let report = verify(&index);

    title(&format!("SPHINX SEARCH INDEX: {}", file.display()));

    section_top("FILE");
    kv_row("size", &format_size(bytes.len()));
    kv_row("brotli", &savings(bytes.len(), brotli_size(&bytes)?));
    kv_row("crc32", &format!("{:08x}", crc32(&bytes)));
    let canonical = if dump_index(&index)? == text {
        ok("yes")
    } else {
        warning(&format!("no (canonical form is {})", format_size(stats.serialized_bytes)))
    };
    kv_row("canonical", &canonical);
    for (label, value) in envversion_rows(&index.envversion) {
        kv_row(&label, &value);
    }

    section_mid("CONTENTS");
    kv_row("pages", &stats.documents.to_string());
    kv_row("terms", &stats.terms.to_string());
    kv_row("title terms", &stats.titleterms.to_string());
    kv_row("postings", &stats.postings.to_string());
    kv_row("objects", &stats.objects.to_string());
    if !stats.extra_fields.is_empty() {
        kv_row("other fields", &stats.extra_fields.join(", "));
    }

    if !stats.objects_by_type.is_empty() {
        section_mid("OBJECT TYPES");
        for (label, count) in &stats.objects_by_type {
            kv_row(label, &count.to_string());
        }
    }

    section_mid("TOP TERMS");
    term_rows(&stats.top_terms, stats.documents);
    section_mid("TOP TITLE TERMS");
    term_rows(&stats.top_titleterms, stats.documents);

    section_mid("VERIFICATION");
    let summary = format!(
        "{} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    );
    let headline = if !report.is_ok() {
        error(&summary)
    } else if !report.is_clean() {
        warning(&summary)
    } else {
        ok(&summary)
    };
    row(&format!("  {}", headline));
    for err in report.errors.iter().take(top) {
        row(&format!("    {}", styled(&[BOLD], &err.to_string())));
    }
    for warn in report.warnings.iter().take(top) {
        row(&format!("    {}", themed(CYAN, &[], &warn.to_string())));
    }
    let shown = report.errors.len().min(top) + report.warnings.len().min(top);
    let total = report.errors.len() + report.warnings.len();
    if total > shown {
        row(&format!(
            "    {}",
            styled(&[DIM], &format!("... {} more (run `sphindex verify`)", total - shown))
        ));
    }
    section_bot();

    Ok(if report.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
