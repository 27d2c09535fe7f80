// WHY: corpus runs aggregate one document at a time so memory stays bounded by the
// largest file rather than the folder

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};

use crate::abbreviation::{AbbreviationConfig, AbbreviationEngine, AbbreviationTermMap};
use crate::discovery::{self, DiscoveryConfig, FileValidation};
use crate::normalization::clean_text;
use crate::reader::{DocumentReader, ReaderConfig};

/// Configuration for a corpus run
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Clean each document before detection
    pub clean: bool,
    pub discovery: DiscoveryConfig,
    pub abbreviation: AbbreviationConfig,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            clean: true,
            discovery: DiscoveryConfig::default(),
            abbreviation: AbbreviationConfig::default(),
        }
    }
}

/// One (abbreviation, term) pair and the number of documents defining it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CorpusRow {
    pub abbreviation: String,
    pub term: String,
    pub count: u64,
}

/// Document frequency of resolved (abbreviation, term) pairs
#[derive(Debug, Clone, Default)]
pub struct CorpusTally {
    counts: BTreeMap<(String, String), u64>,
}

impl CorpusTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count each resolved pair of one document once
    pub fn add_document(&mut self, map: &AbbreviationTermMap) {
        for (abbreviation, term) in map.resolved() {
            *self
                .counts
                .entry((abbreviation.to_string(), term.to_string()))
                .or_insert(0) += 1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Rows ordered by abbreviation, then by descending count, then by term
    pub fn rows(&self) -> Vec<CorpusRow> {
        let mut rows: Vec<CorpusRow> = self
            .counts
            .iter()
            .map(|((abbreviation, term), &count)| CorpusRow {
                abbreviation: abbreviation.clone(),
                term: term.clone(),
                count,
            })
            .collect();
        rows.sort_by(|a, b| {
            a.abbreviation
                .cmp(&b.abbreviation)
                .then(b.count.cmp(&a.count))
                .then(a.term.cmp(&b.term))
        });
        rows
    }
}

/// Per-document processing statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    pub path: String,
    /// Characters in the document as read, before cleaning
    pub chars_processed: u64,
    pub abbreviations_detected: u64,
    pub abbreviations_resolved: u64,
    pub processing_time_ms: u64,
    pub chars_per_sec: f64,
    /// Processing status (success, failed)
    pub status: String,
    pub error: Option<String>,
}

impl FileStats {
    fn failed(path: &Path, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            chars_processed: 0,
            abbreviations_detected: 0,
            abbreviations_resolved: 0,
            processing_time_ms: 0,
            chars_per_sec: 0.0,
            status: "failed".to_string(),
            error: Some(error),
        }
    }
}

/// Aggregate statistics for a corpus run
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    /// Seconds since the Unix epoch
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub total_chars_processed: u64,
    pub total_abbreviations_detected: u64,
    pub total_abbreviations_resolved: u64,
    pub overall_chars_per_sec: f64,
    pub files_processed: u64,
    pub files_failed: u64,
    pub file_stats: Vec<FileStats>,
}

/// Result of a corpus run: the pair table and run statistics
#[derive(Debug, Clone)]
pub struct CorpusReport {
    pub rows: Vec<CorpusRow>,
    pub stats: RunStats,
}

impl CorpusReport {
    /// Tab-separated table with an `abbreviation term count` header
    pub fn to_tsv(&self) -> String {
        let mut out = String::from("abbreviation\tterm\tcount\n");
        for row in &self.rows {
            // Terms may span line breaks when cleaning is off
            let term = row.term.split_whitespace().collect::<Vec<_>>().join(" ");
            out.push_str(&format!("{}\t{}\t{}\n", row.abbreviation, term, row.count));
        }
        out
    }

    pub async fn write_tsv(&self, path: &Path) -> Result<()> {
        let file = tokio::fs::File::create(path)
            .await
            .with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.to_tsv().as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    pub async fn write_stats(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.stats)?;
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("writing stats to {}", path.display()))?;
        info!("Run statistics written to {}", path.display());
        Ok(())
    }
}

/// Processes documents one at a time and accumulates the corpus table
pub struct CorpusAggregator {
    config: CorpusConfig,
    engine: AbbreviationEngine,
    reader: DocumentReader,
    tally: CorpusTally,
    file_stats: Vec<FileStats>,
    run_start: u64,
    started: Instant,
}

impl CorpusAggregator {
    pub fn new(config: CorpusConfig) -> Self {
        let engine = AbbreviationEngine::new(config.abbreviation.clone());
        let reader = DocumentReader::new(ReaderConfig {
            fail_fast: config.discovery.fail_fast,
            ..Default::default()
        });
        let run_start = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            config,
            engine,
            reader,
            tally: CorpusTally::new(),
            file_stats: Vec::new(),
            run_start,
            started: Instant::now(),
        }
    }

    /// Process one discovered document; errors only under `fail_fast`
    pub async fn process_file(&mut self, file: &FileValidation) -> Result<&FileStats> {
        let stats = match &file.error {
            Some(error) if self.config.discovery.fail_fast => {
                anyhow::bail!("{}", error);
            }
            Some(error) => FileStats::failed(&file.path, error.clone()),
            None => self.process_path(&file.path).await?,
        };

        if stats.error.is_some() {
            warn!("Skipping {}: {}", stats.path, stats.error.as_deref().unwrap_or_default());
        }
        self.file_stats.push(stats);
        self.file_stats
            .last()
            .context("file stats missing after push")
    }

    async fn process_path(&mut self, path: &Path) -> Result<FileStats> {
        let start = Instant::now();
        let (text, read_stats) = self.reader.read_document(path).await?;
        if let Some(error) = read_stats.read_error {
            return Ok(FileStats::failed(path, error));
        }

        let map = if self.config.clean {
            self.engine.findall(&clean_text(&text))
        } else {
            self.engine.findall(&text)
        };
        self.tally.add_document(&map);

        let elapsed = start.elapsed();
        let chars_per_sec = if elapsed.as_secs_f64() > 0.0 {
            read_stats.chars_read as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        debug!(
            "Processed {}: {} abbreviations, {} resolved",
            path.display(),
            map.len(),
            map.resolved_count()
        );

        Ok(FileStats {
            path: path.display().to_string(),
            chars_processed: read_stats.chars_read,
            abbreviations_detected: map.len() as u64,
            abbreviations_resolved: map.resolved_count() as u64,
            processing_time_ms: elapsed.as_millis() as u64,
            chars_per_sec,
            status: "success".to_string(),
            error: None,
        })
    }

    pub fn tally(&self) -> &CorpusTally {
        &self.tally
    }

    /// Finish the run and produce the report
    pub fn finish(self) -> CorpusReport {
        let total_time = self.started.elapsed();
        let files_failed = self.file_stats.iter().filter(|s| s.error.is_some()).count() as u64;
        let files_processed = self.file_stats.len() as u64 - files_failed;
        let total_chars_processed: u64 = self.file_stats.iter().map(|s| s.chars_processed).sum();
        let overall_chars_per_sec = if total_time.as_secs_f64() > 0.0 {
            total_chars_processed as f64 / total_time.as_secs_f64()
        } else {
            0.0
        };

        let stats = RunStats {
            run_start: self.run_start,
            total_processing_time_ms: total_time.as_millis() as u64,
            total_chars_processed,
            total_abbreviations_detected: self.file_stats.iter().map(|s| s.abbreviations_detected).sum(),
            total_abbreviations_resolved: self.file_stats.iter().map(|s| s.abbreviations_resolved).sum(),
            overall_chars_per_sec,
            files_processed,
            files_failed,
            file_stats: self.file_stats,
        };

        info!(
            "Corpus run completed: {} documents processed, {} failed, {} distinct pairs",
            stats.files_processed,
            stats.files_failed,
            self.tally.counts.len()
        );

        CorpusReport {
            rows: self.tally.rows(),
            stats,
        }
    }
}

/// Find all abbreviations across the `*.txt` documents of a folder
///
/// Each row counts the documents in which an (abbreviation, term) pair was found.
/// The same abbreviation may appear with several terms, and the same term with
/// several abbreviations.
pub async fn find_corpus(folder: impl AsRef<Path>, config: CorpusConfig) -> Result<CorpusReport> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        anyhow::bail!("Corpus folder is not a directory: {}", folder.display());
    }

    let files = discovery::collect_text_files(folder, config.discovery.clone()).await?;
    info!("Processing {} documents from {}", files.len(), folder.display());

    let mut aggregator = CorpusAggregator::new(config);
    for file in &files {
        aggregator.process_file(file).await?;
    }
    Ok(aggregator.finish())
}
