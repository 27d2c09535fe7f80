use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for document reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether a read failure aborts or is recorded in the stats
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for one document read
#[derive(Debug, Clone, Serialize)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub chars_read: u64,
    /// Invalid UTF-8 sequences were replaced during decoding
    pub lossy: bool,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

impl ReadStats {
    fn failed(path: &Path, duration_ms: u64, error: String) -> Self {
        Self {
            file_path: path.display().to_string(),
            bytes_read: 0,
            chars_read: 0,
            lossy: false,
            duration_ms,
            read_error: Some(error),
        }
    }
}

/// Async reader that loads whole documents and decodes them lossily
pub struct DocumentReader {
    config: ReaderConfig,
}

impl DocumentReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read a whole document; invalid UTF-8 becomes U+FFFD instead of an error
    ///
    /// Without `fail_fast`, an unreadable file yields empty text and stats carrying
    /// the error.
    pub async fn read_document<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats)> {
        let path = file_path.as_ref();
        let start_time = std::time::Instant::now();

        debug!("Starting async read of document: {}", path.display());

        let bytes = match self.read_bytes(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let error_msg = format!("Failed to read document {}: {}", path.display(), e);
                warn!("{}", error_msg);

                if self.config.fail_fast {
                    return Err(anyhow::anyhow!(error_msg));
                }
                let stats = ReadStats::failed(path, start_time.elapsed().as_millis() as u64, error_msg);
                return Ok((String::new(), stats));
            }
        };

        let byte_count = bytes.len() as u64;
        let (text, lossy) = match String::from_utf8(bytes) {
            Ok(text) => (text, false),
            Err(e) => {
                debug!("Invalid UTF-8 in {}, decoding lossily", path.display());
                (String::from_utf8_lossy(e.as_bytes()).into_owned(), true)
            }
        };

        let stats = ReadStats {
            file_path: path.display().to_string(),
            bytes_read: byte_count,
            chars_read: text.chars().count() as u64,
            lossy,
            duration_ms: start_time.elapsed().as_millis() as u64,
            read_error: None,
        };

        info!(
            "Read {}: {} bytes in {}ms{}",
            path.display(),
            stats.bytes_read,
            stats.duration_ms,
            if lossy { " (lossy)" } else { "" }
        );

        Ok((text, stats))
    }

    async fn read_bytes(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        let file = File::open(path).await?;
        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        Ok(bytes)
    }
}

/// Read a single document with default configuration, failing on I/O errors
pub async fn read_document<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let path = file_path.as_ref();
    let reader = DocumentReader::new(ReaderConfig {
        fail_fast: true,
        ..Default::default()
    });
    let (text, _stats) = reader
        .read_document(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(text)
}
