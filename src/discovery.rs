use anyhow::Result;
use futures::stream::{Stream, StreamExt};
use glob::glob;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Configuration for document discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to abort on the first inaccessible file or record it and continue
    pub fail_fast: bool,
    /// Descend into subdirectories (`**/*.txt`) instead of the top level only
    pub recursive: bool,
}

/// Result of file discovery validation
#[derive(Debug, Clone)]
pub struct FileValidation {
    pub path: PathBuf,
    pub error: Option<String>,
}

impl FileValidation {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

fn glob_pattern(root_dir: &Path, recursive: bool) -> String {
    let escaped = glob::Pattern::escape(&root_dir.to_string_lossy());
    if recursive {
        format!("{escaped}/**/*.txt")
    } else {
        format!("{escaped}/*.txt")
    }
}

/// Discovers all `*.txt` documents under the given folder as an async stream of
/// validated paths, in glob order
pub fn discover_text_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<FileValidation>> {
    let root_path = root_dir.as_ref().to_path_buf();

    futures::stream::unfold(
        DiscoveryState::new(root_path, config),
        |mut state| async move {
            state.next_file().await.map(|result| (result, state))
        },
    )
}

/// Internal state for file discovery iteration
struct DiscoveryState {
    root_dir: PathBuf,
    config: DiscoveryConfig,
    glob_iter: Option<glob::Paths>,
    finished: bool,
}

impl DiscoveryState {
    fn new(root_dir: PathBuf, config: DiscoveryConfig) -> Self {
        Self {
            root_dir,
            config,
            glob_iter: None,
            finished: false,
        }
    }

    async fn next_file(&mut self) -> Option<Result<FileValidation>> {
        if self.finished {
            return None;
        }

        if self.glob_iter.is_none() {
            let pattern = glob_pattern(&self.root_dir, self.config.recursive);
            debug!("Starting document discovery with pattern: {}", pattern);

            match glob(&pattern) {
                Ok(paths) => {
                    self.glob_iter = Some(paths);
                    info!("Document discovery initialized for folder: {}", self.root_dir.display());
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(anyhow::anyhow!("Failed to create glob pattern: {}", e)));
                }
            }
        }

        let glob_iter = self.glob_iter.as_mut()?;
        loop {
            match glob_iter.next() {
                Some(Ok(path)) => {
                    debug!("Found document: {}", path.display());
                    let result = validate_file(path, &self.config).await;
                    if result.is_err() {
                        self.finished = true;
                    }
                    return Some(result);
                }
                Some(Err(e)) => {
                    let error_msg = format!("Glob iteration error: {e}");
                    warn!("{}", error_msg);

                    if self.config.fail_fast {
                        self.finished = true;
                        return Some(Err(anyhow::anyhow!(error_msg)));
                    }
                    // Non-fatal: move on to the next entry
                }
                None => {
                    info!("Document discovery completed");
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

async fn validate_file(path: PathBuf, config: &DiscoveryConfig) -> Result<FileValidation> {
    debug!("Validating document: {}", path.display());

    let error = match fs::metadata(&path).await {
        Ok(metadata) if metadata.is_file() => None,
        Ok(_) => Some(format!("Path is not a file: {}", path.display())),
        Err(e) => {
            let error = format!("Cannot access file {}: {}", path.display(), e);
            if config.fail_fast {
                warn!("{}", error);
                return Err(anyhow::anyhow!(error));
            }
            Some(error)
        }
    };

    if let Some(ref error) = error {
        warn!("{}", error);
    }

    // UTF-8 problems are handled by lossy decoding in the reader
    Ok(FileValidation { path, error })
}

/// Collect all discovered documents into a Vec sorted by path
pub async fn collect_text_files(
    root_dir: impl AsRef<Path>,
    config: DiscoveryConfig,
) -> Result<Vec<FileValidation>> {
    let mut files = Vec::new();
    let mut stream = Box::pin(discover_text_files(root_dir, config));

    while let Some(result) = stream.next().await {
        files.push(result?);
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));

    let valid_count = files.iter().filter(|f| f.is_valid()).count();
    let invalid_count = files.len() - valid_count;

    if invalid_count > 0 {
        warn!("Found {} documents with validation issues", invalid_count);
    }

    info!("Document discovery summary: {} valid, {} invalid", valid_count, invalid_count);

    Ok(files)
}
