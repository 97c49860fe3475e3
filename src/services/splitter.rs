use std::path::{Path, PathBuf};

use bytes::Bytes;

use super::allocation::Allocation;
use super::excel::{SpreadsheetCodec, WorkbookCodec};
use super::{normalizer, partitioner};
use crate::error::AppError;
use crate::models::{NamedFile, NormalizedSheet, OutputFormat, PartRange};

/// Everything the caller configures for one split.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitRequest {
    pub allocation: Allocation,
    pub format: OutputFormat,
}

/// Runs decode -> normalize -> partition -> encode for one input.
#[derive(Debug, Clone, Default)]
pub struct SheetSplitter<C = WorkbookCodec> {
    codec: C,
}

impl<C: SpreadsheetCodec> SheetSplitter<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    fn load_sheet(&self, input: Option<&[u8]>) -> Result<NormalizedSheet, AppError> {
        let bytes = input.ok_or(AppError::MissingInput)?;
        let grid = self.codec.decode(bytes)?;
        Ok(normalizer::normalize(grid))
    }

    /// Computes the row ranges without encoding anything.
    pub fn plan(
        &self,
        input: Option<&[u8]>,
        allocation: &Allocation,
    ) -> Result<(usize, Vec<PartRange>), AppError> {
        let sheet = self.load_sheet(input)?;
        let total = sheet.rows.len();
        Ok((total, partitioner::plan(allocation, total)))
    }

    /// Encodes every part in memory. Nothing is returned unless all parts
    /// encoded successfully.
    pub fn split(
        &self,
        input: Option<&[u8]>,
        request: &SplitRequest,
    ) -> Result<Vec<NamedFile>, AppError> {
        let start = std::time::Instant::now();
        let sheet = self.load_sheet(input)?;
        tracing::info!(
            "Splitting {} data rows into {} parts as {}",
            sheet.rows.len(),
            request.allocation.parts(),
            request.format
        );
        let share_total = request.allocation.total();
        if share_total < 100.0 {
            tracing::info!("Shares sum to {}%, some trailing rows may go unassigned", share_total);
        }

        let files = partitioner::partition(&sheet, &request.allocation)
            .into_iter()
            .map(|(range, part)| {
                let bytes = self.codec.encode(&part, request.format)?;
                Ok::<_, AppError>(NamedFile {
                    name: part.file_name(request.format),
                    range,
                    data_rows: part.rows.len(),
                    bytes,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("Encoded {} parts in {:?}", files.len(), start.elapsed());
        Ok(files)
    }
}

/// Reads the selected file. `None` means nothing was selected.
pub async fn load_file_from_path(
    path: Option<&Path>,
    max_file_size: usize,
) -> Result<Bytes, AppError> {
    let path = path.ok_or(AppError::MissingInput)?;

    let size = tokio::fs::metadata(path).await?.len();
    if size > max_file_size as u64 {
        return Err(AppError::InvalidInput(format!(
            "{} is {} bytes, the limit is {} bytes",
            path.display(),
            size,
            max_file_size
        )));
    }

    let data = tokio::fs::read(path).await?;
    tracing::info!("Read {} ({}KB)", path.display(), data.len() / 1024);
    Ok(Bytes::from(data))
}

/// Writes each part under `dir`. Files are written under a temporary name and
/// renamed into place; on failure every file from this call is removed.
pub async fn write_parts(dir: &Path, files: &[NamedFile]) -> Result<Vec<PathBuf>, AppError> {
    tokio::fs::create_dir_all(dir).await?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        match write_one(dir, file).await {
            Ok(path) => written.push(path),
            Err(e) => {
                tracing::error!("Failed to write {}: {}", file.name, e);
                for path in &written {
                    if let Err(cleanup) = tokio::fs::remove_file(path).await {
                        tracing::warn!("Could not remove {}: {}", path.display(), cleanup);
                    }
                }
                return Err(e);
            }
        }
    }
    Ok(written)
}

async fn write_one(dir: &Path, file: &NamedFile) -> Result<PathBuf, AppError> {
    let target = dir.join(&file.name);
    let tmp = dir.join(format!(".{}.tmp", file.name));

    tokio::fs::write(&tmp, &file.bytes).await?;
    if let Err(e) = tokio::fs::rename(&tmp, &target).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    tracing::debug!("Wrote {} ({} bytes)", target.display(), file.bytes.len());
    Ok(target)
}
