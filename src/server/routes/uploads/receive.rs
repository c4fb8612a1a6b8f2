//! The two ways a multipart part reaches disk.
//!
//! Both write into a hidden part file next to the target. Nothing under the
//! client's filename changes until [`StagedUpload::commit`] renames it over.

use crate::config::UploadsConfig;
use crate::error::LabError;
use apilab_schema::{UploadReceipt, UploadStrategy, Violation};
use axum::extract::multipart::Field;
use std::path::{Path, PathBuf};
use tokio::{
    fs::{self, File},
    io::{AsyncWriteExt, BufWriter},
};
use tracing::{debug, warn};

/// Reduces a client-supplied filename to its last path component.
///
/// Both `/` and `\` count as separators. Empty, `.`, `..` and names holding
/// a NUL byte are rejected.
pub(crate) fn safe_filename(field: &str, raw: Option<&str>) -> Result<String, LabError> {
    let invalid = |msg: &str| {
        LabError::invalid(vec![Violation::new(
            &["body", field],
            msg,
            "invalid_filename",
        )])
    };
    let raw = raw.ok_or_else(|| invalid("Expected an uploaded file with a filename"))?;
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    if name.is_empty() || name == "." || name == ".." || name.contains('\0') {
        return Err(invalid("Filename is not usable"));
    }
    Ok(name.to_string())
}

/// A fully received part waiting in its part file.
#[derive(Debug)]
pub(crate) struct StagedUpload {
    part: PathBuf,
    target: PathBuf,
    receipt: UploadReceipt,
}

impl StagedUpload {
    /// Moves the part file over the target, replacing any earlier upload.
    pub(crate) async fn commit(self) -> Result<UploadReceipt, LabError> {
        if let Err(e) = fs::rename(&self.part, &self.target).await {
            let _ = fs::remove_file(&self.part).await;
            return Err(e.into());
        }
        debug!(path = %self.target.display(), size = self.receipt.size, "upload committed");
        Ok(self.receipt)
    }

    /// Removes the part file, leaving the target untouched.
    pub(crate) async fn discard(self) {
        if let Err(e) = fs::remove_file(&self.part).await {
            warn!(path = %self.part.display(), error = %e, "failed to remove part file");
        }
    }
}

/// Holds the whole part in memory, then writes it with a single call.
pub(crate) async fn save_buffered(
    mut field: Field<'_>,
    cfg: &UploadsConfig,
) -> Result<StagedUpload, LabError> {
    let (field_name, filename, content_type) = describe(&field)?;
    let limit = cfg.max_part_size;

    let mut content = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if content.len() + chunk.len() > limit {
            return Err(LabError::PartTooLarge {
                field: field_name,
                limit,
            });
        }
        content.extend_from_slice(&chunk);
    }

    let (part, target) = staging_paths(cfg, &filename).await?;
    if let Err(e) = fs::write(&part, &content).await {
        let _ = fs::remove_file(&part).await;
        return Err(e.into());
    }
    debug!(path = %part.display(), size = content.len(), "buffered upload staged");

    Ok(StagedUpload {
        part,
        target,
        receipt: UploadReceipt {
            filename,
            content_type,
            size: content.len() as u64,
            strategy: UploadStrategy::Buffered,
        },
    })
}

/// Streams the part to disk through a `chunk_size` write buffer.
///
/// A part that crosses `max_part_size` leaves no file behind.
pub(crate) async fn save_chunked(
    mut field: Field<'_>,
    cfg: &UploadsConfig,
) -> Result<StagedUpload, LabError> {
    let (field_name, filename, content_type) = describe(&field)?;
    let limit = cfg.max_part_size as u64;

    let (part, target) = staging_paths(cfg, &filename).await?;
    let mut writer = BufWriter::with_capacity(cfg.chunk_size, File::create(&part).await?);
    let mut size: u64 = 0;

    let outcome = async {
        while let Some(chunk) = field.chunk().await? {
            size += chunk.len() as u64;
            if size > limit {
                return Err(LabError::PartTooLarge {
                    field: field_name.clone(),
                    limit: cfg.max_part_size,
                });
            }
            writer.write_all(&chunk).await?;
        }
        writer.flush().await?;
        Ok::<(), LabError>(())
    }
    .await;

    if let Err(e) = outcome {
        drop(writer);
        let _ = fs::remove_file(&part).await;
        return Err(e);
    }
    debug!(path = %part.display(), size, "chunked upload staged");

    Ok(StagedUpload {
        part,
        target,
        receipt: UploadReceipt {
            filename,
            content_type,
            size,
            strategy: UploadStrategy::Chunked,
        },
    })
}

fn describe(field: &Field<'_>) -> Result<(String, String, Option<String>), LabError> {
    let field_name = field.name().unwrap_or_default().to_string();
    let filename = safe_filename(&field_name, field.file_name())?;
    let content_type = field.content_type().map(str::to_string);
    Ok((field_name, filename, content_type))
}

/// Returns `(part, target)`. The random tag keeps concurrent uploads of the
/// same name from sharing a part file.
async fn staging_paths(
    cfg: &UploadsConfig,
    filename: &str,
) -> Result<(PathBuf, PathBuf), LabError> {
    fs::create_dir_all(&cfg.upload_dir).await?;
    let dir = Path::new(&cfg.upload_dir);
    let tag: u32 = rand::random();
    Ok((
        dir.join(format!(".{filename}.{tag:08x}.part")),
        dir.join(filename),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_lose_their_directories() {
        assert_eq!(safe_filename("f", Some("a.txt")).unwrap(), "a.txt");
        assert_eq!(safe_filename("f", Some("../../etc/passwd")).unwrap(), "passwd");
        assert_eq!(safe_filename("f", Some(r"C:\temp\b.png")).unwrap(), "b.png");
    }

    #[tokio::test]
    async fn part_files_sit_beside_the_target() {
        let cfg = UploadsConfig {
            upload_dir: std::env::temp_dir()
                .join(format!("apilab-staging-{}", std::process::id())),
            ..Default::default()
        };
        let (part, target) = staging_paths(&cfg, "a.txt").await.unwrap();
        assert_eq!(target, cfg.upload_dir.join("a.txt"));
        assert_eq!(part.parent(), target.parent());
        let name = part.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".a.txt.") && name.ends_with(".part"), "{name}");
        let _ = std::fs::remove_dir_all(&cfg.upload_dir);
    }

    #[test]
    fn unusable_filenames_are_rejected() {
        for raw in [None, Some(""), Some("dir/"), Some(".."), Some("a/."), Some("x\0y")] {
            assert!(safe_filename("f", raw).is_err(), "{raw:?} should be rejected");
        }
    }
}
