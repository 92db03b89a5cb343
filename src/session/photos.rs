//! Photo intake. Uploads arrive tagged with their position in the user's
//! selection and are reassembled in that order, whatever order the reads
//! finished in.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::debug;

const DATA_URI_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoUpload {
    pub index: usize,
    pub data_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("photo {index} is not a base64 image data URI")]
    InvalidDataUri { index: usize },
    #[error("photo index {0} was uploaded more than once")]
    DuplicateIndex(usize),
    #[error("no photo at index {0}")]
    NotFound(usize),
    #[error("failed to read photo '{path}': {message}")]
    Read { path: String, message: String },
    #[error("unsupported photo type '{0}'")]
    UnsupportedType(String),
}

/// Accepts `data:image/<subtype>;base64,<payload>` where the payload is
/// non-empty standard base64.
pub fn check_data_uri(index: usize, data_uri: &str) -> Result<(), PhotoError> {
    let valid = data_uri
        .strip_prefix(DATA_URI_PREFIX)
        .and_then(|rest| rest.split_once(BASE64_MARKER))
        .is_some_and(|(subtype, payload)| {
            !subtype.is_empty() && !payload.is_empty() && STANDARD.decode(payload).is_ok()
        });
    if valid {
        Ok(())
    } else {
        Err(PhotoError::InvalidDataUri { index })
    }
}

/// Order uploads by their tagged index. Gaps are allowed; repeats are not.
pub fn assemble_photos(uploads: Vec<PhotoUpload>) -> Result<Vec<String>, PhotoError> {
    let mut ordered = BTreeMap::new();
    for upload in uploads {
        check_data_uri(upload.index, &upload.data_uri)?;
        if ordered.insert(upload.index, upload.data_uri).is_some() {
            return Err(PhotoError::DuplicateIndex(upload.index));
        }
    }
    Ok(ordered.into_values().collect())
}

pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime}{BASE64_MARKER}{}", STANDARD.encode(bytes))
}

/// Read image files concurrently and return data URIs in argument order.
pub async fn read_photo_files(paths: &[PathBuf]) -> Result<Vec<String>, PhotoError> {
    let mut reads = JoinSet::new();
    for (index, path) in paths.iter().cloned().enumerate() {
        let mime = mime_for_path(&path)
            .ok_or_else(|| PhotoError::UnsupportedType(path.display().to_string()))?;
        reads.spawn(async move {
            let bytes = tokio::fs::read(&path).await.map_err(|err| PhotoError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;
            debug!(index, bytes = bytes.len(), path = %path.display(), "photo read");
            Ok::<_, PhotoError>(PhotoUpload {
                index,
                data_uri: encode_data_uri(mime, &bytes),
            })
        });
    }

    let mut uploads = Vec::with_capacity(paths.len());
    while let Some(joined) = reads.join_next().await {
        let upload = joined.map_err(|err| PhotoError::Read {
            path: "<task>".to_string(),
            message: err.to_string(),
        })??;
        uploads.push(upload);
    }
    assemble_photos(uploads)
}
