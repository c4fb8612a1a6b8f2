use serde::{Deserialize, Serialize};

/// How an upload was received before hitting disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStrategy {
    /// Whole part held in memory, then written once.
    Buffered,
    /// Part streamed to disk through a fixed-size buffer.
    Chunked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub filename: String,
    pub content_type: Option<String>,
    pub size: u64,
    pub strategy: UploadStrategy,
}

/// Reply for multi-file uploads; both lists share the part order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUploadReceipt {
    pub filename: Vec<String>,
    pub content_type: Vec<Option<String>>,
}
