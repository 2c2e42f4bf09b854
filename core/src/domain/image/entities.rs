use bytes::Bytes;
use serde::Serialize;

/// Raw upload as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuImage {
    pub data: Bytes,
    pub mime_type: String,
}

impl MenuImage {
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Base64 payload ready to be embedded as an inline part of a multimodal request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}
