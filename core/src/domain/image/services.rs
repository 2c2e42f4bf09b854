use base64::{Engine as _, engine::general_purpose};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, error};

use crate::domain::{image::entities::EncodedImage, menu_analysis::entities::AnalysisError};

/// Reads `reader` to completion and base64-encodes the bytes.
pub async fn encode_image<R>(mut reader: R, mime_type: &str) -> Result<EncodedImage, AnalysisError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).await.map_err(|e| {
        error!("Failed to read image data: {}", e);
        AnalysisError::Encoding {
            reason: e.to_string(),
        }
    })?;

    let data = general_purpose::STANDARD.encode(&buffer);
    debug!(
        size_bytes = buffer.len(),
        encoded_len = data.len(),
        mime_type,
        "Image converted to base64"
    );

    Ok(EncodedImage {
        data,
        mime_type: mime_type.to_string(),
    })
}
