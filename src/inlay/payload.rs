use base64::alphabet;
use base64::engine::DecodePaddingMode;
use base64::engine::GeneralPurpose;
use base64::engine::GeneralPurposeConfig;
use base64::Engine;
use bytes::Bytes;

use crate::constants::DEFAULT_MIME;
use crate::DecodeError;

/// Raw bytes or encoded text exactly as stored by the authoritative store
#[derive(Debug, Clone, PartialEq)]
pub enum InlayPayload {
    /// `data:<mime>;base64,<body>` URI
    Encoded(String),
    /// Already-decoded bytes with their media type
    Binary { bytes: Bytes, mime: Option<String> },
}

/// Payload reduced to bytes and a media type, ready for allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub bytes: Bytes,
    pub mime: String,
}

impl InlayPayload {
    pub fn encoded(uri: impl Into<String>) -> Self {
        InlayPayload::Encoded(uri.into())
    }

    pub fn binary(
        bytes: impl Into<Bytes>,
        mime: Option<&str>,
    ) -> Self {
        InlayPayload::Binary {
            bytes: bytes.into(),
            mime: mime.map(str::to_string),
        }
    }

    /// Detects the encoding shape and produces raw bytes.
    ///
    /// Only the shape is checked; the content itself is never validated.
    pub fn decode(&self) -> Result<DecodedPayload, DecodeError> {
        match self {
            InlayPayload::Encoded(uri) => decode_data_uri(uri),
            InlayPayload::Binary { bytes, mime } => Ok(DecodedPayload {
                bytes: bytes.clone(),
                mime: mime.clone().unwrap_or_else(|| DEFAULT_MIME.to_string()),
            }),
        }
    }
}

/// Standard alphabet, padding optional, trailing bits ignored
const FORGIVING_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Parses `data:<mime>[;param]*,<body>`.
///
/// The body is always read as base64, whether or not the header carries a
/// `;base64` token. ASCII whitespace inside the body is skipped.
pub fn decode_data_uri(uri: &str) -> Result<DecodedPayload, DecodeError> {
    let rest = uri.trim().strip_prefix("data:").ok_or(DecodeError::NotDataUri)?;
    let (header, body) = rest.split_once(',').ok_or(DecodeError::NotDataUri)?;

    let mime = header.split(';').next().map(str::trim).unwrap_or_default();
    if mime.is_empty() {
        return Err(DecodeError::MissingMime);
    }

    let body: Vec<u8> = body.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    let bytes = FORGIVING_BASE64.decode(body)?;
    Ok(DecodedPayload {
        bytes: Bytes::from(bytes),
        mime: mime.to_string(),
    })
}
