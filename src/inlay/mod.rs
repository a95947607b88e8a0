//! Inlay domain types shared by the cache, metadata and reconciliation layers.
mod payload;


pub use payload::*;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Opaque key identifying one inlay inside a chat scope
pub type InlayKey = String;

/// How the bytes behind an inlay should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlayType {
    #[default]
    Image,
    Video,
    Audio,
    Signature,
}

impl InlayType {
    /// Tag persisted in the `type` namespace
    pub fn as_tag(&self) -> &'static str {
        match self {
            InlayType::Image => "image",
            InlayType::Video => "video",
            InlayType::Audio => "audio",
            InlayType::Signature => "signature",
        }
    }

    /// Best-effort classification from a media type such as `image/png`
    pub fn from_mime(mime: &str) -> Option<Self> {
        let top = mime.split('/').next()?.trim().to_ascii_lowercase();
        match top.as_str() {
            "image" => Some(InlayType::Image),
            "video" => Some(InlayType::Video),
            "audio" => Some(InlayType::Audio),
            _ => None,
        }
    }
}

impl fmt::Display for InlayType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown inlay type tag: {0}")]
pub struct UnknownInlayType(pub String);

impl FromStr for InlayType {
    type Err = UnknownInlayType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(InlayType::Image),
            "video" => Ok(InlayType::Video),
            "audio" => Ok(InlayType::Audio),
            "signature" => Ok(InlayType::Signature),
            other => Err(UnknownInlayType(other.to_string())),
        }
    }
}

/// Raw inlay record as handed out by the authoritative store
#[derive(Debug, Clone, PartialEq)]
pub struct InlayData {
    pub payload: InlayPayload,
    /// `None` when the store did not record a type
    pub kind: Option<InlayType>,
}

impl InlayData {
    pub fn new(
        payload: InlayPayload,
        kind: Option<InlayType>,
    ) -> Self {
        Self { payload, kind }
    }

    /// Declared type, falling back to [`InlayType::default`]
    pub fn kind_or_default(&self) -> InlayType {
        self.kind.unwrap_or_default()
    }
}
