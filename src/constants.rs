// -
// Database namespaces

/// Sled database directory below `db_root_dir`
pub(crate) const META_DB_DIR: &str = "inlay_meta";

/// Sled tree namespaces
pub const TIME_NAMESPACE: &str = "time";
pub const TYPE_NAMESPACE: &str = "type";

// -
// Cache

pub(crate) const DEFAULT_CACHE_CAPACITY: usize = 100;

// -
// Event sources

pub const RECONCILER_SYNC_KEY_SOURCE: &str = "Reconciler::sync_key";
pub(crate) const DEFAULT_OBSERVER_SOURCE: &str = "ContentObserver";

// -
// Content scanning

/// Accepted spellings of the inlay reference: `{{inlay::KEY}}`,
/// `{{inlayed::KEY}}` and `{{inlayeddata::KEY}}`.
pub(crate) const INLAY_REFERENCE_PATTERN: &str = r"\{\{(inlay|inlayed|inlayeddata)::(.*?)\}\}";

/// Fallback media type for binary payloads lacking one
pub(crate) const DEFAULT_MIME: &str = "application/octet-stream";
