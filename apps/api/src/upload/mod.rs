// Upload Gate: multipart intake, validation and scratch-file staging.
// Nothing in here talks to a provider.

pub mod form;
pub mod gate;
pub mod scratch;

/// Largest document accepted, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Request body cap: the document plus room for multipart framing and the
/// `feedback` text field.
pub const MAX_REQUEST_BYTES: usize = MAX_UPLOAD_BYTES + 1024 * 1024;
