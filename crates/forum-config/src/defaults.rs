//! Fallback values applied when build-time inputs are missing or unusable.

/// Delay before an opened post is marked as read, in milliseconds.
pub const POST_MARK_AS_READ_DELAY_MS: u64 = 2_000;
/// LMS origin used when `LMS_BASE_URL` is not provided at build time.
pub const LMS_BASE_URL: &str = "http://localhost:18000";
