//! What gets captured for a single call.
//!
//! Request params are first normalized by [`sanitize`] so that a file upload or a
//! number compares equal across runs. The resulting [`CaptureRecord`] is keyed by its
//! [`Fingerprint`], derived from the request shape and the response status only.

mod value;
pub use self::value::{BINARY_SENTINEL, BinaryUpload, Value};

mod sanitize;
pub use self::sanitize::sanitize;

mod fingerprint;
pub use self::fingerprint::{FINGERPRINT_PREFIX, Fingerprint};

mod record;
pub use self::record::{CaptureRecord, Meta};
