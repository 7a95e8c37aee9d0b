/// Maximum accepted size of a contact submission body, in bytes.
pub const CONTACT_BODY_LIMIT: usize = 10 * 1024;

pub const NAME_MAX_LEN: usize = 200;
pub const EMAIL_MAX_LEN: usize = 200;
pub const MESSAGE_MAX_LEN: usize = 3000;

pub const CONTACT_THANK_YOU: &str = "Thank you — we received your message.";
pub const MISSING_FIELDS_MESSAGE: &str = "Name, email and message are required.";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email.";
pub const RATE_LIMITED_MESSAGE: &str = "Too many messages from this IP. Try again later.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Rate limiter key used when the client address cannot be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";
