pub mod origin_guard;
pub mod security_headers;
