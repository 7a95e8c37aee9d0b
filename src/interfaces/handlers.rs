pub mod contact_me;
pub mod home;
pub mod json_error;
