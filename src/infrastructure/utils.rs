pub mod email;
pub mod get_client_ip;
pub mod html;
