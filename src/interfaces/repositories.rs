pub mod contact_me;
pub mod sqlx_repo;
