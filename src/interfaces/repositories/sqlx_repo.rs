use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxContactMeRepo {
    pub pool: PgPool,
}
