use crate::db::{DbPool, OrmConn, orm_from_pool};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(pool: DbPool, jwt_secret: impl Into<String>) -> Self {
        let orm = orm_from_pool(&pool);
        Self {
            pool,
            orm,
            jwt_secret: jwt_secret.into(),
        }
    }
}
