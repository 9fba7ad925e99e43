use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

/// Builds the pool without connecting, so an unreachable server shows up on
/// the first attendance request instead of at startup.
pub fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(5)
        .connect_lazy(database_url)
}
