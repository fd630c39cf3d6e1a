pub mod assert;

use crate::AppState;
use actix_web::{error::BlockingError, web};
use anyhow::{anyhow, Context};
use diesel::{r2d2::ConnectionManager, MysqlConnection};
use r2d2::PooledConnection;

no_arg_sql_function!(
    last_insert_id,
    diesel::sql_types::Unsigned<diesel::sql_types::Bigint>,
    "Id generated by the last insert on this connection"
);

pub type DbConn = PooledConnection<ConnectionManager<MysqlConnection>>;

pub fn get_db_conn(state: &web::Data<AppState>) -> anyhow::Result<DbConn> {
    state.pool.get().context("DB connection")
}

/// Runs blocking DB work off the async executor, keeping the closure's own error.
pub async fn block<F, T>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f).await.map_err(|err| match err {
        BlockingError::Error(err) => err,
        BlockingError::Canceled => anyhow!("DB task canceled"),
    })
}
