use crate::schema::auth_config;
use chrono::NaiveDateTime;

pub const DRIVER_USER: &str = "driver";

#[derive(Queryable, Insertable)]
#[table_name = "auth_config"]
pub struct AuthConfig {
    pub user: String,
    pub pattern: Option<String>,
    pub updated_at: NaiveDateTime,
}
