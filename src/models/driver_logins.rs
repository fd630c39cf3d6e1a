use crate::schema::driver_logins;
use chrono::NaiveDateTime;

#[derive(Queryable, Insertable)]
#[table_name = "driver_logins"]
pub struct DriverLoginData {
    pub token: String,
    pub user: String,
    pub login_time: NaiveDateTime,
}
