use crate::schema::appointment_types;
use chrono::NaiveDateTime;

#[derive(Queryable)]
pub struct AppointmentType {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "appointment_types"]
pub struct NewAppointmentType {
    pub name: String,
    pub color: String,
    pub icon: String,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Default)]
#[table_name = "appointment_types"]
pub struct UpdateAppointmentType {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl UpdateAppointmentType {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.icon.is_none()
    }
}
