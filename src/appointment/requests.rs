use serde::Deserialize;

#[derive(Deserialize)]
pub struct AddAppointmentRequest {
    pub login_token: String,
    pub client_name: String,
    pub pickup_time: String,
    pub pickup_location: String,
    pub arrival_time: String,
    pub arrival_location: String,
    pub appointment_type_id: u64,
    pub flight_info: Option<String>,
    pub luggage_passengers: Option<String>,
    pub other_details: Option<String>,
    #[serde(default)]
    pub amount: f64,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct ViewAppointmentRequest {
    pub login_token: String,
    pub id: u64,
}

/// Absent fields keep their stored value.
#[derive(Deserialize)]
pub struct ModifyAppointmentRequest {
    pub login_token: String,
    pub id: u64,
    pub client_name: Option<String>,
    pub pickup_time: Option<String>,
    pub pickup_location: Option<String>,
    pub arrival_time: Option<String>,
    pub arrival_location: Option<String>,
    pub appointment_type_id: Option<u64>,
    pub flight_info: Option<String>,
    pub luggage_passengers: Option<String>,
    pub other_details: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteAppointmentRequest {
    pub login_token: String,
    pub id: u64,
}

#[derive(Deserialize)]
pub struct SearchAppointmentRequest {
    pub login_token: String,
    pub status: Option<String>,
    pub client_name: Option<String>,
    /// Matched against client name and both locations.
    pub keyword: Option<String>,
    /// Local pickup date, `YYYY-MM-DD`.
    pub date: Option<String>,
    pub appointment_type_id: Option<u64>,
    pub first_index: Option<i64>,
    pub limit: Option<i64>,
}

/// The time fields of a form being edited; unparseable times count as unset.
#[derive(Deserialize)]
pub struct CheckAppointmentRequest {
    pub login_token: String,
    pub id: Option<u64>,
    pub pickup_time: Option<String>,
    pub arrival_time: Option<String>,
}

#[derive(Deserialize)]
pub struct IncomeStatsRequest {
    pub login_token: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub client_name: Option<String>,
    pub appointment_type_id: Option<u64>,
}

#[derive(Deserialize)]
pub struct UpcomingRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct SmsRequest {
    pub login_token: String,
    pub id: u64,
    pub language: Option<String>,
    pub date_format: Option<String>,
}
