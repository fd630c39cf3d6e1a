use serde::Serialize;

use crate::{display::DisplaySettings, models::appointments::Appointment};

#[derive(Default, Serialize)]
pub struct SaveAppointmentResponse {
    pub success: bool,
    pub err: String,
    pub id: u64,
    /// Advisory only; the save went through.
    pub overlap: bool,
    pub overlapping_ids: Vec<u64>,
}

#[derive(Default, Serialize)]
pub struct AppointmentItem {
    pub id: u64,
    pub client_name: String,
    pub pickup_time: String,
    pub pickup_location: String,
    pub arrival_time: String,
    pub arrival_location: String,
    pub appointment_type_id: u64,
    pub flight_info: String,
    pub luggage_passengers: String,
    pub other_details: String,
    pub amount: f64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    /// Local pickup day in the configured date format.
    pub pickup_date: String,
    pub pickup_display: String,
    pub arrival_display: String,
}

impl AppointmentItem {
    pub fn new(data: Appointment, settings: &DisplaySettings) -> Self {
        Self {
            pickup_date: settings.format_date(&data.pickup_time),
            pickup_display: settings.format_short_date(&data.pickup_time),
            arrival_display: settings.format_short_date(&data.arrival_time),
            id: data.id,
            client_name: data.client_name,
            pickup_time: crate::utils::format_time_str(&data.pickup_time),
            pickup_location: data.pickup_location,
            arrival_time: crate::utils::format_time_str(&data.arrival_time),
            arrival_location: data.arrival_location,
            appointment_type_id: data.appointment_type_id,
            flight_info: data.flight_info.unwrap_or_default(),
            luggage_passengers: data.luggage_passengers.unwrap_or_default(),
            other_details: data.other_details.unwrap_or_default(),
            amount: data.amount,
            status: data.status,
            created_at: crate::utils::format_time_str(&data.created_at),
            updated_at: crate::utils::format_time_str(&data.updated_at),
        }
    }
}

#[derive(Default, Serialize)]
pub struct ViewAppointmentResponse {
    pub success: bool,
    pub err: String,
    pub appointment: AppointmentItem,
}

#[derive(Default, Serialize)]
pub struct SearchAppointmentResponse {
    pub success: bool,
    pub err: String,
    pub appointments: Vec<AppointmentItem>,
}

#[derive(Default, Serialize)]
pub struct CheckAppointmentResponse {
    pub success: bool,
    pub err: String,
    pub valid: bool,
    /// Why the draft is invalid, empty when valid.
    pub reason: String,
    pub overlap: bool,
    pub overlapping_ids: Vec<u64>,
}

#[derive(Default, Serialize)]
pub struct ClientIncomeItem {
    pub client_name: String,
    pub count: u64,
    pub total: f64,
}

#[derive(Default, Serialize)]
pub struct IncomeStatsResponse {
    pub success: bool,
    pub err: String,
    pub total_income: f64,
    pub total_count: u64,
    pub average_income: f64,
    pub by_client: Vec<ClientIncomeItem>,
}

#[derive(Default, Serialize)]
pub struct UpcomingResponse {
    pub success: bool,
    pub err: String,
    pub count: i64,
}

#[derive(Default, Serialize)]
pub struct SmsResponse {
    pub success: bool,
    pub err: String,
    pub content: String,
}

crate::impl_err_response! {
    SaveAppointmentResponse,
    ViewAppointmentResponse,
    SearchAppointmentResponse,
    CheckAppointmentResponse,
    IncomeStatsResponse,
    UpcomingResponse,
    SmsResponse,
}
