use crate::{
    overlap::{Booked, Span},
    schema::appointments,
};
use anyhow::bail;
use chrono::NaiveDateTime;

#[derive(Queryable, Clone, Debug, PartialEq)]
pub struct Appointment {
    pub id: u64,
    pub client_name: String,
    pub pickup_time: NaiveDateTime,
    pub pickup_location: String,
    pub arrival_time: NaiveDateTime,
    pub arrival_location: String,
    pub appointment_type_id: u64,
    pub flight_info: Option<String>,
    pub luggage_passengers: Option<String>,
    pub other_details: Option<String>,
    pub amount: f64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Appointment {
    pub fn booked(&self) -> Booked {
        Booked {
            id: self.id,
            span: Span::new(self.pickup_time, self.arrival_time),
        }
    }
}

#[derive(Insertable)]
#[table_name = "appointments"]
pub struct NewAppointment {
    pub client_name: String,
    pub pickup_time: NaiveDateTime,
    pub pickup_location: String,
    pub arrival_time: NaiveDateTime,
    pub arrival_location: String,
    pub appointment_type_id: u64,
    pub flight_info: Option<String>,
    pub luggage_passengers: Option<String>,
    pub other_details: Option<String>,
    pub amount: f64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Default)]
#[table_name = "appointments"]
pub struct UpdateAppointment {
    pub client_name: Option<String>,
    pub pickup_time: Option<NaiveDateTime>,
    pub pickup_location: Option<String>,
    pub arrival_time: Option<NaiveDateTime>,
    pub arrival_location: Option<String>,
    pub appointment_type_id: Option<u64>,
    pub flight_info: Option<String>,
    pub luggage_passengers: Option<String>,
    pub other_details: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "in_progress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => bail!("unknown status: {}", s),
        }
    }
}

pub fn check_amount(amount: f64) -> anyhow::Result<f64> {
    if !amount.is_finite() || amount < 0.0 {
        bail!("amount must be a non-negative number");
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_round_trip() {
        for status in &[
            AppointmentStatus::Scheduled,
            AppointmentStatus::InProgress,
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<AppointmentStatus>().unwrap(), *status);
        }
        assert!("done".parse::<AppointmentStatus>().is_err());
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
    }

    #[test]
    fn amounts() {
        assert_eq!(check_amount(0.0).unwrap(), 0.0);
        assert_eq!(check_amount(1500.5).unwrap(), 1500.5);
        assert!(check_amount(-1.0).is_err());
        assert!(check_amount(f64::NAN).is_err());
        assert!(check_amount(f64::INFINITY).is_err());
    }
}
