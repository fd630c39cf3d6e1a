use anyhow::bail;
use chrono::NaiveDateTime;

use crate::{
    display::{DisplaySettings, Language},
    models::appointments::Appointment,
};

/// One line of a client reminder text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsField {
    ClientName,
    Type,
    PickupTime,
    PickupLocation,
    ArrivalTime,
    ArrivalLocation,
    FlightInfo,
    LuggagePassengers,
    OtherDetails,
}

pub const ALL_FIELDS: [SmsField; 9] = [
    SmsField::ClientName,
    SmsField::Type,
    SmsField::PickupTime,
    SmsField::PickupLocation,
    SmsField::ArrivalTime,
    SmsField::ArrivalLocation,
    SmsField::FlightInfo,
    SmsField::LuggagePassengers,
    SmsField::OtherDetails,
];

impl SmsField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmsField::ClientName => "client_name",
            SmsField::Type => "type",
            SmsField::PickupTime => "pickup_time",
            SmsField::PickupLocation => "pickup_location",
            SmsField::ArrivalTime => "arrival_time",
            SmsField::ArrivalLocation => "arrival_location",
            SmsField::FlightInfo => "flight_info",
            SmsField::LuggagePassengers => "luggage_passengers",
            SmsField::OtherDetails => "other_details",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::ZhTw, SmsField::ClientName) => "客戶",
            (Language::ZhTw, SmsField::Type) => "類型",
            (Language::ZhTw, SmsField::PickupTime) => "接客時間",
            (Language::ZhTw, SmsField::PickupLocation) => "接客地點",
            (Language::ZhTw, SmsField::ArrivalTime) => "抵達時間",
            (Language::ZhTw, SmsField::ArrivalLocation) => "抵達地點",
            (Language::ZhTw, SmsField::FlightInfo) => "航班資訊",
            (Language::ZhTw, SmsField::LuggagePassengers) => "行李/人數",
            (Language::ZhTw, SmsField::OtherDetails) => "備註",
            (Language::En, SmsField::ClientName) => "Client",
            (Language::En, SmsField::Type) => "Type",
            (Language::En, SmsField::PickupTime) => "Pickup time",
            (Language::En, SmsField::PickupLocation) => "Pickup location",
            (Language::En, SmsField::ArrivalTime) => "Arrival time",
            (Language::En, SmsField::ArrivalLocation) => "Arrival location",
            (Language::En, SmsField::FlightInfo) => "Flight",
            (Language::En, SmsField::LuggagePassengers) => "Luggage/Passengers",
            (Language::En, SmsField::OtherDetails) => "Notes",
        }
    }

    /// Whether a blank line goes before this field's line.
    fn opens_block(&self) -> bool {
        matches!(
            self,
            SmsField::PickupTime
                | SmsField::ArrivalTime
                | SmsField::FlightInfo
                | SmsField::OtherDetails
        )
    }
}

impl std::str::FromStr for SmsField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match ALL_FIELDS.iter().find(|field| field.as_str() == s) {
            Some(field) => Ok(*field),
            None => bail!("unknown SMS field: {}", s),
        }
    }
}

/// Parses field names, dropping repeats after the first.
pub fn normalize_fields<S: AsRef<str>>(names: &[S]) -> anyhow::Result<Vec<SmsField>> {
    let mut fields = Vec::with_capacity(names.len());
    for name in names {
        let field = name.as_ref().trim().parse::<SmsField>()?;
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    Ok(fields)
}

/// Column encoding of a field list.
pub fn join_fields(fields: &[SmsField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn split_fields(stored: &str) -> anyhow::Result<Vec<SmsField>> {
    let names: Vec<&str> = stored.split(',').filter(|s| !s.trim().is_empty()).collect();
    normalize_fields(&names)
}

pub fn greeting(language: Language) -> &'static str {
    match language {
        Language::ZhTw => "您好，以下是我們接下來的行程：",
        Language::En => "Hello, here are the details of your upcoming trip:",
    }
}

pub fn closing(language: Language) -> &'static str {
    match language {
        Language::ZhTw => "期待為您服務！",
        Language::En => "We look forward to serving you!",
    }
}

fn format_time(time: &NaiveDateTime, settings: &DisplaySettings) -> String {
    match settings.language {
        Language::ZhTw => settings
            .local(time)
            .format("%Y年%m月%d日 %H:%M")
            .to_string(),
        Language::En => settings.format_date_time(time),
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Renders the reminder text for one appointment. Empty optional fields and an
/// unknown type are left out.
pub fn render(
    appo: &Appointment,
    type_name: Option<&str>,
    fields: &[SmsField],
    settings: &DisplaySettings,
) -> String {
    let language = settings.language;
    let mut text = String::new();
    text.push_str(greeting(language));
    text.push_str("\n\n");

    let mut written = false;
    for field in fields {
        let value = match field {
            SmsField::ClientName => Some(appo.client_name.clone()),
            SmsField::Type => type_name
                .filter(|name| !name.is_empty())
                .map(|name| name.to_string()),
            SmsField::PickupTime => Some(format_time(&appo.pickup_time, settings)),
            SmsField::PickupLocation => Some(appo.pickup_location.clone()),
            SmsField::ArrivalTime => Some(format_time(&appo.arrival_time, settings)),
            SmsField::ArrivalLocation => Some(appo.arrival_location.clone()),
            SmsField::FlightInfo => present(&appo.flight_info),
            SmsField::LuggagePassengers => present(&appo.luggage_passengers),
            SmsField::OtherDetails => present(&appo.other_details),
        };
        let value = match value {
            Some(value) => value,
            None => continue,
        };

        if written && field.opens_block() {
            text.push('\n');
        }
        written = true;

        match language {
            Language::ZhTw => text.push_str(&format!("【{}】{}\n", field.label(language), value)),
            Language::En => text.push_str(&format!("{}: {}\n", field.label(language), value)),
        }
    }

    text.push('\n');
    text.push_str(closing(language));
    text
}
