pub mod appointment_types;
pub mod appointments;
pub mod auth_config;
pub mod driver_logins;
pub mod sms_templates;
