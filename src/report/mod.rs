pub mod income;
pub mod sms;
