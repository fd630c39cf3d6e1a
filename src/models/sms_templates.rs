use crate::schema::sms_templates;
use chrono::NaiveDateTime;

/// There is only one template row.
pub const TEMPLATE_ID: u32 = 1;

#[derive(Queryable, Insertable)]
#[table_name = "sms_templates"]
pub struct SmsTemplateData {
    pub id: u32,
    pub fields: String,
    pub updated_at: NaiveDateTime,
}
