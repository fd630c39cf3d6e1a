use serde::Serialize;

#[derive(Default, Serialize)]
pub struct ViewTemplateResponse {
    pub success: bool,
    pub err: String,
    pub greeting: String,
    pub fields: Vec<String>,
    pub closing: String,
}

crate::impl_err_response! {
    ViewTemplateResponse,
}
