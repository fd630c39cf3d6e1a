use serde::Deserialize;

#[derive(Deserialize)]
pub struct ViewTemplateRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct ModifyTemplateRequest {
    pub login_token: String,
    pub fields: Vec<String>,
}
