use serde::Deserialize;

#[derive(Deserialize)]
pub struct AddTypeRequest {
    pub login_token: String,
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchTypeRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct ModifyTypeRequest {
    pub login_token: String,
    pub id: u64,
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteTypeRequest {
    pub login_token: String,
    pub id: u64,
}

#[derive(Deserialize)]
pub struct PaletteRequest {}
