use serde::Serialize;

#[derive(Default, Serialize)]
pub struct AddTypeResponse {
    pub success: bool,
    pub err: String,
    pub id: u64,
}

#[derive(Default, Serialize)]
pub struct TypeItem {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub created_at: String,
}

#[derive(Default, Serialize)]
pub struct SearchTypeResponse {
    pub success: bool,
    pub err: String,
    pub types: Vec<TypeItem>,
}

#[derive(Default, Serialize)]
pub struct ColorItem {
    pub name: String,
    pub value: String,
}

#[derive(Default, Serialize)]
pub struct PaletteResponse {
    pub success: bool,
    pub err: String,
    pub icons: Vec<String>,
    pub colors: Vec<ColorItem>,
}

crate::impl_err_response! {
    AddTypeResponse,
    SearchTypeResponse,
    PaletteResponse,
}
