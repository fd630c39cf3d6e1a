use serde::Serialize;

#[derive(Default, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub err: String,
    pub login_token: String,
}

#[derive(Default, Serialize)]
pub struct PatternStatusResponse {
    pub success: bool,
    pub err: String,
    pub has_pattern: bool,
}

crate::impl_err_response! {
    LoginResponse,
    PatternStatusResponse,
}
