use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
    /// Pattern lock as the list of dot indices, 0..9 row by row.
    pub pattern: Option<Vec<u8>>,
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub login_token: String,
}

#[derive(Deserialize)]
pub struct PatternStatusRequest {}

#[derive(Deserialize)]
pub struct SetupPatternRequest {
    pub login_token: String,
    pub pattern: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_accepts_either_credential() {
        let req: LoginRequest = serde_json::from_str(r#"{"password":"driver123"}"#).unwrap();
        assert_eq!(req.password.as_deref(), Some("driver123"));
        assert!(req.pattern.is_none());

        let req: LoginRequest = serde_json::from_str(r#"{"pattern":[0,1,2,5]}"#).unwrap();
        assert_eq!(req.pattern, Some(vec![0, 1, 2, 5]));

        let _: PatternStatusRequest = serde_json::from_str("{}").unwrap();
    }
}
