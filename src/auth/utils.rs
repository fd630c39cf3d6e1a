use actix_web::web;
use anyhow::{bail, Context};
use chrono::Utc;
use diesel::prelude::*;

use crate::{models::driver_logins::DriverLoginData, AppState};

pub const MAX_LOGIN_TIME_SECS: i64 = 30 * 24 * 3600;
pub const MIN_PATTERN_DOTS: usize = 4;
const PATTERN_GRID_DOTS: u8 = 9;

pub async fn get_user_from_token(
    token: String,
    state: &web::Data<AppState>,
) -> anyhow::Result<String> {
    use crate::schema::driver_logins;

    let conn = state.pool.get().context("DB connection error")?;
    let data = web::block(move || {
        driver_logins::table
            .filter(driver_logins::token.eq(token))
            .order(driver_logins::login_time.desc())
            .limit(1)
            .get_result::<DriverLoginData>(&conn)
            .optional()
    })
    .await
    .context("DB error")?;

    if let Some(data) = data {
        let time_diff = Utc::now()
            .naive_utc()
            .signed_duration_since(data.login_time);
        if time_diff.num_seconds() <= MAX_LOGIN_TIME_SECS {
            return Ok(data.user);
        } else {
            bail!("Login has expired");
        }
    } else {
        bail!("Not logged in");
    }
}

/// What the driver logs in with. A password wins when both are sent.
#[derive(Debug, PartialEq, Eq)]
pub enum Credential {
    Password(String),
    Pattern(Vec<u8>),
}

/// Empty fields count as absent.
pub fn pick_credential(
    password: Option<String>,
    pattern: Option<Vec<u8>>,
) -> anyhow::Result<Credential> {
    let password = password.filter(|p| !p.is_empty());
    let pattern = pattern.filter(|p| !p.is_empty());
    match (password, pattern) {
        (Some(password), _) => Ok(Credential::Password(password)),
        (None, Some(pattern)) => Ok(Credential::Pattern(pattern)),
        (None, None) => bail!("Password or pattern required"),
    }
}

/// Checks a pattern-lock sequence and returns its canonical text form.
pub fn encode_pattern(pattern: &[u8]) -> anyhow::Result<String> {
    if pattern.len() < MIN_PATTERN_DOTS {
        bail!("Pattern must have at least {} dots", MIN_PATTERN_DOTS);
    }
    for (i, dot) in pattern.iter().enumerate() {
        if *dot >= PATTERN_GRID_DOTS {
            bail!("Pattern dot out of range: {}", dot);
        }
        if pattern[..i].contains(dot) {
            bail!("Pattern visits dot {} twice", dot);
        }
    }
    Ok(pattern
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns() {
        assert_eq!(encode_pattern(&[0, 1, 2, 5]).unwrap(), "0-1-2-5");
        assert_eq!(encode_pattern(&[8, 4, 0, 3, 6]).unwrap(), "8-4-0-3-6");
        assert!(encode_pattern(&[0, 1, 2]).is_err());
        assert!(encode_pattern(&[0, 1, 2, 9]).is_err());
        assert!(encode_pattern(&[0, 1, 0, 2]).is_err());
        assert!(encode_pattern(&[]).is_err());
    }

    #[test]
    fn empty_password_falls_through_to_pattern() {
        assert_eq!(
            pick_credential(Some("".to_string()), Some(vec![0, 1, 2, 5])).unwrap(),
            Credential::Pattern(vec![0, 1, 2, 5])
        );
        assert_eq!(
            pick_credential(Some("driver123".to_string()), Some(vec![0, 1, 2, 5])).unwrap(),
            Credential::Password("driver123".to_string())
        );
        let err = pick_credential(Some("".to_string()), None).unwrap_err();
        assert_eq!(err.to_string(), "Password or pattern required");
        assert!(pick_credential(None, Some(vec![])).is_err());
    }
}
