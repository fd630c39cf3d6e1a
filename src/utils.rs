#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    state: web::Data<AppState>,
                    info: web::Json<$request>
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](state, info).await {
                        Ok(response) => response,
                        Err(err) => {
                            tracing::warn!(endpoint = $url, "request failed: {:#}", err);
                            $response::err(err.to_string())
                        }
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

use anyhow::{bail, Context};
use blake2::{Blake2b, Digest};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::display::DisplaySettings;

/// Parses an RFC 3339 time, or a `datetime-local` value read in the display offset.
/// Fractional seconds are dropped to match the whole-second `DATETIME` columns.
pub fn parse_time_str<S: AsRef<str>>(
    s: S,
    settings: &DisplaySettings,
) -> anyhow::Result<NaiveDateTime> {
    const LOCAL_FMT: &str = "%Y-%m-%dT%H:%M";
    const LOCAL_FMT_SECS: &str = "%Y-%m-%dT%H:%M:%S%.f";

    let s = s.as_ref().trim();
    let time = match DateTime::parse_from_rfc3339(s) {
        Ok(t) => t.naive_utc(),
        Err(_) => {
            let local = NaiveDateTime::parse_from_str(s, LOCAL_FMT_SECS)
                .or_else(|_| NaiveDateTime::parse_from_str(s, LOCAL_FMT))
                .with_context(|| format!("bad time format: {}", s))?;
            settings.to_utc(&local)?
        }
    };
    time.with_nanosecond(0)
        .with_context(|| format!("bad time: {}", s))
}

/// Like [`parse_time_str`], but an unparseable or absent value is just `None`.
pub fn parse_time_str_lenient<S: AsRef<str>>(
    s: Option<S>,
    settings: &DisplaySettings,
) -> Option<NaiveDateTime> {
    s.and_then(|s| parse_time_str(s, settings).ok())
}

pub fn parse_date_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.as_ref().trim(), "%Y-%m-%d")
        .with_context(|| format!("bad date format, expected YYYY-MM-DD: {}", s.as_ref()))
}

/// UTC range covering local `start_date 00:00:00` through `end_date 23:59:59`.
/// A missing bound is open.
pub fn get_time_pair_from_dates_opt<S1: AsRef<str>, S2: AsRef<str>>(
    start_date: Option<S1>,
    end_date: Option<S2>,
    settings: &DisplaySettings,
) -> anyhow::Result<(NaiveDateTime, NaiveDateTime)> {
    let time_min = NaiveDate::from_ymd_opt(1901, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("unknown error")?;
    let time_max = NaiveDate::from_ymd_opt(2901, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("unknown error")?;

    let start_time = match start_date {
        Some(date) => settings.day_bounds(parse_date_str(date)?)?.0,
        None => time_min,
    };
    let end_time = match end_date {
        Some(date) => settings.day_bounds(parse_date_str(date)?)?.1,
        None => time_max,
    };
    if start_time > end_time {
        bail!("start date is after end date");
    }
    Ok((start_time, end_time))
}

pub fn format_time_str(time: &NaiveDateTime) -> String {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    format!("{}+00:00", time.format(TIME_FMT))
}

pub fn get_str_pattern<S: AsRef<str>>(s: S) -> String {
    let escaped = s
        .as_ref()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

pub fn hash_secret<S: AsRef<[u8]>>(secret: S) -> String {
    format!("{:x}", Blake2b::digest(secret.as_ref()))
}

pub fn generate_login_token(user: &str) -> String {
    let now = Utc::now();
    hash_secret(format!(
        "{}:{}:{}",
        user,
        now.timestamp(),
        now.timestamp_subsec_nanos()
    ))
}

/// Empty strings from form fields count as absent.
pub fn non_empty(s: Option<String>) -> Option<String> {
    s.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DateFormat, Language};
    use crate::overlap::{self, Booked, Draft};
    use chrono::FixedOffset;

    fn settings() -> DisplaySettings {
        DisplaySettings {
            language: Language::ZhTw,
            date_format: DateFormat::MonthDayYear,
            offset: FixedOffset::east_opt(8 * 3600).unwrap(),
        }
    }

    fn utc(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn parses_rfc3339() {
        let s = settings();
        assert_eq!(parse_time_str("2025-01-10T09:00:00Z", &s).unwrap(), utc(10, 9, 0));
        assert_eq!(
            parse_time_str("2025-01-10T09:00:00.000Z", &s).unwrap(),
            utc(10, 9, 0)
        );
        assert_eq!(
            parse_time_str("2025-01-10T09:00:00+08:00", &s).unwrap(),
            utc(10, 1, 0)
        );
    }

    #[test]
    fn parses_datetime_local_in_display_offset() {
        let s = settings();
        assert_eq!(parse_time_str("2025-01-10T09:00", &s).unwrap(), utc(10, 1, 0));
        assert_eq!(parse_time_str("2025-01-10T09:00:00", &s).unwrap(), utc(10, 1, 0));
        assert_eq!(parse_time_str("2025-01-10T07:30", &s).unwrap(), utc(9, 23, 30));
    }

    #[test]
    fn drops_fractional_seconds() {
        let s = settings();
        let pickup = parse_time_str("2025-01-10T09:00:00.200Z", &s).unwrap();
        let arrival = parse_time_str("2025-01-10T09:00:00.700Z", &s).unwrap();
        assert_eq!(pickup, utc(10, 9, 0));
        assert_eq!(arrival, utc(10, 9, 0));
        assert_eq!(
            parse_time_str("2025-01-10T17:00:00.999", &s).unwrap(),
            utc(10, 9, 0)
        );

        let draft = Draft {
            id: None,
            pickup: Some(pickup),
            arrival: Some(arrival),
        };
        let verdict = overlap::check(&draft, &[] as &[Booked]);
        assert!(!verdict.valid());
        assert!(verdict.ensure_valid().is_err());
    }

    #[test]
    fn rejects_garbage() {
        let s = settings();
        assert!(parse_time_str("", &s).is_err());
        assert!(parse_time_str("tomorrow", &s).is_err());
        assert!(parse_time_str("2025-13-10T09:00", &s).is_err());
        assert_eq!(parse_time_str_lenient(Some("nope"), &s), None);
        assert_eq!(parse_time_str_lenient::<&str>(None, &s), None);
    }

    #[test]
    fn date_range_is_inclusive_in_local_days() {
        let s = settings();
        let (start, end) =
            get_time_pair_from_dates_opt(Some("2025-01-10"), Some("2025-01-11"), &s).unwrap();
        assert_eq!(start, utc(9, 16, 0));
        assert_eq!(end, utc(11, 15, 59) + chrono::Duration::seconds(59));

        let (start, end) = get_time_pair_from_dates_opt::<&str, &str>(None, None, &s).unwrap();
        assert!(start < utc(1, 0, 0));
        assert!(end > utc(31, 0, 0));

        assert!(get_time_pair_from_dates_opt(Some("2025-01-11"), Some("2025-01-10"), &s).is_err());
        assert!(get_time_pair_from_dates_opt(Some("01/10/2025"), None::<&str>, &s).is_err());
    }

    #[test]
    fn formats_utc() {
        assert_eq!(format_time_str(&utc(10, 9, 0)), "2025-01-10T09:00:00+00:00");
    }

    #[test]
    fn like_patterns_escape_wildcards() {
        assert_eq!(get_str_pattern("wang"), "%wang%");
        assert_eq!(get_str_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn hashes_are_stable_and_tokens_differ() {
        assert_eq!(hash_secret("0-1-2-5"), hash_secret("0-1-2-5"));
        assert_ne!(hash_secret("0-1-2-5"), hash_secret("0-1-2-4"));
        assert_eq!(hash_secret("x").len(), 128);
        let a = generate_login_token("driver");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = generate_login_token("driver");
        assert_ne!(a, b);
    }

    #[test]
    fn blank_fields_are_absent() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some(" CI123 ".to_string())), Some("CI123".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
