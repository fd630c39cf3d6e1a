use anyhow::bail;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    ZhTw,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::ZhTw => "zh-TW",
            Language::En => "en",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "zh-TW" => Ok(Language::ZhTw),
            "en" => Ok(Language::En),
            _ => bail!("unknown language: {}", s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

impl DateFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "MM/dd/yyyy",
            DateFormat::DayMonthYear => "dd/MM/yyyy",
            DateFormat::YearMonthDay => "yyyy/MM/dd",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::DayMonthYear => "%d/%m/%Y",
            DateFormat::YearMonthDay => "%Y/%m/%d",
        }
    }

    fn short_pattern(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "%m/%d",
            _ => "%d/%m",
        }
    }
}

impl std::str::FromStr for DateFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "MM/dd/yyyy" => Ok(DateFormat::MonthDayYear),
            "dd/MM/yyyy" => Ok(DateFormat::DayMonthYear),
            "yyyy/MM/dd" => Ok(DateFormat::YearMonthDay),
            _ => bail!("unknown date format: {}", s),
        }
    }
}

/// How times are shown to the driver. Stored times are UTC; `offset` is the
/// driver's local zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySettings {
    pub language: Language,
    pub date_format: DateFormat,
    pub offset: FixedOffset,
}

impl DisplaySettings {
    pub fn with_overrides(
        &self,
        language: Option<&str>,
        date_format: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut settings = *self;
        if let Some(language) = language {
            settings.language = language.parse()?;
        }
        if let Some(date_format) = date_format {
            settings.date_format = date_format.parse()?;
        }
        Ok(settings)
    }

    pub fn local(&self, utc: &NaiveDateTime) -> DateTime<FixedOffset> {
        self.offset.from_utc_datetime(utc)
    }

    pub fn format_date(&self, utc: &NaiveDateTime) -> String {
        self.local(utc)
            .format(self.date_format.pattern())
            .to_string()
    }

    pub fn format_date_time(&self, utc: &NaiveDateTime) -> String {
        self.local(utc)
            .format(&format!("{} %H:%M", self.date_format.pattern()))
            .to_string()
    }

    pub fn format_short_date(&self, utc: &NaiveDateTime) -> String {
        self.local(utc)
            .format(&format!("{} %H:%M", self.date_format.short_pattern()))
            .to_string()
    }

    /// UTC bounds of a local calendar day, both inclusive.
    pub fn day_bounds(&self, date: NaiveDate) -> anyhow::Result<(NaiveDateTime, NaiveDateTime)> {
        let start = date.and_hms_opt(0, 0, 0);
        let end = date.and_hms_opt(23, 59, 59);
        match (start, end) {
            (Some(start), Some(end)) => Ok((
                self.to_utc(&start)?,
                self.to_utc(&end)?,
            )),
            _ => bail!("invalid date: {}", date),
        }
    }

    pub fn to_utc(&self, local: &NaiveDateTime) -> anyhow::Result<NaiveDateTime> {
        match self.offset.from_local_datetime(local).single() {
            Some(t) => Ok(t.naive_utc()),
            None => bail!("ambiguous local time: {}", local),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taipei() -> DisplaySettings {
        DisplaySettings {
            language: Language::ZhTw,
            date_format: DateFormat::MonthDayYear,
            offset: FixedOffset::east_opt(8 * 3600).unwrap(),
        }
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn formats_follow_date_format() {
        let mut s = taipei();
        let t = utc(2025, 1, 9, 17, 5);
        assert_eq!(s.format_date(&t), "01/10/2025");
        assert_eq!(s.format_date_time(&t), "01/10/2025 01:05");
        assert_eq!(s.format_short_date(&t), "01/10 01:05");

        s.date_format = DateFormat::DayMonthYear;
        assert_eq!(s.format_date_time(&t), "10/01/2025 01:05");
        assert_eq!(s.format_short_date(&t), "10/01 01:05");

        s.date_format = DateFormat::YearMonthDay;
        assert_eq!(s.format_date(&t), "2025/01/10");
        assert_eq!(s.format_short_date(&t), "10/01 01:05");
    }

    #[test]
    fn day_bounds_shift_by_offset() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let (start, end) = taipei().day_bounds(date).unwrap();
        assert_eq!(start, utc(2025, 1, 9, 16, 0));
        assert_eq!(end, utc(2025, 1, 10, 15, 59) + chrono::Duration::seconds(59));
    }

    #[test]
    fn overrides_parse_names() {
        let s = taipei().with_overrides(Some("en"), Some("dd/MM/yyyy")).unwrap();
        assert_eq!(s.language, Language::En);
        assert_eq!(s.date_format, DateFormat::DayMonthYear);
        assert!(taipei().with_overrides(Some("fr"), None).is_err());
        assert!(taipei().with_overrides(None, Some("yy-MM-dd")).is_err());
    }

    #[test]
    fn names_round_trip() {
        for f in &[
            DateFormat::MonthDayYear,
            DateFormat::DayMonthYear,
            DateFormat::YearMonthDay,
        ] {
            assert_eq!(f.as_str().parse::<DateFormat>().unwrap(), *f);
        }
        assert_eq!("zh-TW".parse::<Language>().unwrap(), Language::ZhTw);
        assert_eq!(Language::En.as_str(), "en");
    }
}
