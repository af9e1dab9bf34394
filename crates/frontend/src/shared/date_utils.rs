//! Date helpers shared by the inbound screens.
//!
//! Input fields work in ISO `YYYY-MM-DD`; tables show `DD.MM.YYYY`.

use chrono::NaiveDate;

/// Today's date in the browser's local time zone.
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_else(|| chrono::Utc::now().date_naive())
}

/// Value for `<input type="date">`.
pub fn to_input(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02"
pub fn format_datetime(raw: &str) -> String {
    let Some((date_part, time_part)) = raw.split_once('T') else {
        return format_date(raw);
    };
    let hm: String = time_part.chars().take(5).collect();
    match parse_input(date_part) {
        Some(d) if hm.len() == 5 => format!("{} {}", d.format("%d.%m.%Y"), hm),
        _ => raw.to_string(),
    }
}

/// "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(raw: &str) -> String {
    let date_part = raw.split('T').next().unwrap_or(raw);
    match parse_input(date_part) {
        Some(d) => d.format("%d.%m.%Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15.03.2024 14:02");
        assert_eq!(format_datetime("2024-12-31"), "31.12.2024");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_invalid_input_passes_through() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(parse_input("2024-02-30"), None);
        assert_eq!(to_input(NaiveDate::from_ymd_opt(2024, 2, 9).unwrap()), "2024-02-09");
    }
}
