use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use anyhow::{anyhow, Result};

/// Parses a day typed by the user, relative to the local calendar day.
pub fn parse_human_date(input: &str) -> Result<NaiveDate> {
    parse_human_date_from(input, Local::now().date_naive())
}

/// Same as [`parse_human_date`] with an explicit anchor day.
///
/// Accepts `today`, `yesterday`, `tomorrow`, `+Nd`/`-Nd`/`+Nw`/`-Nw`,
/// weekday names (`fri` is the most recent Friday, today included; `2:fri`
/// the one before), `YYYY-MM-DD` and `dd.mm.yyyy`.
pub fn parse_human_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => return Ok(today - Duration::days(1)),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    // 2. Relative format (+Nd, -Nw)
    if input.starts_with('+') || input.starts_with('-') {
        return parse_relative(input, today);
    }

    // 3. Standard formats
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%d.%m.%Y") {
        return Ok(d);
    }

    // 4. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target) = parse_weekday_str(day_str) {
            if count < 1 {
                return Err(anyhow!("Weekday count must be at least 1: {}", input));
            }
            let mut days_back = today.weekday().num_days_from_monday() as i64
                - target.num_days_from_monday() as i64;
            if days_back < 0 {
                days_back += 7;
            }
            let offset = (count - 1)
                .checked_mul(7)
                .and_then(|weeks| weeks.checked_add(days_back))
                .and_then(Duration::try_days);
            return offset
                .and_then(|offset| today.checked_sub_signed(offset))
                .ok_or_else(|| anyhow!("Date out of range: {}", input));
        }
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn parse_relative(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let sign: i64 = if input.starts_with('-') { -1 } else { 1 };
    let body = &input[1..];
    if body.len() < 2 {
        return Err(anyhow!("Invalid relative format: {}", input));
    }
    let Some((unit_start, _)) = body.char_indices().last() else {
        return Err(anyhow!("Invalid relative format: {}", input));
    };
    let (num_str, unit) = body.split_at(unit_start);
    let count: i64 = num_str.parse().map_err(|_| anyhow!("Invalid relative format: {}", input))?;

    let signed = count.checked_mul(sign);
    let offset = match unit.to_lowercase().as_str() {
        "d" => signed.and_then(Duration::try_days),
        "w" => signed.and_then(Duration::try_weeks),
        _ => return Err(anyhow!("Unknown unit in relative time: {}", unit)),
    };
    offset
        .and_then(|offset| today.checked_add_signed(offset))
        .ok_or_else(|| anyhow!("Date out of range: {}", input))
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    if input.contains(':') {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() == 2 {
            if let Ok(count) = parts[0].parse::<i64>() {
                return Some((count, parts[1]));
            }
        }
    } else {
        // Just "fri" means 1:fri
        return Some((1, input));
    }
    None
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-01-15 is a Wednesday.
    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_weekday_token() {
        assert_eq!(parse_weekday_token("fri"), Some((1, "fri")));
        assert_eq!(parse_weekday_token("2:fri"), Some((2, "fri")));
        assert_eq!(parse_weekday_token("10:mon"), Some((10, "mon")));
        assert_eq!(parse_weekday_token("invalid"), Some((1, "invalid"))); // will fail later at weekday parse
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_human_date_from("today", anchor()).unwrap(), d("2025-01-15"));
        assert_eq!(parse_human_date_from("yesterday", anchor()).unwrap(), d("2025-01-14"));
        assert_eq!(parse_human_date_from("TOM", anchor()).unwrap(), d("2025-01-16"));
    }

    #[test]
    fn test_relative() {
        assert_eq!(parse_human_date_from("+3d", anchor()).unwrap(), d("2025-01-18"));
        assert_eq!(parse_human_date_from("-20d", anchor()).unwrap(), d("2024-12-26"));
        assert_eq!(parse_human_date_from("-1w", anchor()).unwrap(), d("2025-01-08"));
        assert!(parse_human_date_from("+d", anchor()).is_err());
        assert!(parse_human_date_from("+3y", anchor()).is_err());
    }

    #[test]
    fn test_relative_rejects_multibyte_unit() {
        assert!(parse_human_date_from("+3é", anchor()).is_err());
        assert!(parse_human_date_from("-é", anchor()).is_err());
    }

    #[test]
    fn test_out_of_range_offsets_are_errors() {
        assert!(parse_human_date_from("+99999999d", anchor()).is_err());
        assert!(parse_human_date_from("-99999999w", anchor()).is_err());
        assert!(parse_human_date_from("+9223372036854775807w", anchor()).is_err());
        assert!(parse_human_date_from("99999999999:fri", anchor()).is_err());
        assert!(parse_human_date_from("9223372036854775807:fri", anchor()).is_err());
        assert!(parse_human_date_from("--9223372036854775808d", anchor()).is_err());
    }

    #[test]
    fn test_standard_formats() {
        assert_eq!(parse_human_date_from("2025-09-09", anchor()).unwrap(), d("2025-09-09"));
        assert_eq!(parse_human_date_from("15.01.2026", anchor()).unwrap(), d("2026-01-15"));
        assert!(parse_human_date_from("2025-13-01", anchor()).is_err());
    }

    #[test]
    fn test_weekdays_look_back() {
        assert_eq!(parse_human_date_from("wed", anchor()).unwrap(), d("2025-01-15"));
        assert_eq!(parse_human_date_from("mon", anchor()).unwrap(), d("2025-01-13"));
        assert_eq!(parse_human_date_from("fri", anchor()).unwrap(), d("2025-01-10"));
        assert_eq!(parse_human_date_from("2:fri", anchor()).unwrap(), d("2025-01-03"));
        assert!(parse_human_date_from("0:fri", anchor()).is_err());
        assert!(parse_human_date_from("someday", anchor()).is_err());
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(d("2025-01-18")));
        assert!(is_weekend(d("2025-01-19")));
        assert!(!is_weekend(d("2025-01-20")));
    }
}
