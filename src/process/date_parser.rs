use chrono::{Month, NaiveDate};

use super::utils::clean_str;

/// Parse a BFS `year` cell. Integral floats (`"2004.0"`) are accepted since
/// spreadsheet exports sometimes write years that way.
pub fn parse_year(raw: &str) -> Option<i32> {
    let s = clean_str(raw);
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let f = s.parse::<f64>().ok()?;
    if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 {
        Some(f as i32)
    } else {
        None
    }
}

/// Fast build of `"YYYY-MM-01"` from a year cell + month → NaiveDate.
pub fn month_start(year_raw: &str, month: Month) -> Option<NaiveDate> {
    let year = parse_year(year_raw)?;
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_first_of_month() {
        assert_eq!(
            month_start("2021", Month::March),
            NaiveDate::from_ymd_opt(2021, 3, 1)
        );
        assert_eq!(
            month_start("2004.0", Month::December),
            NaiveDate::from_ymd_opt(2004, 12, 1)
        );
    }

    #[test]
    fn rejects_unparseable_years() {
        assert_eq!(month_start("", Month::January), None);
        assert_eq!(month_start("nan", Month::January), None);
        assert_eq!(month_start("2004.5", Month::January), None);
        assert_eq!(month_start("99999999", Month::January), None);
    }
}
