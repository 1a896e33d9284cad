// src/process/months.rs

use chrono::Month;

/// The twelve month columns of a BFS wide table, in calendar order.
pub const MONTH_COLUMNS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Calendar months aligned index-for-index with `MONTH_COLUMNS`.
pub const CALENDAR: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Column name for a month, e.g. `Month::March` → `"mar"`.
pub fn column_for_month(month: Month) -> &'static str {
    MONTH_COLUMNS[month.number_from_month() as usize - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_lines_up_with_column_names() {
        for (idx, (col, month)) in MONTH_COLUMNS.iter().zip(CALENDAR).enumerate() {
            assert_eq!(month.number_from_month() as usize, idx + 1);
            assert_eq!(column_for_month(month), *col);
        }
    }
}
