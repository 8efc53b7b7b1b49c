use chrono::NaiveDate;

/// Fast parse of an `"M/D/YY"` date column header → `NaiveDate`.
///
/// Month and day are unpadded in the source headers (`"1/22/20"`), the year
/// is always two digits. Returns `None` for anything else.
pub fn parse_date_header(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('/');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let yy = parts.next()?;
    if parts.next().is_some() || yy.len() != 2 {
        return None;
    }
    let yy: i32 = yy.parse().ok()?;
    // same pivot chrono uses for %y: 00-68 → 20xx, 69-99 → 19xx
    let year = if yy <= 68 { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year, month, day)
}
