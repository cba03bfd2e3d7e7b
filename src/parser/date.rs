/// Maps a free-text date label to canonical `YYYY-MM-DD`.
///
/// Recognized patterns, first match wins: `D.M.YYYY`, `D.M.YY` (assumed
/// 20YY), and `D.M` with the supplied year. `/` works as a separator
/// wherever `.` does. Anything else comes back as the trimmed input, which
/// downstream treats as an opaque label rather than an error.
pub fn normalize_date(raw: &str, current_year: i32) -> String {
    let cleaned = raw.trim();
    let parts: Vec<&str> = cleaned.split(['.', '/']).collect();

    match parts.as_slice() {
        [day, month, year] if day_or_month(day) && day_or_month(month) && digits(year, 4) => {
            format!("{year}-{month:0>2}-{day:0>2}")
        }
        [day, month, year] if day_or_month(day) && day_or_month(month) && digits(year, 2) => {
            format!("20{year}-{month:0>2}-{day:0>2}")
        }
        [day, month] if day_or_month(day) && day_or_month(month) => {
            format!("{current_year}-{month:0>2}-{day:0>2}")
        }
        _ => cleaned.to_string(),
    }
}

fn day_or_month(part: &str) -> bool {
    (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
}

fn digits(part: &str, count: usize) -> bool {
    part.len() == count && part.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_year() {
        assert_eq!(normalize_date("5.3.2024", 2026), "2024-03-05");
        assert_eq!(normalize_date("15/12/2024", 2026), "2024-12-15");
    }

    #[test]
    fn test_two_digit_year_assumes_2000s() {
        assert_eq!(normalize_date("5/3/24", 2026), "2024-03-05");
    }

    #[test]
    fn test_missing_year_uses_supplied_year() {
        assert_eq!(normalize_date("5.3", 2026), "2026-03-05");
    }

    #[test]
    fn test_unrecognized_label_passes_through() {
        assert_eq!(normalize_date("not-a-date", 2026), "not-a-date");
        assert_eq!(normalize_date("  итог  ", 2026), "итог");
    }

    #[test]
    fn test_three_digit_year_is_not_a_date() {
        assert_eq!(normalize_date("5.3.202", 2026), "5.3.202");
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(normalize_date("", 2026), "");
    }
}
