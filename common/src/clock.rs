//! 表示用の時刻・日付文字列整形
//!
//! 実時刻の取得はブラウザ側(js_sys::Date)が行い、ここは整形のみを担う。

/// 12時間制の表示用時刻文字列(hh:mm:ss am/pm)
pub fn timestamp_display(hours: u32, minutes: u32, seconds: u32) -> String {
    let meridiem = if hours < 12 { "am" } else { "pm" };
    let display_hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!(
        "{:02}:{:02}:{:02} {}",
        display_hours, minutes, seconds, meridiem
    )
}

/// ISO日付文字列(YYYY-MM-DD)
pub fn iso_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_display_morning() {
        assert_eq!(timestamp_display(9, 5, 4), "09:05:04 am");
    }

    #[test]
    fn test_timestamp_display_afternoon() {
        assert_eq!(timestamp_display(15, 30, 12), "03:30:12 pm");
    }

    #[test]
    fn test_timestamp_display_midnight_and_noon() {
        assert_eq!(timestamp_display(0, 0, 0), "12:00:00 am");
        assert_eq!(timestamp_display(12, 0, 0), "12:00:00 pm");
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(iso_date(2026, 8, 30), "2026-08-30");
        assert_eq!(iso_date(2026, 12, 1), "2026-12-01");
    }
}
