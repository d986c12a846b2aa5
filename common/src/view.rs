//! 一覧表示用のビューモデル変換
//!
//! ネットワーク・状態ロジックから切り離した純粋なデータ変換として実装し、
//! ネイティブ環境で単体テストできるようにする。

use crate::types::{EngineerName, Entry};

/// OCRテキストのプレビュー最大文字数
const TEXT_PREVIEW_CHARS: usize = 60;

/// 日付見出しごとのエントリ群
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup {
    pub date: String,
    pub entries: Vec<EntryView>,
}

/// エントリ1件の表示用モデル
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub id: i64,
    pub name: String,
    pub photo_url: String,
    pub timestamp: String,
    /// 地域名、無ければ "lat, lng"
    pub location_label: String,
    pub has_text: bool,
    pub extracted_text: String,
}

impl EntryView {
    fn from_entry(entry: &Entry) -> Self {
        let location_label = if entry.area_name.is_empty() {
            format!("{}, {}", entry.location_lat, entry.location_lng)
        } else {
            entry.area_name.clone()
        };
        Self {
            id: entry.id,
            name: entry.name.clone(),
            photo_url: photo_url(&entry.photo_filename),
            timestamp: entry.timestamp.clone(),
            location_label,
            has_text: !entry.extracted_text.trim().is_empty(),
            extracted_text: entry.extracted_text.clone(),
        }
    }
}

/// 保存画像のURL
pub fn photo_url(photo_filename: &str) -> String {
    format!("/uploads/{}", photo_filename)
}

/// エントリを日付フィールドでグループ化する
///
/// バックエンドの返却順を保つ: 日付見出しは初出順、日付内の並びもそのまま。
pub fn group_by_date(entries: &[Entry]) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    for entry in entries {
        let view = EntryView::from_entry(entry);
        match groups.iter_mut().find(|g| g.date == entry.date) {
            Some(group) => group.entries.push(view),
            None => groups.push(DateGroup {
                date: entry.date.clone(),
                entries: vec![view],
            }),
        }
    }
    groups
}

/// OCRテキストのプレビュー(60文字で切り詰め)
pub fn text_preview(text: &str) -> String {
    if text.chars().count() <= TEXT_PREVIEW_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
    format!("{}...", truncated)
}

/// エクスポートファイル名(当日日付つき)
pub fn export_filename(date: &str) -> String {
    format!("Site_Followup_{}.xlsx", date)
}

/// 名簿リフレッシュ後も直前の選択を維持する
///
/// 以前選択していた名前が新しいリストに残っていればそれを、
/// 消えていれば未選択(空文字)を返す。
pub fn preserve_selection(names: &[EngineerName], previous: &str) -> String {
    if !previous.is_empty() && names.iter().any(|n| n.name == previous) {
        previous.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, date: &str, name: &str) -> Entry {
        Entry {
            id,
            name: name.to_string(),
            photo_filename: format!("entry_{}.jpg", id),
            date: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_group_by_date_preserves_order() {
        let entries = vec![
            entry(3, "2026-08-30", "A"),
            entry(2, "2026-08-30", "B"),
            entry(1, "2026-08-29", "C"),
        ];
        let groups = group_by_date(&entries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, "2026-08-30");
        // 同一日付内の順序はバックエンドの返却順のまま
        assert_eq!(groups[0].entries[0].id, 3);
        assert_eq!(groups[0].entries[1].id, 2);
        assert_eq!(groups[1].date, "2026-08-29");
        assert_eq!(groups[1].entries[0].id, 1);
    }

    #[test]
    fn test_group_by_date_interleaved_dates() {
        // 日付が飛び飛びでも見出しは初出順、各エントリは自分の日付へ
        let entries = vec![
            entry(1, "2026-08-30", "A"),
            entry(2, "2026-08-29", "B"),
            entry(3, "2026-08-30", "C"),
        ];
        let groups = group_by_date(&entries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].entries.len(), 2);
        assert_eq!(groups[0].entries[1].id, 3);
    }

    #[test]
    fn test_group_by_date_empty() {
        assert!(group_by_date(&[]).is_empty());
    }

    #[test]
    fn test_entry_view_location_fallback() {
        let mut e = entry(1, "2026-08-30", "A");
        e.location_lat = 12.5;
        e.location_lng = 77.25;
        let groups = group_by_date(&[e.clone()]);
        assert_eq!(groups[0].entries[0].location_label, "12.5, 77.25");

        e.area_name = "Main St, Springfield, IL".to_string();
        let groups = group_by_date(&[e]);
        assert_eq!(groups[0].entries[0].location_label, "Main St, Springfield, IL");
    }

    #[test]
    fn test_entry_view_has_text() {
        let mut e = entry(1, "2026-08-30", "A");
        e.extracted_text = "   ".to_string();
        let groups = group_by_date(&[e.clone()]);
        assert!(!groups[0].entries[0].has_text);

        e.extracted_text = "Site A-12".to_string();
        let groups = group_by_date(&[e]);
        assert!(groups[0].entries[0].has_text);
    }

    #[test]
    fn test_photo_url() {
        assert_eq!(photo_url("entry_7.jpg"), "/uploads/entry_7.jpg");
    }

    #[test]
    fn test_text_preview_short_unchanged() {
        assert_eq!(text_preview("Site A-12"), "Site A-12");
    }

    #[test]
    fn test_text_preview_truncates_at_60_chars() {
        let long = "x".repeat(61);
        let preview = text_preview(&long);
        assert_eq!(preview.chars().count(), 63);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_text_preview_multibyte_boundary() {
        // バイト境界ではなく文字境界で切る
        let long = "あ".repeat(61);
        let preview = text_preview(&long);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 63);
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("2026-08-30"), "Site_Followup_2026-08-30.xlsx");
    }

    #[test]
    fn test_preserve_selection_kept() {
        let names = vec![
            EngineerName { id: 1, name: "J. Doe".to_string() },
            EngineerName { id: 2, name: "R. Kumar".to_string() },
        ];
        assert_eq!(preserve_selection(&names, "R. Kumar"), "R. Kumar");
    }

    #[test]
    fn test_preserve_selection_dropped() {
        let names = vec![EngineerName { id: 1, name: "J. Doe".to_string() }];
        assert_eq!(preserve_selection(&names, "Removed"), "");
        assert_eq!(preserve_selection(&names, ""), "");
    }
}
