//! バックエンドと共有するワイヤ型定義
//!
//! JSONフィールド名はバックエンドのスキーマ(snake_case)に揃える。

use serde::{Deserialize, Serialize};

/// 保存済みエントリ(バックエンド所有、作成後は削除以外不変)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub id: i64,
    pub name: String,
    pub photo_filename: String,
    pub location_lat: f64,
    pub location_lng: f64,
    pub area_name: String,
    pub extracted_text: String,
    /// 表示用時刻文字列(hh:mm:ss am/pm)
    pub timestamp: String,
    /// ISO日付(YYYY-MM-DD)
    pub date: String,
}

/// POST /api/entries のリクエストボディ
///
/// 位置情報が取得できなかった場合は 0.0 / 空文字を送る(nullは送らない)。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub name: String,
    /// Data URL形式の画像
    pub photo: String,
    pub latitude: f64,
    pub longitude: f64,
    pub area_name: String,
    pub extracted_text: String,
    pub timestamp: String,
    pub date: String,
}

/// 技術者名(選択リストの要素)
///
/// エントリは名前を文字列としてコピー保持するため、
/// 改名・削除しても過去のエントリには影響しない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineerName {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deserialize_backend_json() {
        let json = r#"{
            "id": 7,
            "name": "J. Doe",
            "photo_filename": "entry_7.jpg",
            "location_lat": 12.9716,
            "location_lng": 77.5946,
            "area_name": "Main St, Springfield, IL",
            "extracted_text": "Site A-12",
            "timestamp": "09:30:12 am",
            "date": "2026-08-30"
        }"#;

        let entry: Entry = serde_json::from_str(json).expect("deserialize failed");
        assert_eq!(entry.id, 7);
        assert_eq!(entry.name, "J. Doe");
        assert_eq!(entry.photo_filename, "entry_7.jpg");
        assert!((entry.location_lat - 12.9716).abs() < 1e-9);
        assert_eq!(entry.date, "2026-08-30");
    }

    #[test]
    fn test_entry_missing_fields_default() {
        // バックエンドが省略したフィールドはデフォルト値で埋める
        let entry: Entry = serde_json::from_str(r#"{"id": 1, "name": "A"}"#).expect("deserialize failed");
        assert_eq!(entry.location_lat, 0.0);
        assert_eq!(entry.area_name, "");
        assert_eq!(entry.extracted_text, "");
    }

    #[test]
    fn test_entry_draft_serialize_keys() {
        let draft = EntryDraft {
            name: "J. Doe".to_string(),
            photo: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            area_name: String::new(),
            extracted_text: "Site A-12".to_string(),
            timestamp: "09:30:12 am".to_string(),
            date: "2026-08-30".to_string(),
        };

        let json = serde_json::to_string(&draft).expect("serialize failed");
        assert!(json.contains("\"name\":\"J. Doe\""));
        assert!(json.contains("\"photo\":\"data:image/jpeg;base64,/9j/4AAQ\""));
        assert!(json.contains("\"latitude\":0.0"));
        assert!(json.contains("\"longitude\":0.0"));
        assert!(json.contains("\"area_name\":\"\""));
        assert!(json.contains("\"extracted_text\":\"Site A-12\""));
    }

    #[test]
    fn test_engineer_name_roundtrip() {
        let names: Vec<EngineerName> =
            serde_json::from_str(r#"[{"id": 1, "name": "J. Doe"}, {"id": 2, "name": "R. Kumar"}]"#)
                .expect("deserialize failed");
        assert_eq!(names.len(), 2);
        assert_eq!(names[1].name, "R. Kumar");
    }
}
