//! エラー型定義

use thiserror::Error;

/// クライアント共通エラー型
///
/// ユーザー操作(送信・名簿編集・エクスポート)の失敗はトーストで通知し、
/// ベストエフォート処理(位置情報・OCR)の失敗は空状態へ縮退させる。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// 送信前のローカル検証エラー(バックエンドには到達しない)
    #[error("{0}")]
    Validation(String),

    /// 重複(HTTP 409)
    #[error("{0}")]
    Conflict(String),

    /// 対象が存在しない(HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// バックエンド・ネットワーク失敗(status 0 はトランスポート層の失敗)
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// 端末機能が利用できない(位置情報非対応・許可拒否など)
    #[error("{0}")]
    Capability(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let error = Error::Validation("Please select an engineer name".to_string());
        assert_eq!(format!("{}", error), "Please select an engineer name");
    }

    #[test]
    fn test_error_display_backend() {
        let error = Error::Backend {
            status: 500,
            message: "Storage upload failed".to_string(),
        };
        assert_eq!(format!("{}", error), "Storage upload failed");
    }

    #[test]
    fn test_error_display_conflict() {
        let error = Error::Conflict("Name already exists".to_string());
        assert_eq!(format!("{}", error), "Name already exists");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Capability("Geolocation not supported".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Capability"));
        assert!(debug.contains("Geolocation not supported"));
    }
}
