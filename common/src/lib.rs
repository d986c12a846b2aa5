//! Site Follow-up Common Library
//!
//! Web(WASM)クライアントから利用されるドメインロジック:
//! - types: バックエンドと共有するワイヤ型
//! - session: 撮影セッション状態機械
//! - geocode: 逆ジオコーディング結果からの地域文字列導出
//! - view: 一覧表示用のビューモデル変換
//! - clock: 表示用の時刻・日付整形

pub mod clock;
pub mod error;
pub mod geocode;
pub mod session;
pub mod types;
pub mod view;

pub use error::{Error, Result};
pub use geocode::{derive_area, GeoAddress, ReverseGeocodeResponse};
pub use session::{CaptureOrigin, CaptureSession, CaptureState, ResolvedLocation};
pub use types::{EngineerName, Entry, EntryDraft};
pub use view::{group_by_date, DateGroup, EntryView};
