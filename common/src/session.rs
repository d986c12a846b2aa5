//! 撮影セッション状態機械
//!
//! 画像取得 → (撮影時のみ)位置解決 → OCR → 確認 → 送信 の一連の流れと
//! 可変セッション状態を一元管理する。インスタンスはプロセス全体で1つ。
//!
//! 非同期の完了順序は保証されないため、各ワークフローには世代番号を付け、
//! 古い世代の位置解決・OCR結果は適用せず破棄する。

use crate::error::{Error, Result};
use crate::types::EntryDraft;

/// 画像の取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOrigin {
    /// カメラ撮影(位置情報を取得する)
    Captured,
    /// ファイルアップロード(位置情報取得をスキップ)
    Uploaded,
}

/// セッションの状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Idle,
    Previewing,
    LocatingAndExtracting,
    ReadyToSubmit,
    Submitting,
}

/// 解決済み位置情報
///
/// 取得できなかった項目はNone/空のまま保持し、送信時に 0.0 / 空文字へ落とす。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedLocation {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub area: String,
}

/// 撮影セッション
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureSession {
    generation: u64,
    state: CaptureState,
    pub photo: Option<String>,
    pub origin: Option<CaptureOrigin>,
    pub extracted_text: String,
    pub location: ResolvedLocation,
}

impl CaptureSession {
    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 指定した世代が現在のワークフローのものか
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// この取得元で位置解決を行うか
    pub fn needs_location(&self) -> bool {
        self.origin == Some(CaptureOrigin::Captured)
    }

    /// 画像取得によるセッション開始(Idle/任意の非送信中状態 → Previewing)
    ///
    /// 前のワークフローが位置解決・OCR中でも新しい取得が置き換える。
    /// 世代番号を進めることで、進行中だった非同期結果は以後適用されない。
    /// 戻り値は新しいワークフローの世代番号。
    pub fn acquire(&mut self, photo: String, origin: CaptureOrigin) -> Result<u64> {
        if self.state == CaptureState::Submitting {
            return Err(Error::Validation("Submission in progress".to_string()));
        }
        self.generation += 1;
        self.state = CaptureState::Previewing;
        self.photo = Some(photo);
        self.origin = Some(origin);
        self.extracted_text.clear();
        self.location = ResolvedLocation::default();
        Ok(self.generation)
    }

    /// Previewing → LocatingAndExtracting(取得直後に自動遷移)
    ///
    /// 世代が古い場合は何もせずfalseを返す。
    pub fn begin_processing(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) || self.state != CaptureState::Previewing {
            return false;
        }
        self.state = CaptureState::LocatingAndExtracting;
        true
    }

    /// 位置解決の完了を反映(ベストエフォート、失敗時は呼ばれない)
    ///
    /// 世代が古い場合は破棄してfalseを返す。
    pub fn location_resolved(&mut self, generation: u64, location: ResolvedLocation) -> bool {
        if !self.is_current(generation) || self.state != CaptureState::LocatingAndExtracting {
            return false;
        }
        self.location = location;
        true
    }

    /// OCR完了を反映し ReadyToSubmit へ遷移
    ///
    /// 成功・空結果・失敗(空文字で呼ぶ)のいずれでも到達する。
    /// テキストは前後の空白をトリムして保持する。
    /// 世代が古い場合は破棄してfalseを返す。
    pub fn extraction_finished(&mut self, generation: u64, text: &str) -> bool {
        if !self.is_current(generation) || self.state != CaptureState::LocatingAndExtracting {
            return false;
        }
        self.extracted_text = text.trim().to_string();
        self.state = CaptureState::ReadyToSubmit;
        true
    }

    /// 送信開始(ReadyToSubmit → Submitting)
    ///
    /// 事前条件(名前選択済み・写真あり)をネットワーク呼び出し前に検証し、
    /// 違反時は状態を変えずにValidationエラーを返す。
    /// 成功時は送信用のEntryDraftを返す。
    pub fn begin_submit(
        &mut self,
        name: &str,
        timestamp: String,
        date: String,
    ) -> Result<EntryDraft> {
        if name.trim().is_empty() {
            return Err(Error::Validation(
                "Please select an engineer name".to_string(),
            ));
        }
        let Some(photo) = self.photo.clone() else {
            return Err(Error::Validation(
                "Please capture or upload a photo first".to_string(),
            ));
        };
        if self.state != CaptureState::ReadyToSubmit {
            return Err(Error::Validation(
                "Photo is still being processed".to_string(),
            ));
        }

        self.state = CaptureState::Submitting;
        Ok(EntryDraft {
            name: name.to_string(),
            photo,
            latitude: self.location.lat.unwrap_or(0.0),
            longitude: self.location.lng.unwrap_or(0.0),
            area_name: self.location.area.clone(),
            extracted_text: self.extracted_text.clone(),
            timestamp,
            date,
        })
    }

    /// 送信成功(Submitting → Idle、セッションを完全リセット)
    pub fn submit_succeeded(&mut self) {
        let generation = self.generation + 1;
        *self = Self::default();
        self.generation = generation;
    }

    /// 送信失敗(Submitting → ReadyToSubmit、状態は保持して再試行可能にする)
    pub fn submit_failed(&mut self) {
        if self.state == CaptureState::Submitting {
            self.state = CaptureState::ReadyToSubmit;
        }
    }

    /// 明示的なクリア(送信中以外の任意の状態 → Idle)
    pub fn clear(&mut self) -> Result<()> {
        if self.state == CaptureState::Submitting {
            return Err(Error::Validation("Submission in progress".to_string()));
        }
        let generation = self.generation + 1;
        *self = Self::default();
        self.generation = generation;
        Ok(())
    }
}
