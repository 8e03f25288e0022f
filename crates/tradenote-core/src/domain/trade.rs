//! 매매 기록.
//!
//! 이 모듈은 매매일지의 유일한 엔티티와 입력 타입을 정의합니다:
//! - `TradeRecord` - 저장된 개별 매매 기록 (생성 후 불변)
//! - `TradeDraft` - 사용자가 입력한 기록 초안

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 포지션 방향.
///
/// 미지정은 `Option<Position>`의 `None`으로 표현합니다 (JSON `null`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// 롱 (매수 진입)
    Long,
    /// 숏 (매도 진입)
    Short,
}

impl Position {
    /// 화면 표시용 한글 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            Position::Long => "롱",
            Position::Short => "숏",
        }
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            _ => Err(format!("Unknown position: {}", s)),
        }
    }
}

/// 매매 결과.
///
/// 미지정은 `Option<Outcome>`의 `None`으로 표현합니다 (JSON `null`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// 승
    Win,
    /// 무
    Draw,
    /// 패
    Loss,
}

impl Outcome {
    /// 화면 표시용 한글 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Win => "승",
            Outcome::Draw => "무",
            Outcome::Loss => "패",
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "win" => Ok(Self::Win),
            "draw" => Ok(Self::Draw),
            "loss" => Ok(Self::Loss),
            _ => Err(format!("Unknown outcome: {}", s)),
        }
    }
}

/// 매매 기록 ID.
///
/// 생성 시점에 한 번 부여되며 재사용되거나 재할당되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(String);

impl TradeId {
    /// 문자열로부터 ID를 생성합니다.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// ID 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TradeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TradeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 저장된 매매 기록.
///
/// 한 번 생성된 기록은 수정되지 않고 생성 또는 삭제만 됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRecord")]
pub struct TradeRecord {
    /// 고유 ID
    pub id: TradeId,
    /// 매매 날짜 (사용자 입력, 생성 시각과 무관)
    pub date: NaiveDate,
    /// 종목명
    pub stock: String,
    /// 포지션
    pub position: Option<Position>,
    /// 결과
    pub result: Option<Outcome>,
    /// 손익 (원 단위 정수)
    pub profit: i64,
    /// 차트 이미지 (data URL, 코어에서는 해석하지 않음)
    pub chart_image: Option<String>,
    /// 익절 사유
    pub profit_reason: Option<String>,
    /// 손절 사유
    pub loss_reason: Option<String>,
    /// 생성 시각 (감사용)
    pub created_at: DateTime<Utc>,
}

/// 스냅샷에서 읽은 기록.
///
/// 이전 버전의 스냅샷에는 빈 문자열로 저장된 포지션/결과, 소수나 문자열로 기록된 손익,
/// 양수로 저장된 패배 손익이 있을 수 있습니다. 읽을 때 모두 현재 형식으로 맞춥니다.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    id: TradeId,
    date: NaiveDate,
    #[serde(default)]
    stock: String,
    #[serde(default, deserialize_with = "deserialize_label")]
    position: Option<Position>,
    #[serde(default, deserialize_with = "deserialize_label")]
    result: Option<Outcome>,
    #[serde(default, deserialize_with = "deserialize_profit")]
    profit: i64,
    #[serde(default)]
    chart_image: Option<String>,
    #[serde(default)]
    profit_reason: Option<String>,
    #[serde(default)]
    loss_reason: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<StoredRecord> for TradeRecord {
    fn from(stored: StoredRecord) -> Self {
        Self {
            id: stored.id,
            date: stored.date,
            stock: stored.stock,
            position: stored.position,
            result: stored.result,
            profit: signed_profit(stored.result, stored.profit),
            chart_image: stored.chart_image,
            profit_reason: non_blank(stored.profit_reason),
            loss_reason: non_blank(stored.loss_reason),
            created_at: stored.created_at,
        }
    }
}

impl TradeRecord {
    /// 초안으로부터 기록을 생성합니다.
    ///
    /// 손익은 0 방향으로 절사되며, 결과가 패배인데 손익이 양수이면 부호를 뒤집습니다.
    pub fn from_draft(id: TradeId, draft: TradeDraft, created_at: DateTime<Utc>) -> Self {
        let profit = draft.normalized_profit();

        Self {
            id,
            date: draft.date,
            stock: draft.stock.trim().to_string(),
            position: draft.position,
            result: draft.result,
            profit,
            chart_image: draft.chart_image,
            profit_reason: non_blank(draft.profit_reason),
            loss_reason: non_blank(draft.loss_reason),
            created_at,
        }
    }

    /// 이익 거래인지 확인합니다.
    pub fn is_profitable(&self) -> bool {
        self.profit > 0
    }

    /// 종목명이 비어 있는지 확인합니다.
    pub fn is_unlabeled(&self) -> bool {
        self.stock.trim().is_empty()
    }
}

/// 사용자가 입력한 기록 초안.
///
/// ID와 생성 시각은 원장이 부여하므로 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDraft {
    /// 매매 날짜
    pub date: NaiveDate,
    /// 종목명
    pub stock: String,
    /// 포지션
    #[serde(default)]
    pub position: Option<Position>,
    /// 결과
    #[serde(default)]
    pub result: Option<Outcome>,
    /// 손익 (소수 입력 허용, 생성 시 절사)
    #[serde(default)]
    pub profit: Decimal,
    /// 차트 이미지
    #[serde(default)]
    pub chart_image: Option<String>,
    /// 익절 사유
    #[serde(default)]
    pub profit_reason: Option<String>,
    /// 손절 사유
    #[serde(default)]
    pub loss_reason: Option<String>,
}

impl TradeDraft {
    /// 새 초안을 생성합니다.
    pub fn new(date: NaiveDate, stock: impl Into<String>) -> Self {
        Self {
            date,
            stock: stock.into(),
            position: None,
            result: None,
            profit: Decimal::ZERO,
            chart_image: None,
            profit_reason: None,
            loss_reason: None,
        }
    }

    /// 포지션을 설정합니다.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// 결과를 설정합니다.
    pub fn with_result(mut self, result: Outcome) -> Self {
        self.result = Some(result);
        self
    }

    /// 손익을 설정합니다.
    pub fn with_profit(mut self, profit: impl Into<Decimal>) -> Self {
        self.profit = profit.into();
        self
    }

    /// 차트 이미지를 설정합니다.
    pub fn with_chart_image(mut self, image: impl Into<String>) -> Self {
        self.chart_image = Some(image.into());
        self
    }

    /// 익절 사유를 설정합니다.
    pub fn with_profit_reason(mut self, reason: impl Into<String>) -> Self {
        self.profit_reason = Some(reason.into());
        self
    }

    /// 손절 사유를 설정합니다.
    pub fn with_loss_reason(mut self, reason: impl Into<String>) -> Self {
        self.loss_reason = Some(reason.into());
        self
    }

    /// 저장될 정수 손익을 계산합니다.
    pub fn normalized_profit(&self) -> i64 {
        let truncated = self.profit.trunc();
        let profit = truncated.to_i64().unwrap_or(if truncated.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        });

        signed_profit(self.result, profit)
    }
}

/// 저장된 손익 값.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredProfit {
    Int(i64),
    Float(f64),
    Text(String),
}

/// 패배 기록의 손익은 항상 0 이하입니다.
fn signed_profit(result: Option<Outcome>, profit: i64) -> i64 {
    if result == Some(Outcome::Loss) && profit > 0 {
        -profit
    } else {
        profit
    }
}

/// 빈 문자열은 미지정(`None`)으로 읽습니다.
fn deserialize_label<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr<Err = String>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => label.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn deserialize_profit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match StoredProfit::deserialize(deserializer)? {
        StoredProfit::Int(value) => Ok(value),
        StoredProfit::Float(value) if value.is_finite() => Ok(value.trunc() as i64),
        StoredProfit::Float(value) => Err(serde::de::Error::custom(format!(
            "non-finite profit: {}",
            value
        ))),
        StoredProfit::Text(text) => text
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|d| d.trunc().to_i64())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid profit: {}", text))),
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// 최신 등록 순으로 정렬된 사본을 반환합니다.
///
/// 생성 시각 내림차순, 같으면 날짜 내림차순이며 그 외에는 입력 순서를 유지합니다.
/// 원장의 저장 순서에는 영향을 주지 않습니다.
pub fn newest_first(records: &[TradeRecord]) -> Vec<TradeRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.date.cmp(&a.date))
    });
    sorted
}
