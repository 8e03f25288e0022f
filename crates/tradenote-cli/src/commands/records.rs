//! 기록 추가/삭제/조회 명령.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};
use tradenote_core::{newest_first, AggregationWindow, Outcome, Position, TradeDraft, TradeRecord};

use super::output::{format_json, format_won, truncate, OutputFormat};
use crate::context::JournalContext;

/// 기록 추가 입력.
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    /// 매매 날짜 (YYYY-MM-DD, 없으면 오늘)
    pub date: Option<String>,
    /// 종목명
    pub stock: String,
    /// 포지션 (long, short)
    pub position: Option<String>,
    /// 결과 (win, draw, loss)
    pub result: Option<String>,
    /// 손익 (소수 허용)
    pub profit: String,
    /// 차트 이미지 파일
    pub chart: Option<PathBuf>,
    /// 익절 사유
    pub profit_reason: Option<String>,
    /// 손절 사유
    pub loss_reason: Option<String>,
}

impl AddRequest {
    /// 입력을 검증해 초안으로 변환합니다.
    pub fn into_draft(self, today: NaiveDate) -> Result<TradeDraft> {
        let date = match self.date.as_deref() {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("Invalid date: {}. Use YYYY-MM-DD", raw))?,
            None => today,
        };

        let profit = if self.profit.trim().is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from_str(self.profit.trim().replace(',', "").as_str())
                .with_context(|| format!("Invalid profit: {}", self.profit))?
        };

        let mut draft = TradeDraft::new(date, self.stock).with_profit(profit);
        if let Some(position) = self.position.as_deref() {
            draft = draft.with_position(Position::from_str(position).map_err(anyhow::Error::msg)?);
        }
        if let Some(result) = self.result.as_deref() {
            draft = draft.with_result(Outcome::from_str(result).map_err(anyhow::Error::msg)?);
        }
        if let Some(path) = self.chart.as_deref() {
            draft = draft.with_chart_image(image_data_url(path)?);
        }
        if let Some(reason) = self.profit_reason {
            draft = draft.with_profit_reason(reason);
        }
        if let Some(reason) = self.loss_reason {
            draft = draft.with_loss_reason(reason);
        }

        Ok(draft)
    }
}

/// 이미지 파일을 data URL로 읽습니다.
pub fn image_data_url(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read chart image: {}", path.display()))?;

    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// 기록을 추가합니다.
pub fn add(ctx: &JournalContext, request: AddRequest) -> Result<String> {
    let draft = request.into_draft(ctx.clock.today())?;
    let recorded = ctx.ledger.add_with_status(draft);

    if !recorded.durable {
        warn!(trade_id = %recorded.record.id, "기록이 디스크에 저장되지 않았을 수 있습니다");
    }

    let record = &recorded.record;
    let mut output = format!(
        "기록 추가: {} {} {} ({})",
        record.date,
        record.stock,
        format_won(record.profit),
        record.id
    );
    if !recorded.durable {
        output.push_str("\n경고: 로컬 저장에 실패했습니다. 이 기록은 유지되지 않을 수 있습니다.");
    }

    Ok(output)
}

/// 기록을 삭제합니다. 없는 ID는 아무것도 하지 않습니다.
pub fn delete(ctx: &JournalContext, id: &str) -> Result<String> {
    let before = ctx.ledger.query_all().len();
    let remaining = ctx.ledger.delete(id);

    if remaining.len() < before {
        info!(trade_id = id, "Record deleted");
        Ok(format!("기록 삭제: {} (남은 기록 {}건)", id, remaining.len()))
    } else {
        Ok(format!("삭제할 기록이 없습니다: {}", id))
    }
}

/// 기간의 기록을 최신순으로 출력합니다.
pub fn list(ctx: &JournalContext, window: AggregationWindow, format: OutputFormat) -> Result<String> {
    let records = newest_first(&ctx.ledger.query(window));

    match format {
        OutputFormat::Json => format_json(&records),
        OutputFormat::Table => Ok(format_table(window, &records)),
    }
}

fn format_table(window: AggregationWindow, records: &[TradeRecord]) -> String {
    if records.is_empty() {
        return format!("{} 매매내역이 없습니다.", window.label());
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12} {:<20} {:<4} {:<4} {:>16}  {:<36}\n",
        "DATE", "STOCK", "POS", "RES", "PROFIT", "ID"
    ));
    output.push_str(&"-".repeat(98));
    output.push('\n');

    for record in records {
        output.push_str(&format!(
            "{:<12} {:<20} {:<4} {:<4} {:>16}  {:<36}\n",
            record.date.to_string(),
            truncate(&record.stock, 20),
            record.position.map(|p| p.label()).unwrap_or("-"),
            record.result.map(|r| r.label()).unwrap_or("-"),
            format_won(record.profit),
            record.id.as_str(),
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {} trades", records.len()));
    output
}
