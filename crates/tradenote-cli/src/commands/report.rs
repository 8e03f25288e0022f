//! 요약, 차트 데이터, 반복 사유 보고.

use anyhow::Result;
use serde::Serialize;
use tradenote_analytics::{
    group_by_instrument, repeating_reasons, sum_profit, ChartData, ReasonKind, ReasonPattern,
    WindowSummary,
};
use tradenote_core::AggregationWindow;

use super::output::{format_json, format_won, truncate, OutputFormat};
use crate::context::JournalContext;

/// 기간 요약을 출력합니다. 기간을 지정하지 않으면 오늘/이번 달/전체를 모두 보여줍니다.
pub fn summary(
    ctx: &JournalContext,
    window: Option<AggregationWindow>,
    format: OutputFormat,
) -> Result<String> {
    let windows = match window {
        Some(window) => vec![window],
        None => vec![
            AggregationWindow::Today,
            AggregationWindow::ThisMonth,
            AggregationWindow::All,
        ],
    };

    let summaries: Vec<WindowSummary> = windows
        .into_iter()
        .map(|w| WindowSummary::from_records(w, &ctx.ledger.query(w)))
        .collect();

    match format {
        OutputFormat::Json => format_json(&summaries),
        OutputFormat::Table => {
            let mut output = format!(
                "{:<8} {:>6} {:>16} {:>4} {:>4} {:>4} {:>8}\n",
                "WINDOW", "TRADES", "PROFIT", "W", "D", "L", "WIN%"
            );
            output.push_str(&"-".repeat(58));
            for s in &summaries {
                output.push_str(&format!(
                    "\n{:<8} {:>6} {:>16} {:>4} {:>4} {:>4} {:>7}%",
                    s.window.label(),
                    s.trade_count,
                    format_won(s.total_profit),
                    s.wins,
                    s.draws,
                    s.losses,
                    s.win_rate_pct.to_string()
                ));
            }
            Ok(output)
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartReport<'a> {
    window: AggregationWindow,
    total: i64,
    #[serde(flatten)]
    data: &'a ChartData,
}

/// 기간의 종목별 손익 비율을 출력합니다.
pub fn chart(ctx: &JournalContext, window: AggregationWindow, format: OutputFormat) -> Result<String> {
    let records = ctx.ledger.query(window);
    let total = sum_profit(&records);
    let data = ctx.palette.build(&group_by_instrument(&records), total);

    if format == OutputFormat::Json {
        return format_json(&ChartReport {
            window,
            total,
            data: &data,
        });
    }

    if data.is_empty() {
        return Ok(format!("{} 매매내역이 없습니다.", window.label()));
    }

    let mut output = format!(
        "{} 손익 {}\n{:<20} {:>16} {:>8} {:>8}  {}\n",
        window.label(),
        format_won(total),
        "STOCK",
        "PROFIT",
        "SHARE",
        "OFFSET",
        "COLOR"
    );
    output.push_str(&"-".repeat(66));
    for slice in &data.slices {
        output.push_str(&format!(
            "\n{:<20} {:>16} {:>7.1}% {:>7.1}%  {}",
            truncate(&slice.instrument, 20),
            format_won(slice.profit),
            slice.share * 100.0,
            slice.cumulative_offset * 100.0,
            slice.color
        ));
    }

    Ok(output)
}

/// 반복되는 익절/손절 사유를 출력합니다.
pub fn reasons(
    ctx: &JournalContext,
    kind: ReasonKind,
    window: AggregationWindow,
    format: OutputFormat,
) -> Result<String> {
    let patterns: Vec<ReasonPattern> = repeating_reasons(&ctx.ledger.query(window), kind);

    if format == OutputFormat::Json {
        return format_json(&patterns);
    }

    let title = match kind {
        ReasonKind::Loss => "반복되는 손절 사유",
        ReasonKind::Profit => "반복되는 익절 사유",
    };

    if patterns.is_empty() {
        return Ok(format!("{}: 2회 이상 반복된 사유가 없습니다.", title));
    }

    let mut output = format!("{} ({})", title, window.label());
    for (rank, pattern) in patterns.iter().enumerate() {
        output.push_str(&format!(
            "\n{:>2}. {} ({}회)",
            rank + 1,
            pattern.pattern,
            pattern.count
        ));
    }
    Ok(output)
}
