//! 종목별 손익 비율 차트 데이터.
//!
//! 렌더링 협력자가 다시 계산하지 않고 링/파이 차트를 그릴 수 있도록
//! 정렬, 색상, 비율, 누적 시작 위치가 정해진 조각 목록을 만듭니다.
//!
//! # 비율 정의
//!
//! `share = |종목 손익| / |총 손익|` 입니다. 분모는 종목별 절대값의 합이 아니라
//! 순손익의 절대값이므로, 부호가 섞이면 조각 하나의 비율이 1을 넘을 수 있으며
//! 비율의 합도 1이 아닐 수 있습니다. 값은 잘라내지 않습니다.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// 기본 조각 색상.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#4ac9ff", "#ff5757", "#ffb547", "#6ad88b", "#b38cff", "#ff7eb6", "#2ec4b6", "#9e9e9e",
];

/// 순서가 정해진 색상 팔레트.
///
/// 역직렬화도 [`ChartPalette::new`]를 거치므로 색상 목록은 비어 있지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PaletteColors")]
pub struct ChartPalette {
    colors: Vec<String>,
}

#[derive(Deserialize)]
struct PaletteColors {
    #[serde(default)]
    colors: Vec<String>,
}

impl From<PaletteColors> for ChartPalette {
    fn from(raw: PaletteColors) -> Self {
        ChartPalette::new(raw.colors)
    }
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ChartPalette {
    /// 주어진 색상으로 팔레트를 생성합니다.
    ///
    /// 비어 있거나 공백뿐인 항목만 있으면 기본 팔레트를 사용합니다.
    pub fn new<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors
            .into_iter()
            .map(Into::into)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// 팔레트 색상 수.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// 팔레트가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// 순위에 해당하는 색상 (`rank mod len`).
    pub fn color_for(&self, rank: usize) -> &str {
        &self.colors[rank % self.colors.len()]
    }

    /// 이 팔레트로 차트 데이터를 생성합니다.
    pub fn build(&self, grouped: &BTreeMap<String, i64>, total: i64) -> ChartData {
        if grouped.is_empty() || total == 0 {
            return ChartData {
                slices: Vec::new(),
                palette_size: self.len(),
            };
        }

        // 안정 정렬이므로 크기가 같은 종목은 종목명 순서를 유지한다
        let mut ranked: Vec<(&String, i64)> = grouped.iter().map(|(k, v)| (k, *v)).collect();
        ranked.sort_by(|a, b| b.1.unsigned_abs().cmp(&a.1.unsigned_abs()));

        let denominator = total.unsigned_abs() as f64;
        let mut offset = 0.0;
        let slices: Vec<ProfitSlice> = ranked
            .into_iter()
            .enumerate()
            .map(|(rank, (instrument, profit))| {
                let share = profit.unsigned_abs() as f64 / denominator;
                let slice = ProfitSlice {
                    instrument: instrument.clone(),
                    profit,
                    share,
                    color: self.color_for(rank).to_string(),
                    cumulative_offset: offset,
                };
                offset += share;
                slice
            })
            .collect();

        debug!(slices = slices.len(), total = total, "Chart data built");

        ChartData {
            slices,
            palette_size: self.len(),
        }
    }
}

/// 차트 조각 하나.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitSlice {
    /// 종목명
    pub instrument: String,
    /// 종목 손익 (부호 유지)
    pub profit: i64,
    /// 순손익 대비 비율 (잘라내지 않음)
    pub share: f64,
    /// 색상
    pub color: String,
    /// 앞선 조각 비율의 누적합 (첫 조각은 0)
    pub cumulative_offset: f64,
}

/// 차트 데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// 절대 손익 내림차순으로 정렬된 조각
    pub slices: Vec<ProfitSlice>,
    /// 사용한 팔레트 크기
    pub palette_size: usize,
}

impl ChartData {
    /// 그릴 조각이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// 기본 팔레트로 차트 데이터를 생성합니다.
///
/// `grouped`와 `total`은 같은 기록 집합에서 계산된 값이어야 합니다.
/// 그룹이 비어 있거나 총 손익이 0이면 빈 조각 목록을 반환합니다.
pub fn build_chart_data(grouped: &BTreeMap<String, i64>, total: i64) -> ChartData {
    ChartPalette::default().build(grouped, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grouped(entries: &[(&str, i64)]) -> BTreeMap<String, i64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_zero_total_is_empty() {
        let data = build_chart_data(&grouped(&[("A", 500), ("B", -500)]), 0);
        assert!(data.is_empty());
        assert_eq!(data.palette_size, DEFAULT_PALETTE.len());
    }

    #[test]
    fn test_single_instrument_gets_full_slice() {
        let data = build_chart_data(&grouped(&[("A", -25_000)]), -25_000);
        assert_eq!(data.slices.len(), 1);
        assert_eq!(data.slices[0].share, 1.0);
        assert_eq!(data.slices[0].cumulative_offset, 0.0);
        assert_eq!(data.slices[0].color, DEFAULT_PALETTE[0]);
    }

    #[test]
    fn test_ties_keep_key_order() {
        let data = build_chart_data(&grouped(&[("B", -100), ("A", 100), ("C", 300)]), 300);
        let order: Vec<_> = data.slices.iter().map(|s| s.instrument.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_colors_wrap_around_palette() {
        let palette = ChartPalette::new(["red", "blue"]);
        let data = palette.build(&grouped(&[("A", 3), ("B", 2), ("C", 1)]), 6);

        let colors: Vec<_> = data.slices.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, vec!["red", "blue", "red"]);
        assert_eq!(data.palette_size, 2);
    }

    #[test]
    fn test_blank_palette_falls_back_to_default() {
        let palette = ChartPalette::new(Vec::<String>::new());
        assert_eq!(palette, ChartPalette::default());
        assert_eq!(ChartPalette::new(["  "]).len(), DEFAULT_PALETTE.len());
    }

    #[test]
    fn test_deserialized_empty_palette_uses_default() {
        let palette: ChartPalette = serde_json::from_str(r#"{"colors": []}"#).unwrap();
        assert_eq!(palette, ChartPalette::default());

        let data = palette.build(&grouped(&[("A", 10)]), 10);
        assert_eq!(data.slices[0].color, DEFAULT_PALETTE[0]);

        let palette: ChartPalette = serde_json::from_str(r#"{"colors": [" ", "red"]}"#).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.color_for(3), "red");
    }

    #[test]
    fn test_slice_serializes_camel_case() {
        let data = build_chart_data(&grouped(&[("A", 10)]), 10);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["paletteSize"], 8);
        assert_eq!(json["slices"][0]["cumulativeOffset"], 0.0);
    }
}
