//! Chart configuration handed to the external stock-chart component.
//!
//! Serializes to the component's camelCase option shape, with the theme
//! merged underneath the structural options.

use super::theme::{merge, Theme};
use crate::domain::dataset::{PartitionedDataset, Series};
use crate::shared::PairId;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};

const SUBTITLE: &str = "trades by side";

// ─── Range presets ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeUnit {
    Minute,
    Hour,
    All,
}

/// A zoom shortcut button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeButton {
    #[serde(rename = "type")]
    pub unit: RangeUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    pub text: String,
}

impl RangeButton {
    fn minutes(count: u32) -> Self {
        Self {
            unit: RangeUnit::Minute,
            count: Some(count),
            text: format!("{}m", count),
        }
    }

    fn hours(count: u32) -> Self {
        Self {
            unit: RangeUnit::Hour,
            count: Some(count),
            text: format!("{}h", count),
        }
    }

    fn all() -> Self {
        Self {
            unit: RangeUnit::All,
            count: None,
            text: "All".to_string(),
        }
    }

    /// Span in milliseconds; `None` for "All".
    pub fn span_ms(&self) -> Option<i64> {
        let count = i64::from(self.count?);
        match self.unit {
            RangeUnit::Minute => Some(count * 60_000),
            RangeUnit::Hour => Some(count * 3_600_000),
            RangeUnit::All => None,
        }
    }
}

/// 1/2/3/10 minutes, 1/2/6/12 hours, all. Narrowest first.
pub fn range_presets() -> Vec<RangeButton> {
    vec![
        RangeButton::minutes(1),
        RangeButton::minutes(2),
        RangeButton::minutes(3),
        RangeButton::minutes(10),
        RangeButton::hours(1),
        RangeButton::hours(2),
        RangeButton::hours(6),
        RangeButton::hours(12),
        RangeButton::all(),
    ]
}

// ─── Option sections ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSection {
    pub zoom_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOptions {
    pub text: String,
    pub align: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Datetime,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisOptions {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataGrouping {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesOptions {
    pub name: String,
    pub data: Series,
    pub data_grouping: DataGrouping,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigatorSeries {
    pub data: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorOptions {
    pub adapt_to_updated_data: bool,
    pub series: NavigatorSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollbarOptions {
    pub live_redraw: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSelectorOptions {
    pub buttons: Vec<RangeButton>,
    pub input_enabled: bool,
    /// Index into `buttons`.
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub enabled: bool,
}

// ─── ChartOptions ────────────────────────────────────────────────────────────

/// Full configuration for one chart instance, theme included.
///
/// Serializes as a single option tree: the theme first, then every
/// structural option on top of it, so `xAxis` carries both `type` and
/// `gridLineColor`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub chart: ChartSection,
    pub title: TitleOptions,
    pub subtitle: TitleOptions,
    pub navigator: NavigatorOptions,
    pub scrollbar: ScrollbarOptions,
    pub range_selector: RangeSelectorOptions,
    pub x_axis: AxisOptions,
    pub legend: LegendOptions,
    pub series: Vec<SeriesOptions>,
    pub theme: Theme,
}

impl ChartOptions {
    /// Buy and sell series (in that order), ungrouped, on a datetime axis,
    /// with the navigator seeded from the buy series and the widest range
    /// preset selected.
    pub fn for_dataset(pair: &PairId, data: &PartitionedDataset, theme: Theme) -> Self {
        let buttons = range_presets();
        let selected = buttons.len() - 1;

        let series = |name: &str, data: &Series| SeriesOptions {
            name: name.to_string(),
            data: data.clone(),
            data_grouping: DataGrouping { enabled: false },
        };

        Self {
            chart: ChartSection {
                zoom_type: "x".to_string(),
            },
            title: TitleOptions {
                text: pair.to_string(),
                align: "left".to_string(),
            },
            subtitle: TitleOptions {
                text: SUBTITLE.to_string(),
                align: "left".to_string(),
            },
            navigator: NavigatorOptions {
                adapt_to_updated_data: false,
                series: NavigatorSeries {
                    data: data.buy.clone(),
                },
            },
            scrollbar: ScrollbarOptions { live_redraw: false },
            range_selector: RangeSelectorOptions {
                buttons,
                input_enabled: false,
                selected,
            },
            x_axis: AxisOptions {
                axis_type: AxisType::Datetime,
            },
            legend: LegendOptions { enabled: true },
            series: vec![series("buy", &data.buy), series("sell", &data.sell)],
            theme,
        }
    }

    pub fn series_named(&self, name: &str) -> Option<&SeriesOptions> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn selected_range(&self) -> Option<&RangeButton> {
        self.range_selector.buttons.get(self.range_selector.selected)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Structural half of [`ChartOptions`] in the component's keys.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionTree<'a> {
    chart: &'a ChartSection,
    title: &'a TitleOptions,
    subtitle: &'a TitleOptions,
    navigator: &'a NavigatorOptions,
    scrollbar: &'a ScrollbarOptions,
    range_selector: &'a RangeSelectorOptions,
    x_axis: &'a AxisOptions,
    legend: &'a LegendOptions,
    series: &'a [SeriesOptions],
}

impl Serialize for ChartOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let structure = serde_json::to_value(OptionTree {
            chart: &self.chart,
            title: &self.title,
            subtitle: &self.subtitle,
            navigator: &self.navigator,
            scrollbar: &self.scrollbar,
            range_selector: &self.range_selector,
            x_axis: &self.x_axis,
            legend: &self.legend,
            series: &self.series,
        })
        .map_err(S::Error::custom)?;

        let mut tree = self.theme.as_value().clone();
        merge(&mut tree, structure);
        tree.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChartOptions {
        let data = PartitionedDataset {
            buy: vec![(1, 9.0), (2, 9.5)],
            sell: vec![(1, 8.0), (3, 10.0)],
            rejected: vec![],
        };
        ChartOptions::for_dataset(&PairId::from("BTC-USDT"), &data, Theme::dark())
    }

    #[test]
    fn test_presets() {
        let texts: Vec<String> = range_presets().into_iter().map(|b| b.text).collect();
        assert_eq!(texts, ["1m", "2m", "3m", "10m", "1h", "2h", "6h", "12h", "All"]);
    }

    #[test]
    fn test_preset_spans_increase() {
        let spans: Vec<i64> = range_presets().iter().filter_map(|b| b.span_ms()).collect();
        assert_eq!(spans.len(), 8);
        assert!(spans.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(spans[7], 12 * 3_600_000);
    }

    #[test]
    fn test_widest_range_selected() {
        let options = sample();
        assert_eq!(options.selected_range().unwrap().unit, RangeUnit::All);
    }

    #[test]
    fn test_series_split_and_ungrouped() {
        let options = sample();
        let buy = options.series_named("buy").unwrap();
        let sell = options.series_named("sell").unwrap();
        assert_eq!(buy.data, vec![(1, 9.0), (2, 9.5)]);
        assert_eq!(sell.data, vec![(1, 8.0), (3, 10.0)]);
        assert!(!buy.data_grouping.enabled);
        assert!(!sell.data_grouping.enabled);
        assert_eq!(options.navigator.series.data, buy.data);
        assert_eq!(options.title.text, "BTC-USDT");
    }

    #[test]
    fn test_json_shape() {
        let json = sample().to_json().unwrap();
        assert_eq!(json["xAxis"]["type"], "datetime");
        assert_eq!(json["chart"]["zoomType"], "x");
        assert_eq!(json["rangeSelector"]["selected"], 8);
        assert_eq!(json["rangeSelector"]["inputEnabled"], false);
        assert_eq!(json["rangeSelector"]["buttons"][8], serde_json::json!({"type": "all", "text": "All"}));
        assert_eq!(json["rangeSelector"]["buttons"][0], serde_json::json!({"type": "minute", "count": 1, "text": "1m"}));
        assert_eq!(json["series"][0]["dataGrouping"]["enabled"], false);
        assert_eq!(json["series"][1]["data"], serde_json::json!([[1, 8.0], [3, 10.0]]));
        assert_eq!(json["navigator"]["adaptToUpdatedData"], false);
        assert_eq!(json["scrollbar"]["liveRedraw"], false);
    }

    #[test]
    fn test_theme_merged_into_option_tree() {
        let json = sample().to_json().unwrap();
        assert!(json.get("theme").is_none());
        assert_eq!(json["chart"]["backgroundColor"], "#121212");
        assert_eq!(json["chart"]["zoomType"], "x");
        assert_eq!(json["xAxis"]["gridLineColor"], "#707073");
        assert_eq!(json["xAxis"]["type"], "datetime");
        assert_eq!(json["yAxis"]["tickWidth"], 1);
        assert_eq!(json["title"]["text"], "BTC-USDT");
        assert_eq!(json["title"]["style"]["color"], "#fff");
        assert_eq!(json["subtitle"]["style"]["fontSize"], "16px");
        assert_eq!(json["rangeSelector"]["buttonTheme"]["fill"], "#46465C");
        assert_eq!(json["rangeSelector"]["inputStyle"]["color"], "#fff");
        assert_eq!(json["rangeSelector"]["selected"], 8);
        assert_eq!(json["navigator"]["maskFill"], "rgba(255,255,255,0.1)");
        assert_eq!(json["navigator"]["series"]["color"], "#A3EDBA");
        assert_eq!(json["navigator"]["series"]["data"], serde_json::json!([[1, 9.0], [2, 9.5]]));
        assert_eq!(json["scrollbar"]["buttonBorderColor"], "#333");
        assert_eq!(json["scrollbar"]["liveRedraw"], false);
        assert_eq!(json["plotOptions"]["candlestick"]["upColor"], "#DA6D85");
    }

    #[test]
    fn test_structural_options_win_over_theme() {
        let theme = Theme::dark().with_overrides(serde_json::json!({
            "chart": { "zoomType": "y" },
            "legend": { "enabled": false }
        }));
        let data = PartitionedDataset::default();
        let json = ChartOptions::for_dataset(&PairId::from("ETH-USDT"), &data, theme)
            .to_json()
            .unwrap();
        assert_eq!(json["chart"]["zoomType"], "x");
        assert_eq!(json["chart"]["backgroundColor"], "#121212");
        assert_eq!(json["legend"]["enabled"], true);
        assert_eq!(json["legend"]["itemStyle"]["color"], "#fff");
    }
}
