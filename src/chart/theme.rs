//! Chart color theme.
//!
//! A theme is a partial option tree in the chart component's own keys
//! (`chart.backgroundColor`, `xAxis.gridLineColor`, `rangeSelector.buttonTheme`,
//! ...). [`ChartOptions`](super::ChartOptions) merges its structural options
//! over it when serialized, so the component receives one tree. Nothing is
//! installed globally on the charting component.

use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Theme(Value);

impl Theme {
    /// Dark theme: near-black background, white text, muted grey axes.
    pub fn dark() -> Self {
        let axis_labels = json!({ "style": { "color": "#fff", "fontSize": "12px" } });
        let axis = |title: Value| {
            json!({
                "gridLineColor": "#707073",
                "labels": axis_labels,
                "lineColor": "#707073",
                "minorGridLineColor": "#505053",
                "tickColor": "#707073",
                "title": title,
            })
        };
        let mut y_axis = axis(json!({ "style": { "color": "#fff", "fontWeight": "300" } }));
        merge(&mut y_axis, json!({ "tickWidth": 1 }));

        Self(json!({
            "colors": [
                "#8087E8", "#A3EDBA", "#F19E53", "#6699A1",
                "#E1D369", "#87B4E7", "#DA6D85", "#BBBAC5"
            ],
            "chart": { "backgroundColor": "#121212" },
            "title": {
                "style": { "fontSize": "22px", "fontWeight": "500", "color": "#fff" }
            },
            "subtitle": {
                "style": { "fontSize": "16px", "fontWeight": "400", "color": "#fff" }
            },
            "credits": { "style": { "color": "#f0f0f0" } },
            "caption": { "style": { "color": "#f0f0f0" } },
            "tooltip": {
                "borderWidth": 0,
                "backgroundColor": "#f0f0f0",
                "shadow": true
            },
            "legend": {
                "backgroundColor": "transparent",
                "itemStyle": { "fontWeight": "400", "fontSize": "12px", "color": "#fff" },
                "itemHoverStyle": { "fontWeight": "700", "color": "#fff" }
            },
            "labels": { "style": { "color": "#707073" } },
            "plotOptions": {
                "series": {
                    "dataLabels": { "color": "#46465C", "style": { "fontSize": "13px" } },
                    "marker": { "lineColor": "#333" }
                },
                "boxplot": { "fillColor": "#505053" },
                "candlestick": {
                    "lineColor": null,
                    "upColor": "#DA6D85",
                    "upLineColor": "#DA6D85"
                },
                "errorbar": { "color": "white" },
                "dumbbell": { "lowColor": "#f0f0f0" },
                "map": {
                    "borderColor": "rgba(200, 200, 200, 1)",
                    "nullColor": "#78758C"
                }
            },
            "drilldown": {
                "activeDataLabelStyle": { "color": "#F0F0F3" },
                "activeAxisLabelStyle": { "color": "#F0F0F3" },
                "drillUpButton": { "theme": { "fill": "#fff" } }
            },
            "xAxis": axis(json!({ "style": { "color": "#fff" } })),
            "yAxis": y_axis,
            "rangeSelector": {
                "buttonTheme": {
                    "fill": "#46465C",
                    "stroke": "#BBBAC5",
                    "stroke-width": 1,
                    "style": { "color": "#fff" },
                    "states": {
                        "hover": {
                            "fill": "#1f1836",
                            "style": { "color": "#fff" },
                            "stroke-width": 1,
                            "stroke": "white"
                        },
                        "select": {
                            "fill": "#1f1836",
                            "style": { "color": "#fff" },
                            "stroke-width": 1,
                            "stroke": "white"
                        }
                    }
                },
                "inputBoxBorderColor": "#BBBAC5",
                "inputStyle": { "backgroundColor": "#2F2B38", "color": "#fff" },
                "labelStyle": { "color": "#fff" }
            },
            "navigator": {
                "handles": { "backgroundColor": "#BBBAC5", "borderColor": "#2F2B38" },
                "outlineColor": "#CCC",
                "maskFill": "rgba(255,255,255,0.1)",
                "series": { "color": "#A3EDBA", "lineColor": "#A3EDBA" },
                "xAxis": { "gridLineColor": "#505053" }
            },
            "scrollbar": {
                "barBackgroundColor": "#333",
                "barBorderColor": "#333",
                "buttonArrowColor": "#fff",
                "buttonBackgroundColor": "#333",
                "buttonBorderColor": "#333",
                "rifleColor": "#fff",
                "trackBackgroundColor": "#000",
                "trackBorderColor": "#000"
            }
        }))
    }

    /// Theme from a raw option tree. Anything but an object is treated as empty.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => Self(value),
            _ => Self(Value::Object(Map::new())),
        }
    }

    /// This theme with `overlay` merged on top.
    pub fn with_overrides(mut self, overlay: Value) -> Self {
        merge(&mut self.0, overlay);
        self
    }

    /// Value at a JSON pointer, e.g. `"/chart/backgroundColor"`.
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Deep merge of option trees. Objects merge key by key; any other
/// `overlay` value replaces what is in `base`.
pub(crate) fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
