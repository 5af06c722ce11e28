use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Line chart description in the JSON shape Plotly.js accepts directly
/// (`Plotly.newPlot(el, figure.data, figure.layout)`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChartFigure {
    pub data: Vec<ChartTrace>,
    pub layout: ChartLayout,
}

impl ChartFigure {
    pub fn trace(&self, name: &str) -> Option<&ChartTrace> {
        self.data.iter().find(|trace| trace.name == name)
    }
}

/// One series on the chart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChartTrace {
    pub name: String,
    #[serde(rename = "type")]
    pub trace_type: String,
    pub mode: TraceMode,
    pub x: Vec<NaiveDate>,
    /// `null` entries are drawn as gaps.
    pub y: Vec<Option<f64>>,
    pub line: LineStyle,
}

impl ChartTrace {
    pub fn scatter(name: impl Into<String>, mode: TraceMode, line: LineStyle) -> Self {
        Self {
            name: name.into(),
            trace_type: "scatter".to_string(),
            mode,
            x: Vec::new(),
            y: Vec::new(),
            line,
        }
    }

    pub fn push(&mut self, x: NaiveDate, y: Option<f64>) {
        self.x.push(x);
        self.y.push(y);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub enum TraceMode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct LineStyle {
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl LineStyle {
    pub fn solid(color: &str) -> Self {
        Self {
            color: color.to_string(),
            dash: None,
        }
    }

    pub fn dashed(color: &str) -> Self {
        Self {
            color: color.to_string(),
            dash: Some("dash".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ChartLayout {
    pub title: ChartTitle,
    pub xaxis: ChartAxis,
    pub yaxis: ChartAxis,
    pub hovermode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ChartTitle {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ChartAxis {
    pub title: ChartTitle,
}

impl ChartAxis {
    pub fn titled(text: &str) -> Self {
        Self {
            title: ChartTitle {
                text: text.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_serializes_in_plotly_shape() {
        let mut trace = ChartTrace::scatter("Forecast", TraceMode::LinesMarkers, LineStyle::dashed("orange"));
        trace.push(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), Some(12.0));
        trace.push(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(), None);

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "scatter");
        assert_eq!(json["mode"], "lines+markers");
        assert_eq!(json["x"][0], "2023-01-01");
        assert_eq!(json["y"][0], 12.0);
        assert!(json["y"][1].is_null());
        assert_eq!(json["line"]["dash"], "dash");
    }

    #[test]
    fn solid_line_omits_dash() {
        let json = serde_json::to_value(LineStyle::solid("blue")).unwrap();
        assert_eq!(json["color"], "blue");
        assert!(json.get("dash").is_none());
    }
}
