use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Chart specification records (plotly-compatible JSON)
// ---------------------------------------------------------------------------

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Line,
    Bar,
    Markers,
}

impl TraceKind {
    fn plotly_type(self) -> &'static str {
        match self {
            TraceKind::Line | TraceKind::Markers => "scatter",
            TraceKind::Bar => "bar",
        }
    }

    fn plotly_mode(self) -> Option<&'static str> {
        match self {
            TraceKind::Line => Some("lines"),
            TraceKind::Markers => Some("markers"),
            TraceKind::Bar => None,
        }
    }
}

/// One country's series.
#[derive(Debug, Clone)]
pub struct Trace {
    pub kind: TraceKind,
    pub name: String,
    pub x: Vec<i32>,
    /// NaN serializes as `null`, which plotly draws as a gap.
    pub y: Vec<f64>,
    pub color: String,
}

#[derive(Serialize)]
struct Marker<'a> {
    color: &'a str,
}

impl Serialize for Trace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mode = self.kind.plotly_mode();
        let len = if mode.is_some() { 6 } else { 5 };
        let mut s = serializer.serialize_struct("Trace", len)?;
        s.serialize_field("type", self.kind.plotly_type())?;
        if let Some(mode) = mode {
            s.serialize_field("mode", mode)?;
        }
        s.serialize_field("name", &self.name)?;
        s.serialize_field("x", &self.x)?;
        s.serialize_field("y", &self.y)?;
        s.serialize_field("marker", &Marker { color: &self.color })?;
        s.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autotick: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick0: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<i32>,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Axis {
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

/// A (series-list, layout) pair ready for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}
