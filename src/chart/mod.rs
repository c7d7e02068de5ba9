/// Chart layer: turns tidy tables into plotly-style figure specs.
pub mod builder;
pub mod figure;
pub mod palette;

pub use builder::{build_chart, build_dashboard, return_figures, ChartConfig, ChartOutput, Ticks};
pub use figure::{Axis, Figure, Layout, Trace, TraceKind};
