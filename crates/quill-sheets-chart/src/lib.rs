//! # quill-sheets-chart
//!
//! Chart and sparkline (mini-chart) definitions for quill-sheets.
//!
//! These are pure configuration objects: operations translate them into the
//! engine's drawing model; nothing here touches a workbook.

mod axis;
mod chart;
mod legend;
mod series;
mod sparkline;

pub use axis::{Axis, AxisPosition};
pub use chart::{Chart, ChartType};
pub use legend::{Legend, LegendPosition};
pub use series::{DataReference, DataSeries};
pub use sparkline::{Sparkline, SparklineKind};
