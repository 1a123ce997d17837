//! Chart types

use crate::axis::Axis;
use crate::legend::Legend;
use crate::series::DataSeries;

/// Chart kinds supported by the insert-chart operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChartType {
    ColumnClustered,
    ColumnStacked,
    BarClustered,
    BarStacked,
    Line,
    LineMarkers,
    Pie,
    Doughnut,
    Area,
    ScatterMarkers,
}

/// Chart definition
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    /// Chart type
    pub chart_type: ChartType,
    /// Chart title
    pub title: Option<String>,
    /// Data series
    pub series: Vec<DataSeries>,
    /// Category axis (X)
    pub category_axis: Option<Axis>,
    /// Value axis (Y)
    pub value_axis: Option<Axis>,
    /// Legend
    pub legend: Option<Legend>,
}

impl Chart {
    /// Create a new chart
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            title: None,
            series: Vec::new(),
            category_axis: None,
            value_axis: None,
            legend: None,
        }
    }

    /// Set chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a data series
    pub fn with_series(mut self, series: DataSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Set the category axis
    pub fn with_category_axis(mut self, axis: Axis) -> Self {
        self.category_axis = Some(axis);
        self
    }

    /// Set the value axis
    pub fn with_value_axis(mut self, axis: Axis) -> Self {
        self.value_axis = Some(axis);
        self
    }

    /// Set the legend
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = Some(legend);
        self
    }
}
