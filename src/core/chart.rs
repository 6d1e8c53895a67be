//! Chart configuration model and named chart views.
//!
//! [`ChartConfig`] mirrors the JSON a Chart.js-style rendering service accepts. A
//! [`ChartDescriptor`] names one view over a set of comparable entities and knows how to
//! build its config; commands only pick the entity set and the descriptor list.

use crate::errors::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Palette cycled through datasets and bars.
pub const PALETTE: [&str; 6] = [
    "#3498db", "#e74c3c", "#2ecc71", "#f1c40f", "#9b59b6", "#1abc9c",
];

/// Turns a chart config into a shareable image URL.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Renders `config` and returns the image URL.
    async fn render(&self, config: &ChartConfig) -> Result<String>;
}

/// Chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Vertical bars
    Bar,
    /// Line over labels
    Line,
    /// Spider chart
    Radar,
    /// Pie slices
    Pie,
}

/// Top-level chart config.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    /// Chart type
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Labels and datasets
    pub data: ChartData,
    /// Title and legend
    pub options: ChartOptions,
}

/// Chart data block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// X-axis (or slice) labels
    pub labels: Vec<String>,
    /// Series
    pub datasets: Vec<Dataset>,
}

/// One data series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Legend label
    pub label: String,
    /// One value per label
    pub data: Vec<f64>,
    /// Colors, one per value or a single one for the series
    pub background_color: Vec<String>,
}

/// Chart options block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    /// Plugin settings
    pub plugins: ChartPlugins,
}

/// Chart plugin settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPlugins {
    /// Title plugin
    pub title: ChartTitle,
    /// Legend plugin
    pub legend: ChartLegend,
}

/// Chart title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTitle {
    /// Whether to draw it
    pub display: bool,
    /// Title text
    pub text: String,
}

/// Chart legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLegend {
    /// Whether to draw it
    pub display: bool,
}

impl ChartConfig {
    /// Single-series bar chart with one color per bar.
    #[must_use]
    pub fn bar(title: &str, labels: Vec<String>, series: &str, values: Vec<f64>) -> Self {
        let colors = (0..values.len())
            .map(|i| PALETTE[i % PALETTE.len()].to_string())
            .collect();
        Self {
            kind: ChartKind::Bar,
            data: ChartData {
                labels,
                datasets: vec![Dataset {
                    label: series.to_string(),
                    data: values,
                    background_color: colors,
                }],
            },
            options: ChartOptions::titled(title, false),
        }
    }

    /// Multi-series chart of `kind`; each series gets its own color.
    #[must_use]
    pub fn multi(
        kind: ChartKind,
        title: &str,
        labels: Vec<String>,
        series: Vec<(String, Vec<f64>)>,
    ) -> Self {
        let datasets = series
            .into_iter()
            .enumerate()
            .map(|(i, (label, data))| Dataset {
                label,
                data,
                background_color: vec![PALETTE[i % PALETTE.len()].to_string()],
            })
            .collect();
        Self {
            kind,
            data: ChartData { labels, datasets },
            options: ChartOptions::titled(title, true),
        }
    }
}

impl ChartOptions {
    fn titled(title: &str, legend: bool) -> Self {
        Self {
            plugins: ChartPlugins {
                title: ChartTitle {
                    display: true,
                    text: title.to_string(),
                },
                legend: ChartLegend { display: legend },
            },
        }
    }
}

/// One named chart view over a slice of entities.
pub struct ChartDescriptor<T> {
    /// Stable identifier, used as the select menu value
    pub id: &'static str,
    /// Short name shown in the menu and embed title
    pub title: &'static str,
    /// One-line explanation
    pub description: &'static str,
    /// Builds the chart config for the given entities
    pub build: fn(&[T]) -> ChartConfig,
}

impl<T> Clone for ChartDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            title: self.title,
            description: self.description,
            build: self.build,
        }
    }
}

impl<T> std::fmt::Debug for ChartDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}
