//! Chart carousel: a session view that flips between named charts of one entity set.
//!
//! The render state is the selected descriptor index plus the image URL rendered for
//! it. The chart service is only called when the selection actually changes.

use crate::{
    core::{
        chart::{ChartDescriptor, ChartRenderer},
        render::{ControlRow, EmbedView, Rendered, SelectMenu, SelectOption},
        session::{ComponentEvent, SessionView, Transition},
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use std::sync::Arc;

/// `custom_id` of the chart select menu.
pub const CHART_SELECT_ID: &str = "chart:select";

/// Render state of a carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    /// Index into the descriptor list
    pub index: usize,
    /// Image URL rendered for that descriptor
    pub image_url: String,
}

/// Chart carousel over `entities`.
pub struct ChartCarousel<T> {
    title: String,
    entities: Vec<T>,
    descriptors: Vec<ChartDescriptor<T>>,
    renderer: Arc<dyn ChartRenderer>,
}

impl<T: Send + Sync> ChartCarousel<T> {
    /// Builds a carousel; at least one descriptor is required.
    pub fn new(
        title: impl Into<String>,
        entities: Vec<T>,
        descriptors: Vec<ChartDescriptor<T>>,
        renderer: Arc<dyn ChartRenderer>,
    ) -> Result<Self> {
        if descriptors.is_empty() {
            return Err(Error::Session {
                message: "a chart carousel needs at least one chart".to_string(),
            });
        }
        Ok(Self {
            title: title.into(),
            entities,
            descriptors,
            renderer,
        })
    }

    /// Renders the chart at `index` and returns the matching state.
    pub async fn state_at(&self, index: usize) -> Result<CarouselState> {
        let descriptor = self.descriptors.get(index).ok_or_else(|| Error::Session {
            message: format!("chart index {index} out of range"),
        })?;
        let config = (descriptor.build)(&self.entities);
        let image_url = self.renderer.render(&config).await?;
        tracing::debug!("rendered chart `{}` -> {image_url}", descriptor.id);
        Ok(CarouselState { index, image_url })
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.descriptors.iter().position(|d| d.id == id)
    }
}

#[async_trait]
impl<T: Send + Sync> SessionView for ChartCarousel<T> {
    type State = CarouselState;

    fn render(&self, state: &CarouselState) -> Rendered {
        let current = &self.descriptors[state.index.min(self.descriptors.len() - 1)];

        let embed = EmbedView::new(format!("{} · {}", self.title, current.title))
            .description(current.description)
            .image(state.image_url.clone())
            .footer(format!(
                "Chart {}/{}",
                state.index + 1,
                self.descriptors.len()
            ));

        let options = self
            .descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| SelectOption {
                label: d.title.to_string(),
                value: d.id.to_string(),
                description: Some(d.description.to_string()),
                selected: i == state.index,
            })
            .collect();

        Rendered::embed(embed).with_row(ControlRow::Select(SelectMenu {
            custom_id: CHART_SELECT_ID.to_string(),
            placeholder: "Choose a chart".to_string(),
            options,
            disabled: false,
        }))
    }

    async fn update(
        &self,
        event: &ComponentEvent,
        state: &CarouselState,
    ) -> Result<Transition<CarouselState>> {
        if event.custom_id != CHART_SELECT_ID {
            return Err(Error::user("This control does not belong to the chart menu."));
        }
        let choice = event
            .first_value()
            .ok_or_else(|| Error::user("No chart was selected."))?;
        let index = self
            .index_of(choice)
            .ok_or_else(|| Error::user(format!("Unknown chart `{choice}`.")))?;

        if index == state.index {
            return Ok(Transition::Continue(state.clone()));
        }
        Ok(Transition::Continue(self.state_at(index).await?))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::chart::ChartConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRenderer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ChartRenderer for CountingRenderer {
        async fn render(&self, config: &ChartConfig) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!(
                "https://charts.test/{}",
                config.options.plugins.title.text.replace(' ', "-")
            ))
        }
    }

    fn sizes(values: &[u32]) -> ChartConfig {
        ChartConfig::bar(
            "Size",
            values.iter().map(u32::to_string).collect(),
            "size",
            values.iter().map(|&v| f64::from(v)).collect(),
        )
    }

    fn doubled(values: &[u32]) -> ChartConfig {
        ChartConfig::bar(
            "Double size",
            values.iter().map(u32::to_string).collect(),
            "size",
            values.iter().map(|&v| f64::from(v * 2)).collect(),
        )
    }

    fn carousel() -> (ChartCarousel<u32>, Arc<CountingRenderer>) {
        let renderer = Arc::new(CountingRenderer {
            calls: AtomicUsize::new(0),
        });
        let descriptors = vec![
            ChartDescriptor {
                id: "size",
                title: "Size",
                description: "Raw values",
                build: sizes,
            },
            ChartDescriptor {
                id: "double",
                title: "Double",
                description: "Values times two",
                build: doubled,
            },
        ];
        let carousel = ChartCarousel::new(
            "Numbers",
            vec![3, 5, 8],
            descriptors,
            Arc::clone(&renderer) as Arc<dyn ChartRenderer>,
        )
        .unwrap();
        (carousel, renderer)
    }

    #[test]
    fn test_empty_descriptor_list_is_rejected() {
        let renderer = Arc::new(CountingRenderer {
            calls: AtomicUsize::new(0),
        });
        let result = ChartCarousel::<u32>::new("Empty", vec![1], Vec::new(), renderer);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_switching_chart_renders_new_url() {
        let (carousel, renderer) = carousel();
        let state = carousel.state_at(0).await.unwrap();
        assert_eq!(state.image_url, "https://charts.test/Size");

        let event = ComponentEvent::select(1, CHART_SELECT_ID, "double");
        let Transition::Continue(next) = carousel.update(&event, &state).await.unwrap() else {
            panic!("carousel never finishes on its own");
        };

        assert_eq!(next.index, 1);
        assert_eq!(next.image_url, "https://charts.test/Double-size");
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reselecting_current_chart_skips_renderer() {
        let (carousel, renderer) = carousel();
        let state = carousel.state_at(0).await.unwrap();

        let event = ComponentEvent::select(1, CHART_SELECT_ID, "size");
        let next = carousel.update(&event, &state).await.unwrap();

        assert_eq!(next, Transition::Continue(state));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_chart_is_user_error() {
        let (carousel, _) = carousel();
        let state = carousel.state_at(0).await.unwrap();

        let event = ComponentEvent::select(1, CHART_SELECT_ID, "missing");
        let error = carousel.update(&event, &state).await.unwrap_err();
        assert!(error.is_user_facing());
    }

    #[tokio::test]
    async fn test_render_marks_selected_chart() {
        let (carousel, _) = carousel();
        let state = carousel.state_at(1).await.unwrap();
        let rendered = carousel.render(&state);

        let embed = rendered.embed.as_ref().unwrap();
        assert_eq!(embed.title, "Numbers · Double");
        assert_eq!(embed.image_url.as_deref(), Some(state.image_url.as_str()));

        let ControlRow::Select(menu) = &rendered.rows[0] else {
            panic!("expected a select menu");
        };
        let selected: Vec<bool> = menu.options.iter().map(|o| o.selected).collect();
        assert_eq!(selected, vec![false, true]);
    }
}
