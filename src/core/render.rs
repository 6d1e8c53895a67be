//! Framework-agnostic description of a bot reply.
//!
//! Sessions and formatting code build [`Rendered`] values; the bot layer converts them
//! into Discord builders. Rendering is always a full replacement of the message, so a
//! `Rendered` carries everything the message should show.

/// Discord's limit on the value of a single embed field, in characters
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Discord's limit on the number of fields in one embed
pub const MAX_EMBED_FIELDS: usize = 25;

/// Default embed color used across the bot
pub const BRAND_COLOR: u32 = 0x0034_98DB;

/// Full content of one message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    /// Plain text above the embed
    pub content: Option<String>,
    /// Embed, if any
    pub embed: Option<EmbedView>,
    /// Component rows, top to bottom
    pub rows: Vec<ControlRow>,
}

impl Rendered {
    /// A reply made of a single embed with no controls.
    #[must_use]
    pub fn embed(embed: EmbedView) -> Self {
        Self {
            content: None,
            embed: Some(embed),
            rows: Vec::new(),
        }
    }

    /// Adds a row of controls.
    #[must_use]
    pub fn with_row(mut self, row: ControlRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Copy of this reply with every control disabled.
    #[must_use]
    pub fn disabled(&self) -> Self {
        let mut copy = self.clone();
        for row in &mut copy.rows {
            row.disable();
        }
        copy
    }

    /// Whether every control is disabled (vacuously true without controls).
    #[must_use]
    pub fn all_disabled(&self) -> bool {
        self.rows.iter().all(ControlRow::is_disabled)
    }
}

/// An embed, independent of any Discord library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedView {
    /// Title line
    pub title: String,
    /// Body text
    pub description: Option<String>,
    /// Side color
    pub color: u32,
    /// Fields in display order
    pub fields: Vec<EmbedField>,
    /// Large image (chart URLs)
    pub image_url: Option<String>,
    /// Footer text
    pub footer: Option<String>,
}

impl EmbedView {
    /// New embed with the brand color.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: BRAND_COLOR,
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Sets the image URL.
    #[must_use]
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Sets the footer.
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Sets the color.
    #[must_use]
    pub const fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }
}

/// One embed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Field title
    pub name: String,
    /// Field body
    pub value: String,
    /// Whether Discord may lay it out next to its neighbours
    pub inline: bool,
}

/// A row of message components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlRow {
    /// Up to five buttons
    Buttons(Vec<Button>),
    /// A single select menu
    Select(SelectMenu),
}

impl ControlRow {
    fn disable(&mut self) {
        match self {
            Self::Buttons(buttons) => buttons.iter_mut().for_each(|b| b.disabled = true),
            Self::Select(menu) => menu.disabled = true,
        }
    }

    fn is_disabled(&self) -> bool {
        match self {
            Self::Buttons(buttons) => buttons.iter().all(|b| b.disabled),
            Self::Select(menu) => menu.disabled,
        }
    }
}

/// Button color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTone {
    /// Blurple
    Primary,
    /// Grey
    Secondary,
    /// Green
    Success,
    /// Red
    Danger,
}

/// A clickable button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    /// Identifier echoed back in the component interaction
    pub custom_id: String,
    /// Visible label
    pub label: String,
    /// Color
    pub tone: ButtonTone,
    /// Whether clicks are blocked
    pub disabled: bool,
}

impl Button {
    /// Enabled secondary button.
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            tone: ButtonTone::Secondary,
            disabled: false,
        }
    }

    /// Sets the color.
    #[must_use]
    pub const fn tone(mut self, tone: ButtonTone) -> Self {
        self.tone = tone;
        self
    }

    /// Sets the disabled flag.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A string select menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectMenu {
    /// Identifier echoed back in the component interaction
    pub custom_id: String,
    /// Text shown when nothing is selected
    pub placeholder: String,
    /// Choices, at most 25
    pub options: Vec<SelectOption>,
    /// Whether the menu is blocked
    pub disabled: bool,
}

/// One select menu choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Visible label
    pub label: String,
    /// Value echoed back when chosen
    pub value: String,
    /// Secondary text
    pub description: Option<String>,
    /// Whether it is shown as the current choice
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Rendered {
        Rendered::embed(EmbedView::new("Title"))
            .with_row(ControlRow::Buttons(vec![
                Button::new("prev", "◀").disabled(true),
                Button::new("next", "▶"),
            ]))
            .with_row(ControlRow::Select(SelectMenu {
                custom_id: "pick".to_string(),
                placeholder: "Pick".to_string(),
                options: vec![],
                disabled: false,
            }))
    }

    #[test]
    fn test_disabled_disables_every_control() {
        let rendered = sample();
        assert!(!rendered.all_disabled());

        let disabled = rendered.disabled();
        assert!(disabled.all_disabled());
        assert_eq!(disabled.embed, rendered.embed);
        // The original is untouched
        assert!(!rendered.all_disabled());
    }

    #[test]
    fn test_reply_without_controls_counts_as_disabled() {
        assert!(Rendered::embed(EmbedView::new("x")).all_disabled());
    }
}
