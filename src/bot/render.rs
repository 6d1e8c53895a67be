//! Conversion of the platform-neutral [`Rendered`] model into serenity builders.

use crate::core::render::{ButtonTone, ControlRow, EmbedView, Rendered};
use poise::{
    CreateReply,
    serenity_prelude::{
        ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
        CreateInteractionResponseMessage, CreateSelectMenu, CreateSelectMenuKind,
        CreateSelectMenuOption, EditMessage,
    },
};

/// Builds a serenity embed.
#[must_use]
pub fn embed(view: &EmbedView) -> CreateEmbed {
    let mut embed = CreateEmbed::new().title(&view.title).color(view.color);
    if let Some(description) = &view.description {
        embed = embed.description(description);
    }
    for field in &view.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }
    if let Some(url) = &view.image_url {
        embed = embed.image(url);
    }
    if let Some(footer) = &view.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    embed
}

const fn button_style(tone: ButtonTone) -> ButtonStyle {
    match tone {
        ButtonTone::Primary => ButtonStyle::Primary,
        ButtonTone::Secondary => ButtonStyle::Secondary,
        ButtonTone::Success => ButtonStyle::Success,
        ButtonTone::Danger => ButtonStyle::Danger,
    }
}

/// Builds the component rows.
#[must_use]
pub fn action_rows(rows: &[ControlRow]) -> Vec<CreateActionRow> {
    rows.iter()
        .map(|row| match row {
            ControlRow::Buttons(buttons) => CreateActionRow::Buttons(
                buttons
                    .iter()
                    .map(|b| {
                        CreateButton::new(&b.custom_id)
                            .label(&b.label)
                            .style(button_style(b.tone))
                            .disabled(b.disabled)
                    })
                    .collect(),
            ),
            ControlRow::Select(menu) => {
                let options = menu
                    .options
                    .iter()
                    .map(|o| {
                        let option = CreateSelectMenuOption::new(&o.label, &o.value)
                            .default_selection(o.selected);
                        match &o.description {
                            Some(description) => option.description(description),
                            None => option,
                        }
                    })
                    .collect();
                CreateActionRow::SelectMenu(
                    CreateSelectMenu::new(&menu.custom_id, CreateSelectMenuKind::String { options })
                        .placeholder(&menu.placeholder)
                        .disabled(menu.disabled),
                )
            }
        })
        .collect()
}

/// Initial reply carrying `rendered`.
#[must_use]
pub fn reply(rendered: &Rendered) -> CreateReply {
    let mut reply = CreateReply::default().components(action_rows(&rendered.rows));
    if let Some(content) = &rendered.content {
        reply = reply.content(content);
    }
    if let Some(view) = &rendered.embed {
        reply = reply.embed(embed(view));
    }
    reply
}

/// Interaction response replacing the whole message with `rendered`.
#[must_use]
pub fn update_message(rendered: &Rendered) -> CreateInteractionResponseMessage {
    let mut message = CreateInteractionResponseMessage::new()
        .components(action_rows(&rendered.rows))
        .embeds(rendered.embed.iter().map(embed).collect());
    if let Some(content) = &rendered.content {
        message = message.content(content);
    }
    message
}

/// Message edit replacing the whole message with `rendered`.
#[must_use]
pub fn edit_message(rendered: &Rendered) -> EditMessage {
    let mut edit = EditMessage::new()
        .components(action_rows(&rendered.rows))
        .embeds(rendered.embed.iter().map(embed).collect());
    if let Some(content) = &rendered.content {
        edit = edit.content(content);
    }
    edit
}
