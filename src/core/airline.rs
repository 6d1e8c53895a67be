//! Airline formatting - turns API airlines into embeds.

use crate::{
    api::models::Airline,
    core::{
        format::{format_date, format_decimal, format_number},
        render::EmbedView,
    },
};

const REALISM_COLOR: u32 = 0x00E7_4C3C;
const EASY_COLOR: u32 = 0x002E_CC71;

/// Name of the game mode an airline plays.
#[must_use]
pub const fn mode_name(realism: bool) -> &'static str {
    if realism { "Realism" } else { "Easy" }
}

/// Builds the `/airline` embed.
#[must_use]
pub fn airline_embed(airline: &Airline) -> EmbedView {
    let color = if airline.realism {
        REALISM_COLOR
    } else {
        EASY_COLOR
    };

    EmbedView::new(format!("✈️ {}", airline.name))
        .description(format!(
            "{} mode · Level {}",
            mode_name(airline.realism),
            airline.level
        ))
        .color(color)
        .field("Share value", format!("${}", format_decimal(airline.share)), true)
        .field("Fleet", format_number(i64::from(airline.fleet.size)), true)
        .field("Routes", format_number(i64::from(airline.fleet.routes)), true)
        .field(
            "Reputation",
            format!(
                "{}% pax · {}% cargo",
                airline.reputation.airline, airline.reputation.cargo
            ),
            true,
        )
        .field("Founded", format_date(airline.founded), true)
        .field("Achievements", airline.achievements.to_string(), true)
        .field(
            "Alliance",
            airline.alliance.clone().unwrap_or_else(|| "None".to_string()),
            true,
        )
        .footer(format!("Airline ID {}", airline.id))
}
