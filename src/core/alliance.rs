//! Alliance formatting - turns API alliances into embeds.

use crate::{
    api::models::AllianceDetails,
    core::{
        format::{format_decimal, format_number},
        members::{MemberSortKey, SortDirection, sort_members},
        render::EmbedView,
    },
};
use std::fmt::Write;

/// Members listed in the "top today" field.
const TOP_CONTRIBUTORS: usize = 5;

/// Builds the `/alliance info` embed.
pub fn alliance_embed(details: &AllianceDetails) -> crate::errors::Result<EmbedView> {
    let alliance = &details.alliance;
    let total: i64 = details.members.iter().map(|m| m.contributed).sum();
    let today: i64 = details.members.iter().map(|m| m.daily_contribution).sum();

    let mut top: Vec<_> = details.members.iter().collect();
    sort_members(&mut top, MemberSortKey::DailyContribution, SortDirection::Descending);

    let mut top_lines = String::new();
    for (rank, member) in top.iter().take(TOP_CONTRIBUTORS).enumerate() {
        writeln!(
            &mut top_lines,
            "{}. {} · ${}",
            rank + 1,
            member.company,
            format_number(member.daily_contribution)
        )?;
    }
    if top_lines.is_empty() {
        top_lines.push_str("_No members_");
    }

    Ok(EmbedView::new(format!("🤝 {}", alliance.name))
        .description(format!("Global rank #{}", alliance.rank))
        .field(
            "Members",
            format!("{}/{}", alliance.members, alliance.max_members),
            true,
        )
        .field("Value", format_decimal(alliance.value), true)
        .field(
            "Requirements",
            format!(
                "SV ≥ ${}{}",
                format_decimal(alliance.min_sv),
                if alliance.ipo { " · IPO" } else { "" }
            ),
            true,
        )
        .field("Total contribution", format!("${}", format_number(total)), true)
        .field("Today", format!("${}", format_number(today)), true)
        .field("Top contributors today", top_lines, false))
}
