//! Contribution tracking - Daily member snapshots and their rollups.
//!
//! Every time an alliance is fetched its members' daily contribution is written for the
//! current day. Reads aggregate those rows per airline over a window of days.

use crate::{
    api::models::Member,
    core::format::format_number,
    entities::{MemberContribution, member_contribution},
    errors::Result,
};
use sea_orm::{
    FromQueryResult, QueryOrder, QuerySelect, Set, TransactionTrait,
    prelude::*,
    sea_query::{Expr, Func},
};
use std::collections::HashMap;
use tracing::debug;

/// Summed daily contribution of one airline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionTotal {
    /// Game airline id
    pub airline_id: i64,
    /// Airline name from the most recent snapshot in the window
    pub company: String,
    /// Sum of daily contributions in the window
    pub total: i64,
}

#[derive(Debug, FromQueryResult)]
struct AirlineSum {
    airline_id: i64,
    total: i64,
}

/// Writes one snapshot row per member for `day`, replacing any earlier snapshot of that day.
///
/// All rows are written in a single transaction so a partial alliance never lands.
pub async fn record_members(
    db: &DatabaseConnection,
    alliance: &str,
    members: &[Member],
    day: Date,
) -> Result<usize> {
    let txn = db.begin().await?;

    for member in members {
        let existing = MemberContribution::find()
            .filter(member_contribution::Column::AllianceName.eq(alliance))
            .filter(member_contribution::Column::AirlineId.eq(member.airline_id))
            .filter(member_contribution::Column::Day.eq(day))
            .one(&txn)
            .await?;

        match existing {
            Some(row) => {
                let mut active: member_contribution::ActiveModel = row.into();
                active.company = Set(member.company.clone());
                active.contributed = Set(member.contributed);
                active.daily = Set(member.daily_contribution);
                active.update(&txn).await?;
            }
            None => {
                member_contribution::ActiveModel {
                    alliance_name: Set(alliance.to_string()),
                    airline_id: Set(member.airline_id),
                    company: Set(member.company.clone()),
                    contributed: Set(member.contributed),
                    daily: Set(member.daily_contribution),
                    day: Set(day),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }
    }

    txn.commit().await?;
    debug!(alliance, day = %day, rows = members.len(), "Recorded member snapshot");
    Ok(members.len())
}

/// Stored spelling of `name`, matched case-insensitively (ASCII only, as `SQLite` `lower`).
///
/// Returns `None` when no snapshot of that alliance exists.
pub async fn resolve_alliance(db: &DatabaseConnection, name: &str) -> Result<Option<String>> {
    MemberContribution::find()
        .select_only()
        .column(member_contribution::Column::AllianceName)
        .filter(
            Expr::expr(Func::lower(Expr::col(member_contribution::Column::AllianceName)))
                .eq(name.trim().to_ascii_lowercase()),
        )
        .order_by_desc(member_contribution::Column::Day)
        .into_tuple::<String>()
        .one(db)
        .await
        .map_err(Into::into)
}

/// Sums daily contributions per airline for `alliance` from `since` (inclusive), highest first.
///
/// `alliance` must be the stored spelling, see [`resolve_alliance`].
pub async fn contribution_totals(
    db: &DatabaseConnection,
    alliance: &str,
    since: Date,
) -> Result<Vec<ContributionTotal>> {
    let sums = MemberContribution::find()
        .select_only()
        .column(member_contribution::Column::AirlineId)
        .column_as(Expr::col(member_contribution::Column::Daily).sum(), "total")
        .filter(member_contribution::Column::AllianceName.eq(alliance))
        .filter(member_contribution::Column::Day.gte(since))
        .group_by(member_contribution::Column::AirlineId)
        .into_model::<AirlineSum>()
        .all(db)
        .await?;

    // Newest first, so the first name seen per airline is the latest one.
    let names: Vec<(i64, String)> = MemberContribution::find()
        .select_only()
        .column(member_contribution::Column::AirlineId)
        .column(member_contribution::Column::Company)
        .filter(member_contribution::Column::AllianceName.eq(alliance))
        .filter(member_contribution::Column::Day.gte(since))
        .order_by_desc(member_contribution::Column::Day)
        .into_tuple()
        .all(db)
        .await?;
    let mut latest: HashMap<i64, String> = HashMap::new();
    for (airline_id, company) in names {
        latest.entry(airline_id).or_insert(company);
    }

    let mut totals: Vec<ContributionTotal> = sums
        .into_iter()
        .map(|sum| ContributionTotal {
            company: latest.remove(&sum.airline_id).unwrap_or_default(),
            airline_id: sum.airline_id,
            total: sum.total,
        })
        .collect();

    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.company.cmp(&b.company)));
    Ok(totals)
}

/// Alliance names with stored snapshots that contain `partial`, for autocomplete.
pub async fn tracked_alliances(
    db: &DatabaseConnection,
    partial: &str,
    limit: u64,
) -> Result<Vec<String>> {
    MemberContribution::find()
        .select_only()
        .column(member_contribution::Column::AllianceName)
        .distinct()
        .filter(member_contribution::Column::AllianceName.contains(partial))
        .order_by_asc(member_contribution::Column::AllianceName)
        .limit(limit)
        .into_tuple::<String>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// One display line per total: `3. Sky Ltd · $12,000`.
#[must_use]
pub fn contribution_lines(totals: &[ContributionTotal]) -> Vec<String> {
    totals
        .iter()
        .enumerate()
        .map(|(rank, t)| format!("{}. {} · ${}", rank + 1, t.company, format_number(t.total)))
        .collect()
}
