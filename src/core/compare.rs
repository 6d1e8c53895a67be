//! Chart descriptors for the comparison commands.

use crate::{
    api::models::{Airline, AllianceDetails, Member},
    core::chart::{ChartConfig, ChartDescriptor, ChartKind},
};

fn airline_labels(airlines: &[Airline]) -> Vec<String> {
    airlines.iter().map(|a| a.name.clone()).collect()
}

fn alliance_labels(alliances: &[AllianceDetails]) -> Vec<String> {
    alliances.iter().map(|a| a.alliance.name.clone()).collect()
}

fn share_value(airlines: &[Airline]) -> ChartConfig {
    ChartConfig::bar(
        "Share value",
        airline_labels(airlines),
        "Share value ($)",
        airlines.iter().map(|a| a.share).collect(),
    )
}

fn fleet_size(airlines: &[Airline]) -> ChartConfig {
    ChartConfig::bar(
        "Fleet size",
        airline_labels(airlines),
        "Aircraft",
        airlines.iter().map(|a| f64::from(a.fleet.size)).collect(),
    )
}

fn routes(airlines: &[Airline]) -> ChartConfig {
    ChartConfig::bar(
        "Routes",
        airline_labels(airlines),
        "Routes",
        airlines.iter().map(|a| f64::from(a.fleet.routes)).collect(),
    )
}

fn reputation(airlines: &[Airline]) -> ChartConfig {
    ChartConfig::multi(
        ChartKind::Bar,
        "Reputation",
        airline_labels(airlines),
        vec![
            (
                "Passenger (%)".to_string(),
                airlines.iter().map(|a| f64::from(a.reputation.airline)).collect(),
            ),
            (
                "Cargo (%)".to_string(),
                airlines.iter().map(|a| f64::from(a.reputation.cargo)).collect(),
            ),
        ],
    )
}

fn level(airlines: &[Airline]) -> ChartConfig {
    ChartConfig::bar(
        "Level",
        airline_labels(airlines),
        "Level",
        airlines.iter().map(|a| f64::from(a.level)).collect(),
    )
}

fn achievements(airlines: &[Airline]) -> ChartConfig {
    ChartConfig::bar(
        "Achievements",
        airline_labels(airlines),
        "Achievements",
        airlines.iter().map(|a| f64::from(a.achievements)).collect(),
    )
}

/// Chart views offered by `/compare airlines`.
#[must_use]
pub fn airline_charts() -> Vec<ChartDescriptor<Airline>> {
    vec![
        ChartDescriptor {
            id: "share",
            title: "Share value",
            description: "Current share value of each airline",
            build: share_value,
        },
        ChartDescriptor {
            id: "fleet",
            title: "Fleet size",
            description: "Number of aircraft owned",
            build: fleet_size,
        },
        ChartDescriptor {
            id: "routes",
            title: "Routes",
            description: "Number of routes operated",
            build: routes,
        },
        ChartDescriptor {
            id: "reputation",
            title: "Reputation",
            description: "Passenger and cargo reputation",
            build: reputation,
        },
        ChartDescriptor {
            id: "level",
            title: "Level",
            description: "Player level",
            build: level,
        },
        ChartDescriptor {
            id: "achievements",
            title: "Achievements",
            description: "Achievements unlocked",
            build: achievements,
        },
    ]
}

// Cast safety: contribution totals stay far below 2^53.
#[allow(clippy::cast_precision_loss)]
fn total_of(details: &AllianceDetails, value: fn(&Member) -> i64) -> f64 {
    details.members.iter().map(value).sum::<i64>() as f64
}

fn alliance_value(alliances: &[AllianceDetails]) -> ChartConfig {
    ChartConfig::bar(
        "Alliance value",
        alliance_labels(alliances),
        "Value",
        alliances.iter().map(|a| a.alliance.value).collect(),
    )
}

fn member_count(alliances: &[AllianceDetails]) -> ChartConfig {
    ChartConfig::bar(
        "Members",
        alliance_labels(alliances),
        "Members",
        alliances.iter().map(|a| f64::from(a.alliance.members)).collect(),
    )
}

fn total_contribution(alliances: &[AllianceDetails]) -> ChartConfig {
    ChartConfig::bar(
        "Total contribution",
        alliance_labels(alliances),
        "Contributed ($)",
        alliances.iter().map(|a| total_of(a, |m| m.contributed)).collect(),
    )
}

fn daily_contribution(alliances: &[AllianceDetails]) -> ChartConfig {
    ChartConfig::bar(
        "Daily contribution",
        alliance_labels(alliances),
        "Contributed today ($)",
        alliances.iter().map(|a| total_of(a, |m| m.daily_contribution)).collect(),
    )
}

/// Chart views offered by `/compare alliances`.
#[must_use]
pub fn alliance_charts() -> Vec<ChartDescriptor<AllianceDetails>> {
    vec![
        ChartDescriptor {
            id: "value",
            title: "Value",
            description: "Alliance value",
            build: alliance_value,
        },
        ChartDescriptor {
            id: "members",
            title: "Members",
            description: "Current member count",
            build: member_count,
        },
        ChartDescriptor {
            id: "contributed",
            title: "Total contribution",
            description: "Sum of lifetime member contributions",
            build: total_contribution,
        },
        ChartDescriptor {
            id: "daily",
            title: "Daily contribution",
            description: "Sum of today's member contributions",
            build: daily_contribution,
        },
    ]
}
