//! Member contribution entity - Daily snapshot of an alliance member's contribution.
//!
//! One row exists per member per alliance per day. Rows are written whenever an alliance
//! is fetched from the game API and read back as rollups (`SUM(daily)` per member).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member contribution database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member_contributions")]
pub struct Model {
    /// Unique identifier for the snapshot row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the alliance the member belonged to on `day`
    pub alliance_name: String,
    /// Game airline id of the member
    pub airline_id: i64,
    /// Airline (company) name at snapshot time
    pub company: String,
    /// Lifetime contribution reported by the game
    pub contributed: i64,
    /// Contribution made during `day`
    pub daily: i64,
    /// Calendar day (UTC) the snapshot describes
    pub day: Date,
}

/// `MemberContribution` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
