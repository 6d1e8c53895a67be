//! User profile entity - Links a Discord user to their game airline.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User profile database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID
    #[sea_orm(unique)]
    pub user_id: String,
    /// Linked game airline id
    pub airline_id: i64,
    /// Airline name when the link was made
    pub airline_name: String,
    /// Whether the airline plays realism mode
    pub realism: bool,
    /// When the link was last written
    pub updated_at: DateTimeUtc,
}

/// `UserProfile` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
