//! Quiz score entity - Accumulated quiz points per guild member.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quiz score database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quiz_scores")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord guild ID the points were earned in
    pub guild_id: String,
    /// Discord user ID
    pub user_id: String,
    /// Total points
    pub points: i64,
}

/// `QuizScore` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
