//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod member_contribution;
pub mod quiz_score;
pub mod user_profile;

// Re-export specific types to avoid conflicts
pub use member_contribution::{
    Column as MemberContributionColumn, Entity as MemberContribution,
    Model as MemberContributionModel,
};
pub use quiz_score::{Column as QuizScoreColumn, Entity as QuizScore, Model as QuizScoreModel};
pub use user_profile::{
    Column as UserProfileColumn, Entity as UserProfile, Model as UserProfileModel,
};
