//! Admission cutoff entity - one historical cutoff rank data point.
//!
//! A row records the last admitted rank for a hospital/specialty pair in a
//! given year. Years with no record simply have no row; the estimator treats
//! them as absent, not zero.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admission cutoff database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admission_cutoffs")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Hospital code as used by the remote directory
    pub hospital_code: String,
    /// Specialty code as used by the remote directory
    pub specialty_code: String,
    /// Admission year (2019..=2025)
    pub year: i32,
    /// Rank of the last admitted candidate that year (lower is better)
    pub cutoff_rank: i32,
}

/// Cutoff has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
