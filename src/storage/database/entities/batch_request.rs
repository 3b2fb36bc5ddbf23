use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Batch request database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "batch_requests")]
pub struct Model {
    /// Externally visible request id
    #[sea_orm(primary_key, auto_increment = false)]
    pub request_id: String,

    /// Owning account name
    pub owner: String,

    /// Client supplied label
    pub name: String,

    /// Test kind ("web" or "mail")
    pub request_type: String,

    /// Lifecycle status
    pub status: String,

    /// Submission timestamp
    pub submit_date: DateTimeWithTimeZone,

    /// Set on the terminal transition
    pub finished_date: Option<DateTimeWithTimeZone>,

    /// Key of the persisted report artifact
    pub report_file: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::batch_domain::Entity")]
    BatchDomain,
}

impl Related<super::batch_domain::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchDomain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
