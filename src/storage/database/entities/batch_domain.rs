use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-domain job database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "batch_domains")]
pub struct Model {
    /// Job ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning request
    pub batch_request_id: String,

    /// Domain under test
    pub domain: String,

    /// Job status
    pub status: String,

    /// Web test output (JSON)
    pub web_result: Option<String>,

    /// Mail test output (JSON)
    pub mail_result: Option<String>,

    /// Last status change
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::batch_request::Entity",
        from = "Column::BatchRequestId",
        to = "super::batch_request::Column::RequestId",
        on_delete = "Cascade"
    )]
    BatchRequest,
}

impl Related<super::batch_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BatchRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
