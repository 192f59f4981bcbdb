use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::entities::v1::tokens::{ActiveModel, Column, Entity, Model};
use crate::entities::v1::users;
use crate::helpers::now;

impl Model {
    /// Resolve the user a live token belongs to. Expired tokens resolve to
    /// nothing, as do database failures (which are logged, not surfaced).
    pub async fn user(db: &DatabaseConnection, id: Uuid) -> Option<users::Model> {
        let query = users::Entity::find()
            .inner_join(Entity)
            .filter(Column::Id.eq(id))
            .filter(
                Condition::any()
                    .add(Column::ExpiredAt.gt(now()))
                    .add(Column::ExpiredAt.is_null()),
            );

        match query.one(db).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Failed to resolve token");
                tracing::error!("Error: {}", e);

                None
            }
        }
    }

    pub async fn store(&self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        ActiveModel::from(self.clone()).insert(db).await
    }
}
