use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::v1::tokens;
use crate::entities::v1::users::{ActiveModel, Column, Entity, Model};
use crate::helpers::now;
use crate::responses::v1::user::User;

impl Model {
    pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Option<Self> {
        let query = Entity::find().filter(Column::Id.eq(id));

        match query.one(db).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Failed to find user by id");
                tracing::error!("Error: {}", e);

                None
            }
        }
    }

    pub async fn find_by_email<T: ToString>(db: &DatabaseConnection, email: T) -> Option<Self> {
        let query = Entity::find().filter(Column::Email.eq(email.to_string()));

        match query.one(db).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Failed to find user by email");
                tracing::error!("Error: {}", e);

                None
            }
        }
    }

    pub async fn email_exists<T: ToString>(db: &DatabaseConnection, email: T) -> bool {
        let query = Entity::find()
            .filter(Column::Email.eq(email.to_string()))
            .count(db);

        query.await.unwrap_or(0) > 0
    }

    pub async fn store(&self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        ActiveModel::from(self.clone()).insert(db).await
    }

    /// Apply a partial profile update. Only provided fields are written;
    /// `password` must already be hashed.
    pub async fn update_profile(
        &self,
        db: &DatabaseConnection,
        name: Option<String>,
        password: Option<String>,
    ) -> Result<Self, DbErr> {
        let mut model = ActiveModel::from(self.clone());

        if let Some(name) = name {
            model.name = Set(name);
        }

        if let Some(password) = password {
            model.password = Set(password);
        }

        model.updated_at = Set(now());
        model.update(db).await
    }

    /// Return the user's live token, creating one only when none exists.
    /// Re-authenticating therefore hands back the same opaque value.
    pub async fn issue_token(&self, db: &DatabaseConnection) -> Result<tokens::Model, DbErr> {
        let live = tokens::Entity::find()
            .filter(tokens::Column::UserId.eq(self.id))
            .filter(
                Condition::any()
                    .add(tokens::Column::ExpiredAt.is_null())
                    .add(tokens::Column::ExpiredAt.gt(now())),
            )
            .one(db)
            .await?;

        if let Some(token) = live {
            return Ok(token);
        }

        let token = tokens::Model {
            id: Uuid::new_v4(),
            user_id: self.id,
            expired_at: None,
            created_at: now(),
        };

        token.store(db).await
    }
}

impl From<Model> for User {
    fn from(val: Model) -> Self {
        User {
            email: val.email,
            name: val.name,
        }
    }
}

impl From<&Model> for User {
    fn from(val: &Model) -> Self {
        User {
            email: val.email.clone(),
            name: val.name.clone(),
        }
    }
}
