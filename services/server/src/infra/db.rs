use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use beacon_server_schema::{outbox_events, users};

use crate::domain::repository::UserRepository;
use crate::domain::types::{OutboxEvent, User};
use crate::error::ServerError;

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn create(&self, user: &User) -> Result<(), ServerError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            reset_token_hash: Set(None),
            reset_token_expires_at: Set(None),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("insert user")?;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServerError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServerError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, ServerError> {
        let now = Utc::now();
        let model = users::Entity::find()
            .filter(users::Column::ResetTokenHash.eq(token_hash))
            .filter(users::Column::ResetTokenExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find user by reset token")?;
        Ok(model.map(user_from_model))
    }

    async fn save_reset_token_with_outbox(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
        event: &OutboxEvent,
    ) -> Result<(), ServerError> {
        let token_hash = token_hash.to_owned();
        let event = event.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    users::ActiveModel {
                        id: Set(user_id),
                        reset_token_hash: Set(Some(token_hash)),
                        reset_token_expires_at: Set(Some(expires_at)),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("save reset token with outbox")?;
        Ok(())
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), ServerError> {
        users::ActiveModel {
            id: Set(user_id),
            password_hash: Set(password_hash.to_owned()),
            reset_token_hash: Set(None),
            reset_token_expires_at: Set(None),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password")?;
        Ok(())
    }
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), sea_orm::DbErr> {
    let now = Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
        failed_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        reset_token_hash: model.reset_token_hash,
        reset_token_expires_at: model.reset_token_expires_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
