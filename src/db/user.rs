use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, user::{DBUserCreate, UserFilter}};
use async_trait::async_trait;
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter, Set, SqlErr};

/// Storage for credential records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, payload: DBUserCreate) -> Result<i64, AppError>;
    /// `Ok(None)` when nothing matches.
    async fn get_user(&self, filter: UserFilter) -> Result<Option<UserModel>, AppError>;
    async fn update_user(&self, id: i64, phone_number: String, full_name: String) -> Result<(), AppError>;
}

#[async_trait]
impl UserRepository for PostgresService {
    async fn create_user(&self, payload: DBUserCreate) -> Result<i64, AppError> {
        let now = Utc::now();
        let res = User::insert(UserActive {
            phone_number: Set(payload.phone_number),
            full_name: Set(payload.full_name),
            password_hash: Set(payload.password_hash),
            salt: Set(payload.salt),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .exec(&self.db)
        .await
        .map_err(write_err)?;

        Ok(res.last_insert_id)
    }

    async fn get_user(&self, filter: UserFilter) -> Result<Option<UserModel>, AppError> {
        let mut condition = Condition::all();
        if let Some(id) = filter.id {
            condition = condition.add(Column::Id.eq(id));
        }
        if let Some(phone_number) = filter.phone_number {
            condition = condition.add(Column::PhoneNumber.eq(phone_number));
        }

        Ok(User::find().filter(condition).one(&self.db).await?)
    }

    async fn update_user(&self, id: i64, phone_number: String, full_name: String) -> Result<(), AppError> {
        let user = User::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?;

        let mut am: UserActive = user.into();
        am.phone_number = Set(phone_number);
        am.full_name = Set(full_name);
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.map(|_| ()).map_err(write_err)
    }
}

/// The unique phone index is the final word on duplicates; a lost race
/// surfaces here rather than in the lookup before it.
fn write_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AlreadyExists,
        _ => err.into(),
    }
}
