//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use database::mongodb::is_duplicate_key;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

const EMAIL_INDEX: &str = "users_email_unique";

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }

    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }

    /// Create the unique index on `email`.
    #[instrument(skip(self))]
    pub async fn ensure_indexes(&self) -> UserResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .name(EMAIL_INDEX.to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!(index = EMAIL_INDEX, "User indexes ready");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn insert(&self, user: User) -> UserResult<User> {
        match self.collection.insert_one(&user).await {
            Ok(_) => {
                tracing::info!(user_id = %user.id, role = %user.role, "Created user");
                Ok(user)
            }
            Err(e) if is_duplicate_key(&e) => Err(UserError::DuplicateEmail(user.email)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "_id": id.to_string() })
            .await?;
        Ok(user)
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> UserResult<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}
