use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::id_string;
use super::lenient_timestamp;
use crate::domain::errors::StoreError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::outbound::store_client::StoreQuery;
use crate::outbound::store_client::SupabaseClient;

const TABLE: &str = "users";

pub struct SupabaseUserRepository {
    client: SupabaseClient,
}

impl SupabaseUserRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn find_one(&self, query: StoreQuery) -> Result<Option<User>, StoreError> {
        let rows: Vec<UserRow> = self.client.select(TABLE, &query).await?;
        Ok(rows.into_iter().next().map(User::from))
    }
}

#[async_trait]
impl UserRepository for SupabaseUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let row: UserRow = self.client.insert(TABLE, &InsertUserRow::from(&user)).await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        self.find_one(StoreQuery::new().select("*").eq("id", id.as_str()))
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.find_one(StoreQuery::new().select("*").eq("email", email))
            .await
    }
}

#[derive(Debug, Deserialize)]
struct UserRow {
    #[serde(deserialize_with = "id_string")]
    id: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    role: Option<String>,
    password_hash: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    updated_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            email: row.email,
            name: row.name,
            phone: row.phone,
            role: row.role.as_deref().map(Role::coerce).unwrap_or_default(),
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct InsertUserRow<'a> {
    email: &'a str,
    password_hash: &'a str,
    name: Option<&'a str>,
    phone: Option<&'a str>,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'a> From<&'a NewUser> for InsertUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            email: &user.email,
            password_hash: &user.password_hash,
            name: user.name.as_deref(),
            phone: user.phone.as_deref(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.created_at,
        }
    }
}
