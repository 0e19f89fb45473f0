//! 프로세스 내 사용자 저장소
//!
//! MongoDB 없이 서비스를 구동하거나 테스트할 때 사용합니다.
//! 삽입은 하나의 쓰기 잠금 안에서 중복 검사와 함께 이루어집니다.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::config::AuthProvider;
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::IdentityStore;

#[derive(Default)]
pub struct InMemoryIdentityStore {
    users: RwLock<HashMap<ObjectId, User>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 사용자 수
    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 사용자 삭제 (외부에서 계정이 지워진 상황 재현용)
    pub fn remove(&self, id: &ObjectId) -> Option<User> {
        self.users.write().ok()?.remove(id)
    }
}

fn poisoned() -> AppError {
    AppError::DatabaseError("in-memory identity store lock poisoned".to_string())
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_external_id(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;

        Ok(users
            .values()
            .find(|user| user.external_id(provider) == Some(external_id))
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.get(&object_id).cloned())
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.write().map_err(|_| poisoned())?;

        let duplicate = AuthProvider::ALL.iter().any(|provider| {
            user.external_id(*provider).is_some_and(|external_id| {
                users
                    .values()
                    .any(|existing| existing.external_id(*provider) == Some(external_id))
            })
        });
        if duplicate {
            return Err(AppError::ConflictError("이미 등록된 외부 계정입니다".to_string()));
        }

        let id = *user.id.get_or_insert_with(ObjectId::new);
        if users.contains_key(&id) {
            return Err(AppError::ConflictError("이미 존재하는 사용자 ID입니다".to_string()));
        }

        users.insert(id, user.clone());
        Ok(user)
    }

    async fn init(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_insert_and_find() {
        let store = InMemoryIdentityStore::new();
        let user = User::new_from_provider(AuthProvider::GitHub, "42", "alice");
        let id = user.id_string().unwrap();

        store.insert(user.clone()).await.unwrap();

        let by_external = store.find_by_external_id(AuthProvider::GitHub, "42").await.unwrap();
        assert_eq!(by_external, Some(user.clone()));

        let by_id = store.find_by_id(&id).await.unwrap();
        assert_eq!(by_id, Some(user));
    }

    #[actix_web::test]
    async fn test_lookup_is_scoped_to_provider() {
        let store = InMemoryIdentityStore::new();
        store
            .insert(User::new_from_provider(AuthProvider::GitHub, "42", "alice"))
            .await
            .unwrap();

        let found = store.find_by_external_id(AuthProvider::Google, "42").await.unwrap();
        assert!(found.is_none());
    }

    #[actix_web::test]
    async fn test_duplicate_external_id_conflicts() {
        let store = InMemoryIdentityStore::new();
        store
            .insert(User::new_from_provider(AuthProvider::Twitter, "t1", "a"))
            .await
            .unwrap();

        let result = store
            .insert(User::new_from_provider(AuthProvider::Twitter, "t1", "b"))
            .await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_malformed_id_is_not_found() {
        let store = InMemoryIdentityStore::new();
        assert!(store.find_by_id("not-an-object-id").await.unwrap().is_none());
    }
}
