//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//!
//! ## 특징
//!
//! - **프로바이더 범위 조회**: 조회는 항상 한 프로바이더 필드로 한정됩니다
//! - **원자적 생성**: 사용자 생성은 `insert_one` 한 번으로 끝납니다
//! - **데이터 무결성**: 프로바이더 필드마다 unique + sparse 인덱스

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::config::AuthProvider;
use crate::db::Database;
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult};

const USERS_COLLECTION: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 신원 저장소
///
/// `(provider, external_id)` 쌍은 저장소 전체에서 최대 하나의 사용자에만 존재합니다.
/// 이 불변식은 구현체가 `insert`에서 강제해야 합니다.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// 프로바이더 필드가 `external_id`와 일치하는 사용자 조회
    async fn find_by_external_id(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> AppResult<Option<User>>;

    /// 내부 ID로 조회. 형식이 잘못된 ID는 없는 사용자로 취급합니다.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// 새 사용자를 원자적으로 삽입합니다.
    ///
    /// 같은 외부 ID를 가진 사용자가 이미 있으면 `ConflictError`를 반환합니다.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// 인덱스 등 저장소 초기화
    async fn init(&self) -> AppResult<()>;
}

/// MongoDB 기반 사용자 리포지토리
///
/// - **컬렉션명**: `users`
/// - **인덱스**: `googleId`, `twitterId`, `githubId` 각각 unique + sparse
pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(USERS_COLLECTION)
    }
}

#[async_trait]
impl IdentityStore for MongoUserRepository {
    async fn find_by_external_id(
        &self,
        provider: AuthProvider,
        external_id: &str,
    ) -> AppResult<Option<User>> {
        let field = provider.external_id_field();

        self.collection()
            .find_one(doc! { field: external_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            log::debug!("형식이 잘못된 사용자 ID 조회: {}", id);
            return Ok(None);
        };

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let result = self.collection()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("이미 등록된 외부 계정입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        if user.id.is_none() {
            user.id = result.inserted_id.as_object_id();
        }

        Ok(user)
    }

    async fn init(&self) -> AppResult<()> {
        let indexes = AuthProvider::ALL.iter().map(|provider| {
            let field = provider.external_id_field();

            IndexModel::builder()
                .keys(doc! { field: 1 })
                .options(IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name(format!("{}_unique", field))
                    .build())
                .build()
        });

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::info!("users 컬렉션 인덱스 확인 완료");
        Ok(())
    }
}

/// 중복 키(E11000) 에러인지 확인
fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
