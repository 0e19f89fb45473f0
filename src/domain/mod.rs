//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈로, 영속 엔티티와 요청/응답 계약,
//! 그리고 인증 플로우 중간 단계의 모델을 담당합니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities      - MongoDB에 저장되는 사용자 레코드
//! ├── DTOs          - HTTP 응답/쿼리 계약
//! └── Models        - 핸드셰이크 결과, 세션 레코드, 요청 컨텍스트의 인증 사용자
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, MongoDB, Redis)
//! ```
//!
//! ## 모듈 구성
//!
//! ### [`entities`] - 핵심 도메인 엔티티
//!
//! 내부 ID와 프로바이더별 외부 ID를 가진 [`User`]를 정의합니다.
//! 사용자는 생성 이후 리컨실러에 의해 수정되지 않습니다.
//!
//! ### [`dto`] - 데이터 전송 객체
//!
//! - [`UserResponse`]: `/getuser`, `/api/v1/me` 응답 형태
//! - [`OAuthCallbackQuery`]: 프로바이더 콜백 쿼리 파라미터
//!
//! ### [`models`] - 플로우 모델
//!
//! - [`HandshakeResult`]: 프로바이더 핸드셰이크의 성공/실패 태그드 결과
//! - [`SessionToken`], [`SessionRecord`], [`PendingHandshake`]: 서버 측 세션 상태
//! - [`AuthenticatedUser`], [`OptionalUser`]: 요청 컨텍스트 추출자

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
