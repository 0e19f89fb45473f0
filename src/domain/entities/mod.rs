//! # Entities Module
//!
//! MongoDB에 영속되는 도메인 엔티티들입니다.
//!
//! | 엔티티 | 컬렉션 | 고유 인덱스 |
//! |--------|--------|-------------|
//! | [`User`] | `users` | `googleId`, `twitterId`, `githubId` (각각 unique + sparse) |

pub mod users;

pub use users::*;
