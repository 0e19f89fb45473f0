//! 사용자 신원 서비스 모듈

pub mod identity_reconciler;

pub use identity_reconciler::IdentityReconciler;
