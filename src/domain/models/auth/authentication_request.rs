/// 인증 모드를 정의하는 열거형
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 유효한 세션이 반드시 필요함 (없으면 401)
    Required,
    /// 세션이 선택사항임 (있으면 해석, 없으면 익명으로 통과)
    Optional,
}
