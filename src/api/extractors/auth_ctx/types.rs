/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token の検証ロジックは middleware/services 側の責務
 * - 所有権チェック (Forbidden) は services/authz で行う。ここは identity のみ
 */

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は内部ユーザーID（users.id, store-assigned な数値）
#[derive(Debug, Clone, Copy)]
pub struct AuthCtx {
    pub user_id: i64,
}

impl AuthCtx {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}
