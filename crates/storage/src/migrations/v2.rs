//! Migration v2: list-by-user index

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_memories_user_created ON memories(user_id, created_at);
";
