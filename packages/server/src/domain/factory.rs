//! Domain factories for creating identifiers.

use super::{ConnectionId, MessageId};

/// Factory for generating ConnectionId instances.
///
/// Every accepted socket gets a fresh random UUID v4.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating MessageId instances.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(uuid::Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_factory_generate() {
        // テスト項目: UUID v4 形式の ConnectionId を生成できる
        // when (操作):
        let id = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_eq!(id.as_str().len(), 36); // UUID v4 の標準長（ハイフン含む）
    }

    #[test]
    fn test_factories_generate_unique_ids() {
        // テスト項目: 毎回異なる ID を生成する
        assert_ne!(ConnectionIdFactory::generate(), ConnectionIdFactory::generate());
        assert_ne!(MessageIdFactory::generate(), MessageIdFactory::generate());
    }
}
