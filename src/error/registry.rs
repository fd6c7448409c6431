use thiserror::Error;

/// Ошибка валидации аргументов `subscribe`.
///
/// Возникает синхронно, до какой-либо мутации дерева топиков.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
    #[error("topic must contain at least one segment")]
    EmptyTopic,

    #[error("topic segment at index {index} is empty")]
    EmptySegment { index: usize },

    #[error("wildcard marker is only allowed as the final segment (found at index {index})")]
    WildcardPosition { index: usize },
}

/// Ошибка валидации аргументов `broadcast`.
///
/// Пустой топик — не ошибка (широковещание на корень); ошибкой является
/// только пустой сегмент внутри топика.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    #[error("topic segment at index {index} is empty")]
    EmptySegment { index: usize },
}
