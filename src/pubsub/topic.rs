use crate::error::{BroadcastError, SubscribeError};

/// Сегмент-маркер wildcard-подписки.
///
/// Подписка `["orders", "*"]` прикрепляется к узлу `orders` и получает
/// широковещания по `["orders"]` и по любому топику глубже.
pub const WILDCARD: &str = "*";

/// Проверяет топик подписки.
///
/// Топик должен содержать хотя бы один сегмент, сегменты непустые, а маркер
/// wildcard допустим только в последней позиции.
pub(crate) fn validate_subscribe_topic(topic: &[&str]) -> Result<(), SubscribeError> {
    if topic.is_empty() {
        return Err(SubscribeError::EmptyTopic);
    }
    for (index, segment) in topic.iter().enumerate() {
        if segment.is_empty() {
            return Err(SubscribeError::EmptySegment { index });
        }
        if *segment == WILDCARD && index + 1 != topic.len() {
            return Err(SubscribeError::WildcardPosition { index });
        }
    }
    Ok(())
}

/// Проверяет топик широковещания.
///
/// Пустая последовательность легальна (широковещание на корень). Маркер
/// wildcard здесь не специален: это обычный литеральный сегмент, под которым
/// подписка никогда не создаёт дочерний узел.
pub(crate) fn validate_broadcast_topic(topic: &[&str]) -> Result<(), BroadcastError> {
    for (index, segment) in topic.iter().enumerate() {
        if segment.is_empty() {
            return Err(BroadcastError::EmptySegment { index });
        }
    }
    Ok(())
}

/// Отображение топика для логов и отчётов: сегменты через точку.
pub(crate) fn render_topic(topic: &[&str]) -> String {
    topic.join(".")
}
