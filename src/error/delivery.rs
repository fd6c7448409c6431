use std::any::Any;

use thiserror::Error;
use tokio::task::JoinError;

/// Ошибка доставки одному подписчику во время fan-out.
///
/// Не прерывает широковещание: остальные подписчики того же вызова
/// `broadcast` выполняются в любом случае, а ошибка попадает в
/// `BroadcastReport::failures`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("subscriber callback panicked: {0}")]
    Panicked(String),

    #[error("subscriber expected payload type {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("subscriber task was cancelled before completion")]
    Cancelled,
}

impl DeliveryError {
    /// Извлекает текст паники из payload'а `catch_unwind`/`JoinError`.
    pub(crate) fn from_panic(panic: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = panic.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        DeliveryError::Panicked(message)
    }
}

// === Преобразования ===

impl From<JoinError> for DeliveryError {
    fn from(err: JoinError) -> Self {
        if err.is_panic() {
            DeliveryError::from_panic(err.into_panic())
        } else {
            DeliveryError::Cancelled
        }
    }
}
