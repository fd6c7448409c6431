use crate::error::DeliveryError;

/// Итог одного широковещания.
#[derive(Debug)]
pub struct BroadcastReport {
    /// Топик в точечной нотации (`orders.created`).
    pub topic: String,
    /// Сколько подписок совпало по топику и типу.
    pub matched: usize,
    /// Сколько вызовов завершилось успешно.
    pub delivered: usize,
    /// Ошибки отдельных доставок; `delivered + failures.len() == matched`.
    pub failures: Vec<DeliveryFailure>,
}

/// Ошибка доставки одному подписчику.
#[derive(Debug)]
pub struct DeliveryFailure {
    /// Заявленный тип полезной нагрузки упавшей подписки.
    pub payload_type_name: &'static str,
    pub error: DeliveryError,
}

impl BroadcastReport {
    pub(crate) fn new(topic: String, matched: usize) -> Self {
        Self {
            topic,
            matched,
            delivered: 0,
            failures: Vec::new(),
        }
    }

    /// Все совпавшие подписчики отработали без ошибок.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
