use std::{
    any::{type_name, Any, TypeId},
    fmt,
    sync::Arc,
};

/// Type-erased полезная нагрузка одного широковещания.
///
/// Создаётся один раз на вызов `broadcast` и разделяется всеми
/// конкурентными вызовами подписчиков.
pub(crate) type ErasedPayload = Arc<dyn Any + Send + Sync>;

type ErasedCallback = Box<dyn Fn(&ErasedPayload) -> bool + Send + Sync>;

/// Запись подписки: идентификатор типа полезной нагрузки плюс type-erased
/// колбэк.
///
/// Тип фиксируется один раз при регистрации (`TypeId::of::<T>()`), а не
/// инспектируется на каждом широковещании. Сигнатура `Fn(&T)` гарантирует
/// ровно один аргумент на уровне системы типов.
pub(crate) struct SubscriptionEntry {
    payload_type: TypeId,
    payload_type_name: &'static str,
    invoke: ErasedCallback,
}

impl SubscriptionEntry {
    pub(crate) fn new<T, F>(callback: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self {
            payload_type: TypeId::of::<T>(),
            payload_type_name: type_name::<T>(),
            invoke: Box::new(move |payload| match payload.downcast_ref::<T>() {
                Some(value) => {
                    callback(value);
                    true
                }
                None => false,
            }),
        }
    }

    /// Совместима ли подписка с полезной нагрузкой данного типа.
    ///
    /// В номинальной системе типов Rust нет отношения подтипов между
    /// конкретными типами, поэтому совместимость — это равенство `TypeId`,
    /// одинаково для точных и wildcard-подписок.
    pub(crate) fn accepts(&self, payload_type: TypeId) -> bool {
        self.payload_type == payload_type
    }

    pub(crate) fn payload_type_name(&self) -> &'static str {
        self.payload_type_name
    }

    /// Вызывает колбэк. Возвращает `false`, если downcast не удался
    /// (рассинхронизация с `accepts`, репортится как ошибка доставки).
    pub(crate) fn deliver(&self, payload: &ErasedPayload) -> bool {
        (self.invoke)(payload)
    }
}

impl fmt::Debug for SubscriptionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionEntry")
            .field("payload_type", &self.payload_type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Ping;
    struct Pong;

    /// Тест проверяет, что `accepts` отвечает `true` только для типа,
    /// зафиксированного при регистрации.
    #[test]
    fn test_accepts_matches_registered_type_only() {
        let entry = SubscriptionEntry::new(|_: &Ping| {});
        assert!(entry.accepts(TypeId::of::<Ping>()));
        assert!(!entry.accepts(TypeId::of::<Pong>()));
        assert!(!entry.accepts(TypeId::of::<u32>()));
    }

    /// Тест проверяет, что `deliver` вызывает колбэк при совпадении типа.
    #[test]
    fn test_deliver_invokes_callback_on_matching_type() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let entry = SubscriptionEntry::new(move |_: &Ping| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let payload: ErasedPayload = Arc::new(Ping);
        assert!(entry.deliver(&payload));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    /// Тест проверяет, что при несовпадении типа колбэк не вызывается,
    /// а `deliver` возвращает `false`.
    #[test]
    fn test_deliver_rejects_foreign_type() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let entry = SubscriptionEntry::new(move |_: &Ping| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let payload: ErasedPayload = Arc::new(Pong);
        assert!(!entry.deliver(&payload));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    /// Тест проверяет, что колбэк видит само значение, а не только факт
    /// вызова.
    #[test]
    fn test_deliver_passes_value_through() {
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = seen.clone();
        let entry = SubscriptionEntry::new(move |value: &usize| {
            sink.store(*value, Ordering::SeqCst);
        });

        let payload: ErasedPayload = Arc::new(41_usize);
        assert!(entry.deliver(&payload));
        assert_eq!(seen.load(Ordering::SeqCst), 41);
    }

    #[test]
    fn test_payload_type_name() {
        let entry = SubscriptionEntry::new(|_: &u64| {});
        assert!(entry.payload_type_name().contains("u64"));
    }
}
