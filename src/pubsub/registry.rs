use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use dashmap::DashMap;
use tokio::{
    sync::Semaphore,
    task::{Id, JoinSet},
};
use tracing::{debug, trace, warn};

use super::{
    config::RegistryConfig,
    node::TopicNode,
    report::{BroadcastReport, DeliveryFailure},
    subscriber::{ErasedPayload, SubscriptionEntry},
    topic::{render_topic, validate_broadcast_topic, validate_subscribe_topic, WILDCARD},
};
use crate::error::{BroadcastError, DeliveryError, SubscribeError};

/// Реестр подписок: типизированный pub/sub по дереву топиков.
///
/// Поддерживает:
/// - Точные подписки по полному пути топика
/// - Wildcard-подписки (`["orders", "*"]`) на узел и всё под ним
/// - Фильтрацию по типу полезной нагрузки, зафиксированному при регистрации
/// - Конкурентный fan-out с ограничением параллелизма и изоляцией паник
/// - Статистику широковещаний и ошибок доставки
///
/// Реестр — явное значение: независимые реестры не разделяют состояние.
/// `subscribe` и `broadcast` можно звать конкурентно из разных задач;
/// структуру дерева мутирует только подписка, широковещание обходит его
/// в режиме чтения.
pub struct Registry {
    /// Корень дерева топиков; живёт столько же, сколько реестр.
    root: Arc<TopicNode>,
    /// Пул interned-сегментов: одинаковые сегменты разделяют один `Arc<str>`.
    segments: DashMap<String, Arc<str>>,
    /// Разрешения на одновременные вызовы подписчиков.
    fanout_permits: Arc<Semaphore>,
    config: RegistryConfig,
    /// Общее количество вызовов `broadcast`.
    pub broadcast_count: AtomicUsize,
    /// Количество упавших доставок (паника подписчика или рассинхронизация
    /// типов).
    pub delivery_error_count: AtomicUsize,
}

impl Registry {
    /// Создаёт реестр с настройками по умолчанию.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Создаёт реестр с заданными настройками.
    pub fn with_config(config: RegistryConfig) -> Self {
        let fanout_limit = config.effective_fanout_limit();
        Self {
            root: Arc::new(TopicNode::new()),
            segments: DashMap::new(),
            fanout_permits: Arc::new(Semaphore::new(fanout_limit)),
            config,
            broadcast_count: AtomicUsize::new(0),
            delivery_error_count: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Регистрирует `callback` под топиком `topic`.
    ///
    /// Колбэк принимает ровно один аргумент — ссылку на полезную нагрузку
    /// типа `T`; этот тип и становится фильтром подписки. Если последний
    /// сегмент — [`WILDCARD`], подписка прикрепляется к узлу, достигнутому
    /// предыдущими сегментами, и получает широковещания по нему и по всем
    /// топикам глубже.
    ///
    /// # Ошибки
    /// - `EmptyTopic` — пустая последовательность сегментов
    /// - `EmptySegment` — пустой сегмент
    /// - `WildcardPosition` — wildcard не в последней позиции
    ///
    /// Все ошибки возникают до какой-либо мутации дерева.
    pub fn subscribe<T, F>(&self, topic: &[&str], callback: F) -> Result<(), SubscribeError>
    where
        T: Any + Send + Sync,
        F: Fn(&T) + Send + Sync + 'static,
    {
        validate_subscribe_topic(topic)?;
        let entry = Arc::new(SubscriptionEntry::new::<T, F>(callback));
        let payload_type = entry.payload_type_name();

        let mut node = self.root.clone();
        for segment in topic {
            if *segment == WILDCARD {
                node.add_wildcard(entry);
                debug!(
                    topic = %render_topic(topic),
                    payload_type,
                    kind = "wildcard",
                    "subscribed"
                );
                return Ok(());
            }
            node = node.child_or_insert(self.intern_segment(segment));
        }
        node.add_exact(entry);
        debug!(
            topic = %render_topic(topic),
            payload_type,
            kind = "exact",
            "subscribed"
        );
        Ok(())
    }

    /// Доставляет `payload` всем подпискам, чей топик и тип совпадают.
    ///
    /// Обход дерева read-only: отсутствующий дочерний узел означает, что
    /// ниже подписчиков нет. По пути собираются wildcard-подписки каждого
    /// пройденного узла (включая конечный), в конечном узле — точные;
    /// совпадение по типу — равенство `TypeId`. Собранные подписки
    /// вызываются конкурентно, без гарантии порядка; вызов завершается
    /// только после завершения всех доставок.
    ///
    /// Пустой `topic` легален и достигает только wildcard-подписок корня.
    /// Отсутствие совпадений — не ошибка: возвращается пустой отчёт.
    /// Паника подписчика изолируется и попадает в `failures` отчёта, не
    /// мешая остальным доставкам того же вызова.
    pub async fn broadcast<T>(
        &self,
        topic: &[&str],
        payload: T,
    ) -> Result<BroadcastReport, BroadcastError>
    where
        T: Any + Send + Sync,
    {
        validate_broadcast_topic(topic)?;
        self.broadcast_count.fetch_add(1, Ordering::Relaxed);

        let matched = self.collect_matches(topic, TypeId::of::<T>());
        let mut report = BroadcastReport::new(render_topic(topic), matched.len());
        trace!(
            topic = %report.topic,
            payload_type = type_name::<T>(),
            matched = report.matched,
            "broadcast dispatch"
        );
        if matched.is_empty() {
            return Ok(report);
        }

        let payload: ErasedPayload = Arc::new(payload);
        let actual = type_name::<T>();
        let mut tasks: JoinSet<Result<(), DeliveryError>> = JoinSet::new();
        let mut subscriber_types: HashMap<Id, &'static str> = HashMap::new();

        for entry in matched {
            let payload = payload.clone();
            let permits = self.fanout_permits.clone();
            let expected = entry.payload_type_name();
            let handle = tasks.spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return Err(DeliveryError::Cancelled),
                };
                if entry.deliver(&payload) {
                    Ok(())
                } else {
                    Err(DeliveryError::TypeMismatch { expected, actual })
                }
            });
            subscriber_types.insert(handle.id(), expected);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((_, Ok(()))) => report.delivered += 1,
                Ok((id, Err(error))) => {
                    self.record_failure(&mut report, subscriber_type(&subscriber_types, id), error);
                }
                Err(join_error) => {
                    let id = join_error.id();
                    self.record_failure(
                        &mut report,
                        subscriber_type(&subscriber_types, id),
                        join_error.into(),
                    );
                }
            }
        }

        debug!(
            topic = %report.topic,
            matched = report.matched,
            delivered = report.delivered,
            failed = report.failures.len(),
            "broadcast complete"
        );
        Ok(report)
    }

    /// Обходит дерево по топику и собирает подписки, совместимые с типом
    /// полезной нагрузки: wildcard-подписки каждого пройденного узла, затем
    /// точные подписки конечного узла.
    fn collect_matches(
        &self,
        topic: &[&str],
        payload_type: TypeId,
    ) -> Vec<Arc<SubscriptionEntry>> {
        let mut matched = Vec::new();
        let mut node = self.root.clone();

        for segment in topic {
            collect_accepting(&mut matched, node.snapshot_wildcard(), payload_type);
            match node.child(segment) {
                Some(child) => node = child,
                // ниже этого узла дерево не строилось — подписчиков нет
                None => return matched,
            }
        }

        // wildcard конечного узла покрывает сам топик и всё под ним
        collect_accepting(&mut matched, node.snapshot_wildcard(), payload_type);
        collect_accepting(&mut matched, node.snapshot_exact(), payload_type);
        matched
    }

    fn record_failure(
        &self,
        report: &mut BroadcastReport,
        payload_type_name: &'static str,
        error: DeliveryError,
    ) {
        self.delivery_error_count.fetch_add(1, Ordering::Relaxed);
        warn!(
            topic = %report.topic,
            subscriber_type = payload_type_name,
            error = %error,
            "subscriber delivery failed"
        );
        report.failures.push(DeliveryFailure {
            payload_type_name,
            error,
        });
    }

    /// Возвращает interned `Arc<str>` для сегмента: одинаковые сегменты по
    /// всему дереву разделяют одну аллокацию.
    fn intern_segment(&self, segment: &str) -> Arc<str> {
        if let Some(existing) = self.segments.get(segment) {
            return existing.clone();
        }
        let interned: Arc<str> = Arc::from(segment);
        self.segments.insert(segment.to_string(), interned.clone());
        interned
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_accepting(
    matched: &mut Vec<Arc<SubscriptionEntry>>,
    snapshot: Vec<Arc<SubscriptionEntry>>,
    payload_type: TypeId,
) {
    matched.extend(
        snapshot
            .into_iter()
            .filter(|entry| entry.accepts(payload_type)),
    );
}

fn subscriber_type(types: &HashMap<Id, &'static str>, id: Id) -> &'static str {
    types.get(&id).copied().unwrap_or("<unknown>")
}
