use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use super::subscriber::SubscriptionEntry;

type SegmentKey = Arc<str>;

/// Узел префиксного дерева топиков.
///
/// Дочерние узлы создаются лениво при первом проходе подписки и живут до
/// конца жизни реестра. Списки подписчиков только растут; чтение идёт через
/// снапшоты, чтобы итерация не наблюдала частично обновлённый список.
pub(crate) struct TopicNode {
    /// Сегмент → дочерний узел.
    children: DashMap<SegmentKey, Arc<TopicNode>>,
    /// Подписки, чей полный путь закончился в этом узле.
    exact: RwLock<Vec<Arc<SubscriptionEntry>>>,
    /// Wildcard-подписки, прикреплённые к этому узлу.
    wildcard: RwLock<Vec<Arc<SubscriptionEntry>>>,
}

impl TopicNode {
    pub(crate) fn new() -> Self {
        Self {
            children: DashMap::new(),
            exact: RwLock::new(Vec::new()),
            wildcard: RwLock::new(Vec::new()),
        }
    }

    /// Возвращает дочерний узел для сегмента, создавая его при отсутствии.
    /// Используется только подпиской.
    pub(crate) fn child_or_insert(&self, segment: SegmentKey) -> Arc<TopicNode> {
        self.children
            .entry(segment)
            .or_insert_with(|| Arc::new(TopicNode::new()))
            .clone()
    }

    /// Read-only поиск дочернего узла. Используется широковещанием:
    /// отсутствие ребёнка означает "ниже подписчиков нет".
    pub(crate) fn child(&self, segment: &str) -> Option<Arc<TopicNode>> {
        self.children.get(segment).map(|child| child.value().clone())
    }

    pub(crate) fn add_exact(&self, entry: Arc<SubscriptionEntry>) {
        self.exact.write().push(entry);
    }

    pub(crate) fn add_wildcard(&self, entry: Arc<SubscriptionEntry>) {
        self.wildcard.write().push(entry);
    }

    /// Независимая копия списка точных подписчиков на момент вызова.
    pub(crate) fn snapshot_exact(&self) -> Vec<Arc<SubscriptionEntry>> {
        self.exact.read().clone()
    }

    /// Независимая копия списка wildcard-подписчиков на момент вызова.
    pub(crate) fn snapshot_wildcard(&self) -> Vec<Arc<SubscriptionEntry>> {
        self.wildcard.read().clone()
    }

    #[cfg(test)]
    pub(crate) fn child_count(&self) -> usize {
        self.children.len()
    }
}
