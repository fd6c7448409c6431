/// Настройки реестра.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Максимальное число одновременно выполняющихся вызовов подписчиков
    /// при fan-out. По умолчанию — число доступных ядер.
    pub fanout_limit: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            fanout_limit: num_cpus::get(),
        }
    }
}

impl RegistryConfig {
    /// Нулевой лимит означал бы семафор без разрешений и вечное ожидание
    /// каждого широковещания, поэтому значение зажимается снизу единицей.
    pub(crate) fn effective_fanout_limit(&self) -> usize {
        self.fanout_limit.max(1)
    }
}
