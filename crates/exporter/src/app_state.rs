/// 应用全局状态

use std::sync::Arc;

use crate::config::Config;
use crate::probe::UsageProbe;

/// 应用状态
///
/// 只保存只读配置和无状态的探测器，不保存任何采集结果。
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// 磁盘用量探测器
    pub probe: Arc<dyn UsageProbe>,
}

impl AppState {
    pub fn new(config: Config, probe: Arc<dyn UsageProbe>) -> Self {
        Self {
            config: Arc::new(config),
            probe,
        }
    }

    /// 获取探测器（克隆）
    pub fn probe(&self) -> Arc<dyn UsageProbe> {
        self.probe.clone()
    }
}
