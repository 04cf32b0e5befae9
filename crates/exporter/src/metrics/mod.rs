/// 指标采集
///
/// 每次抓取请求都会构建一个独立的 `Registry`，请求结束后丢弃，
/// 请求之间不共享任何采集状态。

mod runtime;
mod usage;

pub use runtime::RuntimeCollector;
pub use usage::{UsageCollector, NAMESPACE};

use common::{MeasurementTarget, Result};
use prometheus::{Encoder, Registry, TextEncoder};
use std::sync::Arc;

use crate::probe::{ScrapeScope, UsageProbe};

/// 为单次抓取请求构建注册表
pub fn build_registry(
    targets: Vec<MeasurementTarget>,
    probe: Arc<dyn UsageProbe>,
    scope: ScrapeScope,
) -> Result<Registry> {
    let registry = Registry::new();

    #[cfg(target_os = "linux")]
    registry.register(Box::new(
        prometheus::process_collector::ProcessCollector::for_self(),
    ))?;

    registry.register(Box::new(RuntimeCollector::new(scope.handle().clone())?))?;
    registry.register(Box::new(UsageCollector::new(targets, probe, scope)?))?;

    Ok(registry)
}

/// 采集并编码为 Prometheus 文本格式
///
/// 会阻塞直到所有路径测量完成，需在阻塞线程中调用。
pub fn render(
    targets: Vec<MeasurementTarget>,
    probe: Arc<dyn UsageProbe>,
    scope: ScrapeScope,
) -> Result<Vec<u8>> {
    let registry = build_registry(targets, probe, scope)?;

    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(buffer)
}
