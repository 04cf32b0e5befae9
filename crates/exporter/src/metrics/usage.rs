/// 磁盘用量采集器
///
/// 每次抓取请求构造一个实例，只负责该请求携带的路径。

use common::{Error, Measurement, MeasurementTarget, Result};
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{GaugeVec, Opts};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::probe::{ScrapeScope, UsageProbe};

pub const NAMESPACE: &str = "diskusage";

pub struct UsageCollector {
    targets: Vec<MeasurementTarget>,
    probe: Arc<dyn UsageProbe>,
    scope: ScrapeScope,
    usage_bytes: GaugeVec,
}

impl UsageCollector {
    pub fn new(
        targets: Vec<MeasurementTarget>,
        probe: Arc<dyn UsageProbe>,
        scope: ScrapeScope,
    ) -> Result<Self> {
        let usage_bytes = GaugeVec::new(
            Opts::new("usage_bytes", "Disk usage in bytes").namespace(NAMESPACE),
            &["path"],
        )?;

        Ok(Self {
            targets,
            probe,
            scope,
            usage_bytes,
        })
    }

    /// 依次测量所有路径，跳过失败的路径
    ///
    /// 超时或取消时放弃剩余路径。
    pub fn measure_all(&self) -> Vec<Measurement> {
        let mut measurements = Vec::with_capacity(self.targets.len());

        for (index, path) in self.targets.iter().enumerate() {
            match self.scope.measure(self.probe.as_ref(), path) {
                Ok(size) => {
                    // du -s 默认输出的是块数，原样记录
                    debug!("Disk usage of {}: {}", path, size);
                    measurements.push(Measurement::new(path.clone(), size));
                }
                Err(e @ (Error::Timeout(_) | Error::Cancelled)) => {
                    warn!("Failed to get disk usage of {}: {}", path, e);
                    let skipped = self.targets.len() - index - 1;
                    if skipped > 0 {
                        warn!("Scrape aborted, skipping {} remaining target(s)", skipped);
                    }
                    break;
                }
                Err(e) => {
                    warn!("Failed to get disk usage of {}: {}", path, e);
                }
            }
        }

        measurements
    }
}

impl Collector for UsageCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.usage_bytes.desc()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.usage_bytes.reset();

        // 重复路径共用同一条序列，后测量的值覆盖先前的值
        for m in self.measure_all() {
            self.usage_bytes
                .with_label_values(&[m.path.as_str()])
                .set(m.size_bytes);
        }

        self.usage_bytes.collect()
    }
}
