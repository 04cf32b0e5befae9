/// tokio 运行时指标

use common::Result;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::IntGauge;
use tokio::runtime::Handle;

pub struct RuntimeCollector {
    handle: Handle,
    workers: IntGauge,
    alive_tasks: IntGauge,
    global_queue_depth: IntGauge,
}

impl RuntimeCollector {
    pub fn new(handle: Handle) -> Result<Self> {
        Ok(Self {
            handle,
            workers: IntGauge::new(
                "tokio_runtime_workers",
                "Number of worker threads used by the runtime",
            )?,
            alive_tasks: IntGauge::new(
                "tokio_runtime_alive_tasks",
                "Number of tasks currently alive in the runtime",
            )?,
            global_queue_depth: IntGauge::new(
                "tokio_runtime_global_queue_depth",
                "Number of tasks currently scheduled in the runtime's global queue",
            )?,
        })
    }
}

impl Collector for RuntimeCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.workers
            .desc()
            .into_iter()
            .chain(self.alive_tasks.desc())
            .chain(self.global_queue_depth.desc())
            .collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        let metrics = self.handle.metrics();
        self.workers.set(metrics.num_workers() as i64);
        self.alive_tasks.set(metrics.num_alive_tasks() as i64);
        self.global_queue_depth.set(metrics.global_queue_depth() as i64);

        let mut families = self.workers.collect();
        families.extend(self.alive_tasks.collect());
        families.extend(self.global_queue_depth.collect());
        families
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::runtime::Builder;

    #[test]
    fn test_collect_runtime_metrics() {
        let rt = Builder::new_multi_thread().worker_threads(2).build().unwrap();
        let collector = RuntimeCollector::new(rt.handle().clone()).unwrap();

        assert_eq!(collector.desc().len(), 3);

        let families = collector.collect();
        let names: Vec<&str> = families.iter().map(|mf| mf.get_name()).collect();
        assert_eq!(
            names,
            vec![
                "tokio_runtime_workers",
                "tokio_runtime_alive_tasks",
                "tokio_runtime_global_queue_depth",
            ]
        );
        assert_eq!(families[0].get_metric()[0].get_gauge().get_value(), 2.0);
    }
}
