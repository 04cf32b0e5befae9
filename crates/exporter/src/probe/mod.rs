/// 磁盘用量探测
///
/// `UsageProbe` 是采集器与外部测量工具之间的接缝，`ScrapeScope`
/// 负责把每次测量约束在单次抓取请求的截止时间与取消信号之内。

mod du;

pub use du::DuProbe;

use async_trait::async_trait;
use common::{Error, Result};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// 单路径磁盘用量探测器
#[async_trait]
pub trait UsageProbe: Send + Sync {
    /// 测量单个路径占用的大小
    async fn measure(&self, path: &str) -> Result<f64>;
}

/// 单次抓取请求的执行范围
///
/// 同步采集回调运行在阻塞线程上，通过 `Handle::block_on` 驱动异步探测。
/// 超过截止时间或请求被取消时，正在运行的探测 future 会被丢弃，
/// 由探测器自身负责终止外部进程。
#[derive(Clone)]
pub struct ScrapeScope {
    handle: Handle,
    budget: Duration,
    deadline: Instant,
    cancel: CancellationToken,
}

impl ScrapeScope {
    pub fn new(handle: Handle, budget: Duration, cancel: CancellationToken) -> Self {
        Self {
            handle,
            budget,
            deadline: Instant::now() + budget,
            cancel,
        }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// 在剩余时间内测量一个路径
    ///
    /// 不能在异步上下文中调用。
    pub fn measure(&self, probe: &dyn UsageProbe, path: &str) -> Result<f64> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let remaining = self.deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(Error::Timeout(self.budget));
        }

        self.handle.block_on(async {
            tokio::select! {
                _ = self.cancel.cancelled() => Err(Error::Cancelled),
                res = tokio::time::timeout(remaining, probe.measure(path)) => match res {
                    Ok(res) => res,
                    Err(_) => Err(Error::Timeout(self.budget)),
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::runtime::Runtime;

    struct SleepyProbe(Duration);

    #[async_trait]
    impl UsageProbe for SleepyProbe {
        async fn measure(&self, _path: &str) -> Result<f64> {
            tokio::time::sleep(self.0).await;
            Ok(42.0)
        }
    }

    #[test]
    fn test_measure_within_budget() {
        let rt = Runtime::new().unwrap();
        let scope = ScrapeScope::new(rt.handle().clone(), Duration::from_secs(5), CancellationToken::new());

        let size = scope.measure(&SleepyProbe(Duration::from_millis(1)), "/data").unwrap();
        assert_eq!(size, 42.0);
    }

    #[test]
    fn test_measure_times_out() {
        let rt = Runtime::new().unwrap();
        let scope = ScrapeScope::new(rt.handle().clone(), Duration::from_millis(50), CancellationToken::new());

        let err = scope.measure(&SleepyProbe(Duration::from_secs(30)), "/data").unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));

        // 截止时间已过，后续测量直接失败
        let err = scope.measure(&SleepyProbe(Duration::ZERO), "/data").unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
    }

    #[test]
    fn test_measure_cancelled() {
        let rt = Runtime::new().unwrap();
        let cancel = CancellationToken::new();
        let scope = ScrapeScope::new(rt.handle().clone(), Duration::from_secs(30), cancel.clone());

        let trigger = cancel.clone();
        rt.spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = scope.measure(&SleepyProbe(Duration::from_secs(30)), "/data").unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(matches!(
            scope.measure(&SleepyProbe(Duration::ZERO), "/data"),
            Err(Error::Cancelled)
        ));
    }
}
