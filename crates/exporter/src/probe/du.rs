/// 基于 `du -s` 的探测器

use async_trait::async_trait;
use common::utils::parse_du_output;
use common::{Error, Result};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::UsageProbe;

/// 调用外部 `du` 命令测量路径
pub struct DuProbe {
    /// du 可执行文件（名称或绝对路径）
    program: String,
}

impl DuProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DuProbe {
    fn default() -> Self {
        Self::new("du")
    }
}

#[async_trait]
impl UsageProbe for DuProbe {
    async fn measure(&self, path: &str) -> Result<f64> {
        debug!("Running {} -s {}", self.program, path);

        // `--` 防止以 `-` 开头的路径被当作选项
        let output = Command::new(&self.program)
            .arg("-s")
            .arg("--")
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::Measure(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Measure(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        parse_du_output(&String::from_utf8_lossy(&output.stdout))
    }
}
