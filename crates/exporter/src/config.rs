/// 配置管理
///
/// 命令行参数优先，其次是环境变量（可来自 `.env`），最后是默认值。

use clap::Parser;
use common::{Error, Result};
use std::ffi::OsString;
use std::time::Duration;

/// 单次抓取的时间预算上限（一天）
const MAX_SCRAPE_TIMEOUT_SECS: f64 = 86_400.0;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "diskusage-exporter",
    version,
    about = "Prometheus exporter reporting disk usage of the paths given in each scrape"
)]
pub struct Cli {
    /// Address to listen on
    #[arg(long = "web.listen-address", env = "DISKUSAGE_LISTEN_ADDRESS", default_value = ":9550")]
    pub listen_address: String,

    /// Path under which to expose metrics
    #[arg(long = "web.telemetry-path", env = "DISKUSAGE_TELEMETRY_PATH", default_value = "/metrics")]
    pub telemetry_path: String,

    /// Upper bound in seconds for measuring all paths of one scrape
    #[arg(long = "scrape.timeout", env = "DISKUSAGE_SCRAPE_TIMEOUT", default_value_t = 30.0)]
    pub scrape_timeout: f64,

    /// du executable used to measure paths
    #[arg(long = "du.path", env = "DISKUSAGE_DU_PATH", default_value = "du")]
    pub du_path: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_address: String,
    pub telemetry_path: String,
    pub scrape_timeout: Duration,
    pub du_path: String,
}

impl Config {
    /// 从进程参数和环境变量加载配置
    ///
    /// 参数不合法时 clap 会打印用法并退出进程。
    pub fn load() -> Result<Self> {
        let cli = Cli::parse_from(normalize_args(std::env::args_os()));
        Self::from_cli(cli)
    }

    /// 从给定参数加载配置
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let cli = Cli::try_parse_from(normalize_args(args))
            .map_err(|e| Error::Config(e.to_string()))?;
        Self::from_cli(cli)
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        if !cli.telemetry_path.starts_with('/') {
            return Err(Error::Config(format!(
                "web.telemetry-path must start with '/': {}",
                cli.telemetry_path
            )));
        }
        if cli.telemetry_path == "/health" {
            return Err(Error::Config("web.telemetry-path must not be /health".to_string()));
        }
        if !(cli.scrape_timeout > 0.0 && cli.scrape_timeout <= MAX_SCRAPE_TIMEOUT_SECS) {
            return Err(Error::Config(format!(
                "scrape.timeout must be within (0, {}] seconds: {}",
                MAX_SCRAPE_TIMEOUT_SECS, cli.scrape_timeout
            )));
        }
        if cli.du_path.is_empty() {
            return Err(Error::Config("du.path must not be empty".to_string()));
        }

        Ok(Self {
            listen_address: normalize_listen_address(&cli.listen_address),
            telemetry_path: cli.telemetry_path,
            scrape_timeout: Duration::from_secs_f64(cli.scrape_timeout),
            du_path: cli.du_path,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: normalize_listen_address(":9550"),
            telemetry_path: "/metrics".to_string(),
            scrape_timeout: Duration::from_secs(30),
            du_path: "du".to_string(),
        }
    }
}

/// 兼容单横线长参数，例如 `-web.listen-address` 转为 `--web.listen-address`
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some(s) if s.len() > 2 && s.starts_with('-') && !s.starts_with("--") => {
                OsString::from(format!("-{}", s))
            }
            _ => arg,
        })
        .collect()
}

/// `:9550` 这种只有端口的地址监听所有接口（IPv6 双栈）
pub fn normalize_listen_address(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("[::]{}", addr)
    } else {
        addr.to_string()
    }
}

/// 双栈地址不可用时（例如内核禁用了 IPv6）退回的 IPv4 通配地址
pub fn ipv4_fallback(addr: &str) -> Option<String> {
    addr.strip_prefix("[::]:").map(|port| format!("0.0.0.0:{}", port))
}
