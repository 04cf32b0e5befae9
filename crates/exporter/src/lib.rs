/// Diskusage Exporter
///
/// 每次抓取请求测量调用方指定路径的磁盘用量，并以 Prometheus 文本格式返回。

pub mod api;
pub mod app_state;
pub mod config;
pub mod metrics;
pub mod probe;

pub use app_state::AppState;
pub use config::Config;
