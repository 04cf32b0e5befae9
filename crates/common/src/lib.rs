/// Diskusage Exporter - 公共库
/// 
/// 提供采集器与 HTTP 服务共享的数据模型、错误类型和工具函数

pub mod errors;
pub mod models;
pub mod utils;

// 重新导出常用类型
pub use errors::{Error, Result};
pub use models::{Measurement, MeasurementTarget};
