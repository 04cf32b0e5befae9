/// 共享数据模型

/// 单次抓取请求中需要测量的路径
///
/// 原样保留调用方传入的字符串，不做规范化，也不做白名单校验。
pub type MeasurementTarget = String;

/// 一次成功测量的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub path: MeasurementTarget,
    pub size_bytes: f64,
}

impl Measurement {
    pub fn new(path: impl Into<MeasurementTarget>, size_bytes: f64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
        }
    }
}
