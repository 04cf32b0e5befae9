/// 指标抓取接口

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::app_state::AppState;
use crate::metrics;
use crate::probe::ScrapeScope;

/// Prometheus 抓取时携带的超时时间头
pub const SCRAPE_TIMEOUT_HEADER: &str = "x-prometheus-scrape-timeout-seconds";

/// 可重复的路径查询参数
pub const PATHS_PARAM: &str = "paths[]";

/// 处理一次抓取请求
///
/// 单个路径的失败只会让对应序列缺失，响应始终为 200，
/// 只有注册表或编码本身出错时才返回 500。
pub async fn scrape(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let targets = parse_targets(query.as_deref());
    let budget = scrape_budget(&headers, state.config.scrape_timeout);
    debug!("Scrape of {} path(s), budget {:?}", targets.len(), budget);

    // 客户端断开时 handler future 被丢弃，drop guard 随之取消正在进行的测量
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let scope = ScrapeScope::new(Handle::current(), budget, cancel);
    let probe = state.probe();

    match tokio::task::spawn_blocking(move || metrics::render(targets, probe, scope)).await {
        Ok(Ok(body)) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Ok(Err(e)) => {
            error!("Failed to render metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            error!("Scrape task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// 从原始查询串中按顺序取出所有 `paths[]`
///
/// 不是合法 UTF-8 的路径无法原样作为标签输出，记录日志后丢弃。
pub fn parse_targets(query: Option<&str>) -> Vec<String> {
    let Some(query) = query else {
        return Vec::new();
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if form_decode(key) != PATHS_PARAM.as_bytes() {
                return None;
            }
            match String::from_utf8(form_decode(value)) {
                Ok(path) => Some(path),
                Err(_) => {
                    warn!("Skipping target {:?}: path is not valid UTF-8", value);
                    None
                }
            }
        })
        .collect()
}

/// application/x-www-form-urlencoded 解码，保留原始字节
fn form_decode(s: &str) -> Vec<u8> {
    let bytes: Vec<u8> = s
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&bytes).collect()
}

/// 计算本次抓取的时间预算
///
/// 取请求头中的超时与配置上限中较小的一个，请求头无效时忽略。
pub fn scrape_budget(headers: &HeaderMap, limit: Duration) -> Duration {
    headers
        .get(SCRAPE_TIMEOUT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|secs| *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .map_or(limit, |requested| requested.min(limit))
}
