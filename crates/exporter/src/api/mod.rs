pub mod metrics;

use axum::{
    extract::State,
    response::Html,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// 所有路由（统一入口）
pub fn router(state: AppState) -> Router {
    let telemetry_path = state.config.telemetry_path.clone();

    let mut router = Router::new()
        .route(&telemetry_path, get(metrics::scrape))
        .route("/health", get(health_handler));

    // 指标路径占用根路径时不再提供首页
    if telemetry_path != "/" {
        router = router.route("/", get(root_handler));
    }

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler(State(state): State<AppState>) -> Html<String> {
    let path = &state.config.telemetry_path;
    Html(format!(
        "<html>\n\
         <head><title>Disk Usage Exporter</title></head>\n\
         <body>\n\
         <h1>Disk Usage Exporter</h1>\n\
         <p><a href=\"{path}\">Metrics</a></p>\n\
         <p>Usage: <code>{path}?paths[]=/var/log&amp;paths[]=/srv</code></p>\n\
         </body>\n\
         </html>\n"
    ))
}

async fn health_handler() -> &'static str {
    "OK"
}
