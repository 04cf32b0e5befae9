/// Diskusage Exporter
///
/// 按抓取请求测量指定路径的磁盘用量，以 Prometheus 指标暴露

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use exporter::{api, config, probe::DuProbe, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    // 可以通过环境变量 RUST_LOG 设置日志级别，例如：
    // RUST_LOG=exporter=debug diskusage-exporter
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    info!("🚀 启动 Diskusage Exporter...");

    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let cfg = Config::load()?;
    info!("✅ 配置加载成功: du={}, 抓取超时上限={:?}", cfg.du_path, cfg.scrape_timeout);

    let probe = Arc::new(DuProbe::new(cfg.du_path.clone()));
    let app = api::router(AppState::new(cfg.clone(), probe));

    let listener = bind(&cfg.listen_address).await?;
    info!("🎯 Listening on {} (metrics at {})", listener.local_addr()?, cfg.telemetry_path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 已退出");
    Ok(())
}

async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(e) => match config::ipv4_fallback(addr) {
            Some(v4) => {
                warn!("无法监听 {} ({})，改用 {}", addr, e, v4);
                TcpListener::bind(&v4)
                    .await
                    .with_context(|| format!("failed to listen on {}", v4))
            }
            None => Err(e).with_context(|| format!("failed to listen on {}", addr)),
        },
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到退出信号，正在关闭...");
}
