use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use users_proxy::infrastructure::logger::Logger;
use users_proxy::{build_app, AppConfig, AppState, BackendSettingsSource, EnvSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    Logger::init(&config.logging.level);

    info!("启动用户代理服务...");

    // 后端配置在请求时读取，这里只提示
    if let Err(e) = EnvSettings.settings() {
        warn!("{}，用户接口将返回 500 直到配置完成", e);
    }

    let app = build_app(AppState::new(Arc::new(EnvSettings)));

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;

    info!("🚀 用户代理服务运行在 http://{}", listener.local_addr()?);
    info!("📖 API 端点:");
    info!("   GET    /              - API 信息");
    info!("   GET    /env           - 后端配置状态");
    info!("   POST   /users         - 创建用户");
    info!("   GET    /users         - 获取所有用户");
    info!("   GET    /users/:id     - 获取特定用户");
    info!("   PUT    /users/:id     - 更新用户");
    info!("   DELETE /users/:id     - 删除用户");
    info!("   GET    /openapi.yaml  - OpenAPI 文档");
    info!("   GET    /docs          - 文档页面");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听 Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到停止信号，正在关闭...");
}
