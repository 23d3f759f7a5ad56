use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;

use crate::application::services::LoginFlow;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub login_flow: Arc<LoginFlow>,
    pub pool: PgPool,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(login_flow: LoginFlow, pool: PgPool, metrics: PrometheusHandle) -> Self {
        Self {
            login_flow: Arc::new(login_flow),
            pool,
            metrics,
        }
    }
}
