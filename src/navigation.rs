//! 页面跳转
//!
//! 登录页和 dashboard 都是外部页面，这里只负责"去哪里"

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// 跳转目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// 跳转能力
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// 延迟跳转，返回后台任务句柄
pub fn navigate_after(
    navigator: Arc<dyn Navigator>,
    route: Route,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        navigator.navigate(route);
    })
}

/// 命令行下的跳转：只记录日志并打印目标路由
#[derive(Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        info!("➡️ 跳转到 {}", route);
        println!("-> {}", route);
    }
}

/// 记录所有跳转，便于检查
#[derive(Default, Clone)]
pub struct RecordingNavigator {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
    }
}
