#[cfg(test)]
use axum::Router;

#[cfg(test)]
use sqlx::MySqlPool;

/// Serve a stand-in upstream on an ephemeral port and return its base URL.
#[cfg(test)]
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve upstream");
    });
    format!("http://{}", addr)
}

/// Lazy pool pointed at a port nothing listens on, for exercising the
/// best-effort persistence paths.
#[cfg(test)]
pub fn unreachable_pool() -> MySqlPool {
    sqlx::mysql::MySqlPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_millis(250))
        .connect_lazy("mysql://root:@127.0.0.1:9/moodreel_test")
        .expect("lazy test pool")
}
