// service/background_jobs.rs
use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::AppState;

/// Run the maturation sweep on a fixed interval until `shutdown`
/// resolves. The first tick fires immediately so deposits that matured
/// while the process was down are settled right after startup.
pub async fn start_maturation_job(app_state: Arc<AppState>, shutdown: impl Future<Output = ()>) {
    let mut interval = interval(Duration::from_secs(app_state.env.worker_interval));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Utc::now();
                tracing::info!("Running maturation job at {}", now);
                match app_state.maturation_service.sweep(now).await {
                    Ok(settled) => tracing::info!(
                        "Maturation job completed: {} deposit(s) paid out",
                        settled.len()
                    ),
                    Err(e) => tracing::error!("Maturation job failed: {}", e),
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Maturation job shutting down");
                break;
            }
        }
    }
}
