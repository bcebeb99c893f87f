use super::CommandContext;
use crate::reminder::{local_now, run_ticker, NotificationCenter};
use anyhow::Result;
use log::{info, warn};
use std::time::Duration;

/// Prints each notification once as events come due, until Ctrl-C.
pub async fn watch(ctx: &CommandContext) -> Result<()> {
    let period = Duration::from_secs(ctx.config.notifications.tick_interval_secs.max(1));
    let mut center = NotificationCenter::new();
    println!("알림 대기 중... (Ctrl-C로 종료)");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    run_ticker(
        ctx.operations.store(),
        &mut center,
        period,
        local_now,
        |notification| println!("🔔 {}", notification.message),
        shutdown,
    )
    .await?;

    info!("{} notification(s) sent this session", center.notified_ids().len());
    Ok(())
}
