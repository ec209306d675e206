mod favorites;
mod inbox;
mod reminders;
mod session;

pub use favorites::{FavoritesError, FavoritesStore, ToggleOutcome};
pub use inbox::NotificationInbox;
pub use reminders::{
    start_reminder_job, ReminderScheduler, SkipReason, TickError, TickOutcome, LEAD_WINDOW_MILLIS,
    POLL_INTERVAL,
};
pub use session::SessionResolver;

use colorfest_infra::Context;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// Wires the shared service instances. Each consumer gets the one instance
/// built here by reference; nothing is looked up ambiently.
pub struct Application {
    pub ctx: Arc<Context>,
    pub session: Arc<SessionResolver>,
    pub favorites: Arc<FavoritesStore>,
    pub inbox: Arc<NotificationInbox>,
}

impl Application {
    pub fn new(context: Context) -> Self {
        let ctx = Arc::new(context);
        let session = Arc::new(SessionResolver::new(ctx.clone()));
        let favorites = Arc::new(FavoritesStore::new(ctx.clone(), session.clone()));
        let inbox = Arc::new(NotificationInbox::new(ctx.sys.clone()));

        Self {
            ctx,
            session,
            favorites,
            inbox,
        }
    }

    pub fn reminder_scheduler(&self) -> ReminderScheduler {
        ReminderScheduler::new(
            self.ctx.clone(),
            self.session.clone(),
            self.favorites.clone(),
            self.inbox.clone(),
        )
    }

    /// Restores the stored session, loads favorites and runs the reminder
    /// job until the process receives Ctrl-C.
    pub async fn start(self) -> anyhow::Result<()> {
        self.session
            .restore(self.ctx.config.stored_session.clone())
            .await;
        if let Err(e) = self.favorites.load().await {
            warn!("Could not load favorites at startup: {}", e);
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let job = start_reminder_job(self.reminder_scheduler(), shutdown_rx);
        info!("ColorFest guide core running");

        tokio::signal::ctrl_c().await?;
        info!("Shutting down");
        let _ = shutdown_tx.send(true);
        job.await?;
        Ok(())
    }
}
