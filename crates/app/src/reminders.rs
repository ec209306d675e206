use crate::favorites::FavoritesStore;
use crate::inbox::NotificationInbox;
use crate::session::SessionResolver;
use colorfest_domain::{FestivalEvent, ID};
use colorfest_infra::Context;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info};

/// How often favorited events are checked against the clock.
pub const POLL_INTERVAL: Duration = Duration::from_secs(60);
/// How close an event's start must be for its reminder to fire.
pub const LEAD_WINDOW_MILLIS: i64 = 1000 * 60 * 15;

/// Why a poll tick did not evaluate any events. Any of these deactivates
/// the scheduler until conditions hold again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    NotSignedIn,
    NoFavorites,
    RemindersDisabled,
}

#[derive(Debug, PartialEq)]
pub enum TickOutcome {
    Skipped(SkipReason),
    /// The tick ran; the payload is the number of reminders raised.
    Raised(usize),
}

/// Reminders are best effort. The poll loop logs these and carries on.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("Could not fetch favorited events")]
    EventFetch(#[source] anyhow::Error),
}

/// Periodically cross-references the favorites list against the programme
/// and raises one inbox notification per event about to start.
pub struct ReminderScheduler {
    ctx: Arc<Context>,
    session: Arc<SessionResolver>,
    favorites: Arc<FavoritesStore>,
    inbox: Arc<NotificationInbox>,
    /// Events already reminded about during the current activation.
    notified: HashSet<ID>,
    active: bool,
}

impl ReminderScheduler {
    pub fn new(
        ctx: Arc<Context>,
        session: Arc<SessionResolver>,
        favorites: Arc<FavoritesStore>,
        inbox: Arc<NotificationInbox>,
    ) -> Self {
        Self {
            ctx,
            session,
            favorites,
            inbox,
            notified: HashSet::new(),
            active: false,
        }
    }

    /// One poll step. Skips (and deactivates) unless a signed in user with
    /// favorites and the reminders preference enabled is present. A fresh
    /// activation starts with a clean dedupe set, so an event still inside
    /// its window after reminders were toggled off and on notifies again.
    pub async fn tick(&mut self) -> Result<TickOutcome, TickError> {
        let event_ids = match self.gate() {
            Err(reason) => {
                self.active = false;
                return Ok(TickOutcome::Skipped(reason));
            }
            Ok(event_ids) => event_ids,
        };
        if !self.active {
            self.active = true;
            self.notified.clear();
        }

        let events = self
            .ctx
            .repos
            .events
            .find_active_by_ids(&event_ids)
            .await
            .map_err(TickError::EventFetch)?;

        let now = self.ctx.sys.get_timestamp_millis();
        let mut raised = 0;
        for event in events {
            if self.notified.contains(&event.id) {
                continue;
            }
            if let Some(minutes) = event.starts_within(now, LEAD_WINDOW_MILLIS) {
                self.notified.insert(event.id.clone());
                let (title, description) = reminder_message(&event, minutes);
                self.inbox.add(title, Some(description));
                raised += 1;
            }
        }
        Ok(TickOutcome::Raised(raised))
    }

    fn gate(&self) -> Result<Vec<ID>, SkipReason> {
        if self.session.session().is_none() {
            return Err(SkipReason::NotSignedIn);
        }
        let event_ids = self.favorites.event_ids();
        if event_ids.is_empty() {
            return Err(SkipReason::NoFavorites);
        }
        if !self.ctx.prefs.reminders_enabled() {
            return Err(SkipReason::RemindersDisabled);
        }
        Ok(event_ids)
    }
}

fn reminder_message(event: &FestivalEvent, minutes: i64) -> (String, String) {
    let title = format!("⏰ {} in {} min!", event.display_name(), minutes);
    let description = match &event.stage {
        Some(stage) => format!("On stage: {}", stage),
        None => "About to start, don't miss it!".to_string(),
    };
    (title, description)
}

/// Spawns the poll loop: an immediate first tick, then one every
/// `POLL_INTERVAL`, until `shutdown` flips.
pub fn start_reminder_job(
    mut scheduler: ReminderScheduler,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut poll = interval(POLL_INTERVAL);
        loop {
            tokio::select! {
                _ = poll.tick() => match scheduler.tick().await {
                    Ok(TickOutcome::Raised(raised)) if raised > 0 => {
                        info!("Raised {} event reminder(s)", raised);
                    }
                    Ok(outcome) => debug!("Reminder tick: {:?}", outcome),
                    Err(e) => debug!("Reminder tick failed: {:?}", e),
                },
                _ = shutdown.changed() => break,
            }
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use colorfest_domain::{Identity, Session};
    use colorfest_infra::{IEventRepo, ISys, InMemoryEventRepo};

    const NOW: i64 = 1754745600000;

    struct StaticTimeSys;
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            NOW
        }
    }

    struct FailingEventRepo;

    #[async_trait::async_trait]
    impl IEventRepo for FailingEventRepo {
        async fn find_active_by_ids(&self, _event_ids: &[ID]) -> anyhow::Result<Vec<FestivalEvent>> {
            Err(anyhow::anyhow!("Connection refused"))
        }
    }

    fn event(title: &str, artist: Option<&str>, start_offset_millis: Option<i64>) -> FestivalEvent {
        FestivalEvent {
            id: Default::default(),
            title: title.into(),
            artist: artist.map(|a| a.into()),
            start_time: start_offset_millis.map(|offset| NOW + offset),
            stage: Some("Main Stage".into()),
            is_active: true,
        }
    }

    struct TestHarness {
        ctx: Arc<Context>,
        session: Arc<SessionResolver>,
        favorites: Arc<FavoritesStore>,
        inbox: Arc<NotificationInbox>,
    }

    impl TestHarness {
        fn scheduler(&self) -> ReminderScheduler {
            ReminderScheduler::new(
                self.ctx.clone(),
                self.session.clone(),
                self.favorites.clone(),
                self.inbox.clone(),
            )
        }

        async fn favorite(&self, event: &FestivalEvent) {
            self.favorites.toggle(&event.id).await.unwrap();
        }
    }

    async fn setup_with_events(events: Vec<FestivalEvent>) -> TestHarness {
        let event_repo = Arc::new(InMemoryEventRepo::new());
        for event in events {
            event_repo.insert(event);
        }
        let mut ctx = Context::create_inmemory();
        ctx.repos.events = event_repo;
        ctx.sys = Arc::new(StaticTimeSys);
        let ctx = Arc::new(ctx);

        let session = Arc::new(SessionResolver::new(ctx.clone()));
        session
            .handle_change(Some(Session::new(
                Identity {
                    id: Default::default(),
                    email: "ada@example.com".into(),
                },
                None,
            )))
            .await;
        let favorites = Arc::new(FavoritesStore::new(ctx.clone(), session.clone()));
        let inbox = Arc::new(NotificationInbox::new(ctx.sys.clone()));

        TestHarness {
            ctx,
            session,
            favorites,
            inbox,
        }
    }

    #[tokio::test]
    async fn raises_one_reminder_inside_the_window() {
        let imminent = event("Secret set", Some("Nina Kraviz"), Some(1000 * 60 * 12));
        let later = event("Closing", Some("Peggy Gou"), Some(1000 * 60 * 30));
        let harness = setup_with_events(vec![imminent.clone(), later.clone()]).await;
        harness.favorite(&imminent).await;
        harness.favorite(&later).await;

        let mut scheduler = harness.scheduler();
        assert_eq!(scheduler.tick().await.unwrap(), TickOutcome::Raised(1));

        let notifications = harness.inbox.all();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "⏰ Nina Kraviz in 12 min!");
        assert_eq!(
            notifications[0].description.as_deref(),
            Some("On stage: Main Stage")
        );
    }

    #[tokio::test]
    async fn ignores_past_and_far_future_events() {
        let started = event("Opening", None, Some(-1000 * 60));
        let far = event("Closing", None, Some(1000 * 60 * 20));
        let unscheduled = event("Secret", None, None);
        let harness = setup_with_events(vec![started.clone(), far.clone(), unscheduled.clone()])
            .await;
        harness.favorite(&started).await;
        harness.favorite(&far).await;
        harness.favorite(&unscheduled).await;

        let mut scheduler = harness.scheduler();
        assert_eq!(scheduler.tick().await.unwrap(), TickOutcome::Raised(0));
        assert!(harness.inbox.all().is_empty());
    }

    #[tokio::test]
    async fn consecutive_ticks_do_not_repeat_a_reminder() {
        let imminent = event("Secret set", Some("Nina Kraviz"), Some(1000 * 60 * 10));
        let harness = setup_with_events(vec![imminent.clone()]).await;
        harness.favorite(&imminent).await;

        let mut scheduler = harness.scheduler();
        assert_eq!(scheduler.tick().await.unwrap(), TickOutcome::Raised(1));
        assert_eq!(scheduler.tick().await.unwrap(), TickOutcome::Raised(0));
        assert_eq!(harness.inbox.all().len(), 1);
    }

    #[tokio::test]
    async fn skips_without_identity() {
        let harness = setup_with_events(vec![]).await;
        harness.session.sign_out().await;

        let mut scheduler = harness.scheduler();
        assert_eq!(
            scheduler.tick().await.unwrap(),
            TickOutcome::Skipped(SkipReason::NotSignedIn)
        );
    }

    #[tokio::test]
    async fn skips_without_favorites() {
        let harness = setup_with_events(vec![]).await;
        let mut scheduler = harness.scheduler();
        assert_eq!(
            scheduler.tick().await.unwrap(),
            TickOutcome::Skipped(SkipReason::NoFavorites)
        );
    }

    #[tokio::test]
    async fn skips_when_reminders_are_disabled() {
        let imminent = event("Secret set", None, Some(1000 * 60 * 10));
        let harness = setup_with_events(vec![imminent.clone()]).await;
        harness.favorite(&imminent).await;
        harness.ctx.prefs.set_reminders_enabled(false);

        let mut scheduler = harness.scheduler();
        assert_eq!(
            scheduler.tick().await.unwrap(),
            TickOutcome::Skipped(SkipReason::RemindersDisabled)
        );
        assert!(harness.inbox.all().is_empty());
    }

    #[tokio::test]
    async fn reactivation_starts_a_fresh_dedupe_set() {
        let imminent = event("Secret set", Some("Nina Kraviz"), Some(1000 * 60 * 10));
        let harness = setup_with_events(vec![imminent.clone()]).await;
        harness.favorite(&imminent).await;

        let mut scheduler = harness.scheduler();
        assert_eq!(scheduler.tick().await.unwrap(), TickOutcome::Raised(1));

        harness.ctx.prefs.set_reminders_enabled(false);
        assert_eq!(
            scheduler.tick().await.unwrap(),
            TickOutcome::Skipped(SkipReason::RemindersDisabled)
        );

        harness.ctx.prefs.set_reminders_enabled(true);
        assert_eq!(scheduler.tick().await.unwrap(), TickOutcome::Raised(1));
        assert_eq!(harness.inbox.all().len(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_is_a_typed_ignorable_error() {
        let imminent = event("Secret set", None, Some(1000 * 60 * 10));
        let harness = setup_with_events(vec![imminent.clone()]).await;
        harness.favorite(&imminent).await;

        let mut scheduler = harness.scheduler();
        // First tick activates and raises; then the backend goes away.
        assert_eq!(scheduler.tick().await.unwrap(), TickOutcome::Raised(1));
        scheduler.ctx = Arc::new({
            let mut ctx = (*harness.ctx).clone();
            ctx.repos.events = Arc::new(FailingEventRepo);
            ctx
        });

        assert!(matches!(
            scheduler.tick().await,
            Err(TickError::EventFetch(_))
        ));
        // The failure did not deactivate the scheduler or reset dedupe.
        scheduler.ctx = harness.ctx.clone();
        assert_eq!(scheduler.tick().await.unwrap(), TickOutcome::Raised(0));
    }

    #[tokio::test]
    async fn fires_for_event_fetched_from_the_programme() {
        // Favorite two events, only the imminent one produces a reminder
        // naming its artist.
        let imminent = event("Surprise set", Some("Artist A"), Some(1000 * 60 * 12));
        let later = event("Main show", Some("Artist B"), Some(1000 * 60 * 30));
        let harness = setup_with_events(vec![imminent.clone(), later.clone()]).await;
        harness.favorite(&imminent).await;
        harness.favorite(&later).await;

        let mut scheduler = harness.scheduler();
        scheduler.tick().await.unwrap();

        let notifications = harness.inbox.all();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].title.contains("Artist A"));
        assert!(notifications[0].title.contains("12 min"));
        assert!(!notifications
            .iter()
            .any(|n| n.title.contains("Artist B")));
    }
}
