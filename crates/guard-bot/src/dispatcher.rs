//! Long-poll dispatcher
//!
//! Polls for updates, translates them and spawns one task per event. A failed or
//! panicking event is logged and never stops the loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::events::{translate, InboundEvent};
use crate::handler::EventHandler;
use crate::platform::UpdateSource;
use crate::telegram::User;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Time allowed for in-flight events after shutdown is requested
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives the poll → translate → handle loop
pub struct Dispatcher {
    source: Arc<dyn UpdateSource>,
    handler: EventHandler,
    bot: Option<User>,
}

impl Dispatcher {
    pub fn new(source: Arc<dyn UpdateSource>, handler: EventHandler, bot: Option<User>) -> Self {
        Self {
            source,
            handler,
            bot,
        }
    }

    /// Run until `shutdown` flips to `true`
    ///
    /// Returns the offset after the last dispatched update.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> Option<i64> {
        let mut offset: Option<i64> = None;
        let mut backoff = INITIAL_BACKOFF;
        let mut tasks = JoinSet::new();

        info!("Dispatcher started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            let polled = tokio::select! {
                _ = shutdown.changed() => break,
                polled = self.source.poll(offset) => polled,
            };

            match polled {
                Ok(updates) => {
                    backoff = INITIAL_BACKOFF;
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        for event in translate(&update, self.bot.as_ref()) {
                            self.spawn(&mut tasks, event);
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, backoff_secs = backoff.as_secs(), "Polling failed, backing off");
                    tokio::select! {
                        _ = shutdown.changed() => break,
                        () = tokio::time::sleep(backoff) => {}
                    }
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
            }

            while let Some(joined) = tasks.try_join_next() {
                log_join(joined);
            }
        }

        info!(in_flight = tasks.len(), "Dispatcher stopping");
        let drained = tokio::time::timeout(DRAIN_TIMEOUT, async {
            while let Some(joined) = tasks.join_next().await {
                log_join(joined);
            }
        })
        .await;
        if drained.is_err() {
            warn!("In-flight events did not finish before shutdown");
        }

        offset
    }

    fn spawn(&self, tasks: &mut JoinSet<()>, event: InboundEvent) {
        let handler = self.handler.clone();
        tasks.spawn(async move {
            let kind = event.kind();
            if let Err(e) = handler.handle(event).await {
                error!(error = %e, code = e.error_code(), kind, "Event dropped");
            }
        });
    }
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            error!(error = %e, "Event task panicked");
        }
    }
}
