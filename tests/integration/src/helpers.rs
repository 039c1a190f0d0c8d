//! Test helpers for integration tests
//!
//! Provides a recording fake of the chat platform, a bot harness wired to in-memory
//! or PostgreSQL storage, and a liveness server on an ephemeral port.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use guard_bot::server::create_router;
use guard_bot::telegram::PlatformResult;
use guard_bot::{ChatPlatform, EventHandler, InboundEvent, MessageId};
use guard_common::ModerationConfig;
use guard_core::value_objects::{ChatId, UserId};
use guard_db::{create_pool, ensure_schema, DatabaseConfig, InMemoryStore};
use guard_service::{EscalationEngine, ServiceContext};
use reqwest::{Client, Response};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A platform call observed by [`RecordingPlatform`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    DeleteMessage { chat_id: i64, message_id: MessageId },
    Send { chat_id: i64, reply_to: Option<MessageId>, text: String },
    RemoveMember { chat_id: i64, user_id: i64 },
}

/// Chat platform fake that records every call
#[derive(Default)]
pub struct RecordingPlatform {
    admins: Mutex<HashSet<i64>>,
    calls: Mutex<Vec<PlatformCall>>,
}

impl RecordingPlatform {
    pub fn with_admins(admins: &[i64]) -> Self {
        Self {
            admins: Mutex::new(admins.iter().copied().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls recorded so far
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Drain the recorded calls
    pub fn take_calls(&self) -> Vec<PlatformCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    /// Texts sent so far
    pub fn sent_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                PlatformCall::Send { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: PlatformCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatPlatform for RecordingPlatform {
    async fn administrators(&self, _chat_id: ChatId) -> PlatformResult<Vec<UserId>> {
        Ok(self.admins.lock().unwrap().iter().map(|id| UserId::new(*id)).collect())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> PlatformResult<()> {
        self.record(PlatformCall::DeleteMessage {
            chat_id: chat_id.into_inner(),
            message_id,
        });
        Ok(())
    }

    async fn send_reply(
        &self,
        chat_id: ChatId,
        reply_to: Option<MessageId>,
        text: &str,
    ) -> PlatformResult<()> {
        self.record(PlatformCall::Send {
            chat_id: chat_id.into_inner(),
            reply_to,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn remove_member(&self, chat_id: ChatId, user_id: UserId) -> PlatformResult<()> {
        self.record(PlatformCall::RemoveMember {
            chat_id: chat_id.into_inner(),
            user_id: user_id.into_inner(),
        });
        Ok(())
    }
}

/// Event handler wired to a recording platform
pub struct TestBot {
    pub handler: EventHandler,
    pub platform: Arc<RecordingPlatform>,
    pub context: ServiceContext,
}

impl TestBot {
    /// Bot over a fresh in-memory store
    pub fn in_memory(admins: &[i64]) -> Self {
        Self::with_context(ServiceContext::in_memory(&InMemoryStore::new()), admins)
    }

    /// Bot over PostgreSQL, or `None` when no database is configured
    pub async fn postgres(admins: &[i64]) -> Option<Self> {
        if !check_test_env() {
            return None;
        }
        let pool = create_pool(&DatabaseConfig::from_env()).await.ok()?;
        ensure_schema(&pool).await.ok()?;
        Some(Self::with_context(ServiceContext::postgres(pool), admins))
    }

    fn with_context(context: ServiceContext, admins: &[i64]) -> Self {
        let platform = Arc::new(RecordingPlatform::with_admins(admins));
        let handler = EventHandler::new(
            EscalationEngine::new(context.clone()),
            Arc::clone(&platform) as Arc<dyn ChatPlatform>,
            &ModerationConfig {
                unban_admin_only: true,
            },
        );
        Self {
            handler,
            platform,
            context,
        }
    }

    /// Handle one event, failing the test on error
    pub async fn send(&self, event: InboundEvent) {
        self.handler
            .handle(event)
            .await
            .expect("event should be handled");
    }
}

/// Liveness server bound to an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, create_router()).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }
}

/// Helper to check if a test database is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}
