//! Mirrors log records into a Discord channel.
//!
//! [`DiscordLogLayer`] formats every event at INFO or above that this crate emits and
//! hands it to a bounded channel with `try_send`, so logging never waits on Discord.
//! Nothing is queued until [`LogRelay::bind`] attaches a sink; from then on a background
//! task drains the channel and posts each record, split to fit Discord's message limit.
//! Records are dropped when the channel is full, and delivery failures are swallowed.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serenity::all::ChannelId;
use serenity::async_trait;
use serenity::http::Http;
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::error::AppError;

const RELAY_CAPACITY: usize = 1000;
const MAX_CHUNK_CHARS: usize = 1900;

/// Destination of relayed log lines.
#[async_trait]
pub trait LogSink: Send + Sync + 'static {
    async fn post(&self, content: &str) -> Result<(), AppError>;
}

/// Posts log lines as messages in a guild text channel.
pub struct ChannelSink {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl ChannelSink {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl LogSink for ChannelSink {
    async fn post(&self, content: &str) -> Result<(), AppError> {
        self.channel_id.say(&self.http, content).await?;
        Ok(())
    }
}

struct RelayInner {
    bound: AtomicBool,
    tx: mpsc::Sender<String>,
    rx: Mutex<Option<mpsc::Receiver<String>>>,
}

/// Process-wide handle to the log relay.
///
/// Cloning is cheap; all clones share the same channel and binding.
#[derive(Clone)]
pub struct LogRelay {
    inner: Arc<RelayInner>,
}

impl LogRelay {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(RELAY_CAPACITY);

        Self {
            inner: Arc::new(RelayInner {
                bound: AtomicBool::new(false),
                tx,
                rx: Mutex::new(Some(rx)),
            }),
        }
    }

    /// Tracing layer feeding this relay.
    pub fn layer(&self) -> DiscordLogLayer {
        DiscordLogLayer {
            relay: self.clone(),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.inner.bound.load(Ordering::Acquire)
    }

    /// Attaches the sink and starts the delivery task.
    ///
    /// Must be called from within a Tokio runtime. Only the first call binds.
    ///
    /// # Returns
    /// - `true` - The relay is now forwarding to `sink`
    /// - `false` - The relay was already bound; `sink` is dropped
    pub fn bind<S: LogSink>(&self, sink: S) -> bool {
        let receiver = match self.inner.rx.lock() {
            Ok(mut rx) => rx.take(),
            Err(_) => None,
        };
        let Some(receiver) = receiver else {
            return false;
        };

        tokio::spawn(deliver(receiver, sink));
        self.inner.bound.store(true, Ordering::Release);

        true
    }

    fn forward(&self, line: String) {
        if self.is_bound() {
            // Full channel: drop the record rather than block the caller.
            let _ = self.inner.tx.try_send(line);
        }
    }
}

impl Default for LogRelay {
    fn default() -> Self {
        Self::new()
    }
}

async fn deliver<S: LogSink>(mut receiver: mpsc::Receiver<String>, sink: S) {
    while let Some(line) = receiver.recv().await {
        for chunk in chunk_for_discord(&line, MAX_CHUNK_CHARS) {
            if let Err(e) = sink.post(&chunk).await {
                tracing::debug!("Failed to relay log line to Discord: {}", e);
            }
        }
    }
}

/// Splits a log line into pieces of at most `max_chars` characters.
pub fn chunk_for_discord(line: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= max_chars {
        return vec![line.to_string()];
    }

    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// `tracing_subscriber::Layer` that forwards this crate's INFO+ events to a [`LogRelay`].
pub struct DiscordLogLayer {
    relay: LogRelay,
}

impl<S: Subscriber> Layer<S> for DiscordLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > Level::INFO
            || !metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
            || !self.relay.is_bound()
        {
            return;
        }

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let line = format!(
            "{} {} {} - {}{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            metadata.level(),
            metadata.target(),
            visitor.message,
            visitor.fields
        );

        self.relay.forward(line);
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tracing_subscriber::layer::SubscriberExt;

    use super::*;

    #[derive(Clone, Default)]
    struct MemorySink {
        posts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl LogSink for MemorySink {
        async fn post(&self, content: &str) -> Result<(), AppError> {
            self.posts.lock().unwrap().push(content.to_string());
            Ok(())
        }
    }

    async fn wait_for_posts(sink: &MemorySink, count: usize) -> Vec<String> {
        for _ in 0..100 {
            let posts = sink.posts.lock().unwrap().clone();
            if posts.len() >= count {
                return posts;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        sink.posts.lock().unwrap().clone()
    }

    #[test]
    fn short_line_is_a_single_chunk() {
        assert_eq!(chunk_for_discord("hello", 1900), vec!["hello".to_string()]);
    }

    #[test]
    fn long_line_is_split_on_char_boundaries() {
        let line = "é".repeat(4000);

        let chunks = chunk_for_discord(&line, 1900);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 1900);
        assert_eq!(chunks[1].chars().count(), 1900);
        assert_eq!(chunks[2].chars().count(), 200);
        assert_eq!(chunks.concat(), line);
    }

    /// Tests that only the first bind takes effect.
    ///
    /// Expected: first bind true, second false
    #[tokio::test]
    async fn binds_exactly_once() {
        let relay = LogRelay::new();
        assert!(!relay.is_bound());

        assert!(relay.bind(MemorySink::default()));
        assert!(relay.is_bound());
        assert!(!relay.bind(MemorySink::default()));
    }

    /// Tests forwarding of records through the tracing layer.
    ///
    /// Expected: records before binding and below INFO are not relayed; INFO after
    /// binding is posted with level, target, message and fields
    #[tokio::test]
    async fn relays_info_records_after_binding() {
        let relay = LogRelay::new();
        let sink = MemorySink::default();
        let subscriber = tracing_subscriber::registry().with(relay.layer());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("before binding");
            assert!(relay.bind(sink.clone()));
            tracing::debug!("too verbose");
            tracing::warn!(user_id = 42, "after binding");
        });

        let posts = wait_for_posts(&sink, 1).await;

        assert_eq!(posts.len(), 1);
        assert!(posts[0].contains("WARN"));
        assert!(posts[0].contains(env!("CARGO_CRATE_NAME")));
        assert!(posts[0].contains("- after binding"));
        assert!(posts[0].ends_with("user_id=42"));
    }

    /// Tests that command invocation records reach the log channel.
    ///
    /// Expected: an INFO record is relayed, a DEBUG record is not
    #[tokio::test]
    async fn relays_info_level_invocations() {
        let relay = LogRelay::new();
        let sink = MemorySink::default();
        let subscriber = tracing_subscriber::registry().with(relay.layer());

        tracing::subscriber::with_default(subscriber, || {
            assert!(relay.bind(sink.clone()));
            tracing::debug!("/ping invoked by hidden in guild None");
            tracing::info!("/gameban invoked by modname in guild Some(1)");
        });

        let posts = wait_for_posts(&sink, 1).await;

        assert_eq!(posts.len(), 1);
        assert!(posts[0].contains("INFO"));
        assert!(posts[0].contains("/gameban invoked by modname"));
    }

    /// Tests that records from other crates are not relayed.
    ///
    /// Expected: event with a foreign target is ignored
    #[tokio::test]
    async fn ignores_records_from_other_crates() {
        let relay = LogRelay::new();
        let sink = MemorySink::default();
        let subscriber = tracing_subscriber::registry().with(relay.layer());

        tracing::subscriber::with_default(subscriber, || {
            assert!(relay.bind(sink.clone()));
            tracing::info!(target: "serenity::gateway", "heartbeat");
            tracing::info!("own record");
        });

        let posts = wait_for_posts(&sink, 1).await;
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(posts.len(), 1);
        assert!(posts[0].contains("own record"));
        assert_eq!(sink.posts.lock().unwrap().len(), 1);
    }
}
