use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::TranscriptCache;
use crate::error::Result;
use crate::models::transcript::{AttemptTranscript, TranscriptKey};

const KEY_PREFIX: &str = "quiz_responses";

/// Transcripts stored as JSON strings under `quiz_responses:{user_id}:{quiz_id}`.
#[derive(Clone)]
pub struct RedisTranscriptCache {
    conn: ConnectionManager,
}

impl RedisTranscriptCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn redis_key(key: TranscriptKey) -> String {
        format!("{}:{}", KEY_PREFIX, key)
    }

    async fn load_matching(&self, pattern: String) -> Result<Vec<AttemptTranscript>> {
        let mut conn = self.conn.clone();
        let mut scanned = Vec::new();
        {
            let mut iter = conn.scan_match::<_, String>(&pattern).await?;
            while let Some(key) = iter.next_item().await {
                scanned.push(key);
            }
        }
        let keys = distinct_keys(scanned);

        let mut transcripts = Vec::with_capacity(keys.len());
        for key in keys {
            let raw: Option<String> = redis::cmd("GET").arg(&key).query_async(&mut conn).await?;
            // Keys can expire between SCAN and GET.
            let Some(raw) = raw else { continue };
            match serde_json::from_str::<AttemptTranscript>(&raw) {
                Ok(t) => transcripts.push(t),
                Err(e) => tracing::warn!(key = %key, error = %e, "skipping unreadable transcript"),
            }
        }
        Ok(transcripts)
    }
}

/// SCAN may return a key more than once across cursor steps.
fn distinct_keys(mut keys: Vec<String>) -> Vec<String> {
    keys.sort();
    keys.dedup();
    keys
}

#[async_trait]
impl TranscriptCache for RedisTranscriptCache {
    async fn put(&self, transcript: &AttemptTranscript, ttl: Duration) -> Result<()> {
        let payload = serde_json::to_string(transcript)?;
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SET")
            .arg(Self::redis_key(transcript.key()))
            .arg(payload)
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn get(&self, key: TranscriptKey) -> Result<Option<AttemptTranscript>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(Self::redis_key(key))
            .query_async(&mut conn)
            .await?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<AttemptTranscript>> {
        self.load_matching(format!("{}:{}:*", KEY_PREFIX, user_id)).await
    }

    async fn list_for_quiz(&self, quiz_id: i64) -> Result<Vec<AttemptTranscript>> {
        self.load_matching(format!("{}:*:{}", KEY_PREFIX, quiz_id)).await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
