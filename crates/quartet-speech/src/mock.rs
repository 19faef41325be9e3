//! Mock TTS backend for testing

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::backend::TtsBackend;
use crate::error::{Error, Result};
use crate::voice::VoiceProfile;

/// A mock TTS backend that returns fixed bytes or a forced failure.
pub struct MockTts {
    audio: Bytes,
    fail: AtomicBool,
    calls: AtomicUsize,
    texts: Mutex<Vec<String>>,
}

impl Default for MockTts {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTts {
    /// Create a mock returning a small fixed payload.
    #[must_use]
    pub fn new() -> Self {
        Self {
            audio: Bytes::from_static(b"mock-audio"),
            fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Make every synthesize call fail.
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Number of synthesize calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts passed to synthesize, in call order.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl TtsBackend for MockTts {
    fn name(&self) -> &str {
        "mock"
    }

    async fn synthesize(&self, text: &str, _profile: &VoiceProfile) -> Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());

        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Api {
                status: 503,
                message: "forced failure".to_string(),
            });
        }
        Ok(self.audio.clone())
    }
}
