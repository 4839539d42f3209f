//! Line-oriented stand-in speech engines.
//!
//! Real deployments sit a vendor speech SDK behind the `SpeechRecognizer`
//! and `SpeechSynthesizer` seams. This pair lets the full relay run without
//! one: each stdin line is treated as a finalized recognized segment, and
//! synthesis prints the text and paces itself roughly like spoken audio so
//! the feedback guard window is observable.

use super::{RecognizedSegment, SpeechRecognizer, SpeechSynthesizer};
use crate::error::{RelayError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct ConsoleRecognizer {
    listening: Arc<AtomicBool>,
    reader_task: Option<JoinHandle<()>>,
}

impl ConsoleRecognizer {
    pub fn new() -> Self {
        Self {
            listening: Arc::new(AtomicBool::new(true)),
            reader_task: None,
        }
    }
}

impl Default for ConsoleRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for ConsoleRecognizer {
    async fn start(&mut self) -> Result<mpsc::Receiver<RecognizedSegment>> {
        if self.reader_task.is_some() {
            return Err(RelayError::Recognition(
                "recognizer already started".to_string(),
            ));
        }

        let (tx, rx) = mpsc::channel(8);
        let listening = Arc::clone(&self.listening);

        let task = tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        // A suspended engine hears nothing: captured lines
                        // are dropped, not queued for later.
                        if !listening.load(Ordering::SeqCst) {
                            debug!("Recognition suspended, dropping captured segment");
                            continue;
                        }
                        if tx.send(RecognizedSegment { text: line }).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!("stdin read error: {}", e);
                        break;
                    }
                }
            }
        });

        self.reader_task = Some(task);
        Ok(rx)
    }

    async fn suspend(&self) -> Result<()> {
        self.listening.store(false, Ordering::SeqCst);
        debug!("Console recognizer suspended");
        Ok(())
    }

    async fn resume(&self) -> Result<()> {
        self.listening.store(true, Ordering::SeqCst);
        debug!("Console recognizer resumed");
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.reader_task.take() {
            task.abort();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console-recognizer"
    }
}

pub struct ConsoleSynthesizer {
    language: String,
}

impl ConsoleSynthesizer {
    pub fn new(language: String) -> Self {
        Self { language }
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    async fn speak(&self, text: &str) -> Result<()> {
        println!(">> [{}] {}", self.language, text);

        // Hold "audio is playing" for roughly as long as speaking the text
        // would take, capped so long messages don't stall the relay forever.
        let words = text.split_whitespace().count().max(1) as u64;
        tokio::time::sleep(Duration::from_millis((words * 150).min(4_000))).await;

        Ok(())
    }

    fn name(&self) -> &str {
        "console-synthesizer"
    }
}
