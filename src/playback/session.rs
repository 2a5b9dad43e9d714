use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::core::{FeedEntry, Script};
use crate::error::{FeedError, Result};
use crate::playback::{
    clamp_speed, FeedBuffer, PlaybackConfig, PlaybackState, ScheduleHandle, Scheduler,
};

/// Point-in-time playback progress, published after every change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub state: PlaybackState,
    /// Scheduled entries delivered so far (seed lines excluded)
    pub delivered: usize,
    /// Scheduled entries still due
    pub pending: usize,
}

impl Progress {
    /// Whether the script has nothing left to deliver
    pub fn is_exhausted(&self) -> bool {
        self.pending == 0 && self.state != PlaybackState::Idle
    }
}

/// State shared between a session and its delivery callback
struct Shared {
    buffer: FeedBuffer,
    state: PlaybackState,
    delivered: usize,
    total: usize,
}

impl Shared {
    fn progress(&self) -> Progress {
        let pending = match self.state {
            PlaybackState::Stopped => 0,
            _ => self.total - self.delivered,
        };
        Progress {
            state: self.state,
            delivered: self.delivered,
            pending,
        }
    }
}

/// One single-use playback run of a script
///
/// A session moves `Idle -> Running -> Stopped`. Starting seeds the feed and
/// arms the scheduler; stopping cancels every delivery that has not fired.
/// Dropping a session stops it.
pub struct Session {
    script: Script,
    config: PlaybackConfig,
    shared: Arc<Mutex<Shared>>,
    progress_tx: Arc<watch::Sender<Progress>>,
    handle: Option<ScheduleHandle>,
}

impl Session {
    pub fn new(script: Script, config: PlaybackConfig) -> Result<Self> {
        let config = PlaybackConfig {
            speed: clamp_speed(config.speed),
            ..config
        };
        let shared = Shared {
            buffer: FeedBuffer::new(config.capacity)?,
            state: PlaybackState::Idle,
            delivered: 0,
            total: script.len(),
        };
        let (progress_tx, _) = watch::channel(shared.progress());

        Ok(Self {
            script,
            config,
            shared: Arc::new(Mutex::new(shared)),
            progress_tx: Arc::new(progress_tx),
            handle: None,
        })
    }

    /// Seed the feed and start delivering scheduled entries.
    ///
    /// If the scheduler cannot start the session is left stopped with an
    /// empty feed.
    pub fn start(&mut self) -> Result<()> {
        let mut shared = self.shared.lock();
        match shared.state {
            PlaybackState::Running => return Err(FeedError::AlreadyRunning),
            PlaybackState::Stopped => return Err(FeedError::SessionStopped),
            PlaybackState::Idle => {}
        }

        if !self.script.is_monotonic() {
            warn!("Script delays are not in order; lines will appear in delay order");
        }

        let callback_shared = self.shared.clone();
        let callback_tx = self.progress_tx.clone();
        let handle = Scheduler::start(self.script.entries(), self.config.speed, move |entry| {
            let mut shared = callback_shared.lock();
            if shared.state != PlaybackState::Running {
                return;
            }
            debug!("Feed line: {}", entry.text);
            shared.buffer.append(FeedEntry::new(entry.text.as_str()));
            shared.delivered += 1;
            callback_tx.send_replace(shared.progress());
        });

        let handle = match handle {
            Ok(handle) => handle,
            Err(e) => {
                shared.state = PlaybackState::Stopped;
                self.progress_tx.send_replace(shared.progress());
                return Err(e);
            }
        };

        for line in self.script.seed() {
            shared.buffer.append(FeedEntry::new(line.as_str()));
        }
        shared.state = PlaybackState::Running;
        self.progress_tx.send_replace(shared.progress());
        drop(shared);

        self.handle = Some(handle);
        info!(
            "Playback started: {} seed lines, {} scheduled, capacity {}",
            self.script.seed().len(),
            self.script.len(),
            self.config.capacity
        );
        Ok(())
    }

    /// Stop playback. No line is appended once this returns.
    ///
    /// Safe to call any number of times, before or after the script finished.
    pub fn stop(&mut self) {
        {
            let mut shared = self.shared.lock();
            if shared.state == PlaybackState::Stopped {
                return;
            }
            shared.state = PlaybackState::Stopped;
            self.progress_tx.send_replace(shared.progress());
        }

        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
        info!("Playback stopped");
    }

    /// Current feed contents, oldest first
    pub fn snapshot(&self) -> Vec<FeedEntry> {
        self.shared.lock().buffer.snapshot()
    }

    pub fn state(&self) -> PlaybackState {
        self.shared.lock().state
    }

    pub fn progress(&self) -> Progress {
        self.shared.lock().progress()
    }

    /// Receiver notified after every change to the feed or lifecycle
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress_tx.subscribe()
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
