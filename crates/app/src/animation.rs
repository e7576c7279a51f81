//! Frame scheduling for the hero animations.
//!
//! An [`AnimationLoop`] owns a background thread that fires a callback once
//! per frame interval (the UI passes a repaint request). The thread stops on
//! [`AnimationLoop::stop`] or when the loop is dropped, so tearing down the
//! view also tears down the frame source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct AnimationLoop {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    started: Instant,
    offset: Duration,
}

impl AnimationLoop {
    /// Start firing `on_frame` every `interval`. `offset` is added to the
    /// reported elapsed time, so a resumed loop continues where it paused.
    pub fn start<F>(interval: Duration, offset: Duration, on_frame: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("animation-loop".into())
            .spawn(move || {
                while !flag.load(Ordering::Acquire) {
                    on_frame();
                    thread::park_timeout(interval);
                }
            });

        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::warn!(error = %e, "animation thread did not start; frames will only follow input");
                None
            }
        };

        Self {
            stop,
            handle,
            started: Instant::now(),
            offset,
        }
    }

    /// Animation clock: time since start plus the resume offset.
    pub fn elapsed(&self) -> Duration {
        self.offset + self.started.elapsed()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.load(Ordering::Acquire)
            && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop issuing frames and wait for the thread to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                tracing::warn!("animation thread panicked");
            }
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
