//! The background simulation loop.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use parking_lot::Mutex;
use tracing::info;

use crate::{graph::GraphState, Settings};

/// Handle to a running layout loop.
///
/// The loop ticks the graph, releases the lock, sleeps the pacing
/// interval, and checks a stop flag before the next iteration. Dropping
/// the handle stops the loop and joins the thread.
#[derive(Debug)]
pub(crate) struct LayoutHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl LayoutHandle {
    pub(crate) fn spawn(
        state: Arc<Mutex<GraphState>>,
        settings: Settings,
        interval: Duration,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let thread = thread::spawn(move || {
            info!(?interval, "layout loop started");
            while !flag.load(Ordering::Relaxed) {
                {
                    let mut state = state.lock();
                    state.step(&settings);
                }
                // Lock released while pacing so mutators are never starved
                // between ticks.
                thread::sleep(interval);
            }
            info!("layout loop stopped");
        });

        Self {
            stop,
            thread: Some(thread),
        }
    }

    /// Signal the loop and wait for the thread to finish.
    pub(crate) fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for LayoutHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
