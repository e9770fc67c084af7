//! Per-file progress spinner for interactive terminals.
//!
//! A spinner lives for the processing of exactly one file. It redraws
//! `\r<prefix>[==>       ]` on its own thread at a fixed period until
//! [`Spinner::stop`] is called (or the spinner is dropped). Stopping joins the
//! thread, so once it returns no further frame can be written and the caller
//! may overwrite the line with the final status.

use crate::config::ProgressConfig;
use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// Frame for `position` in a bar of `width` cells. Positions at or past the
/// width draw a full bar.
pub fn build_frame(position: usize, width: usize) -> String {
    if position >= width {
        return done_bar(width);
    }
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    s.push_str(&"=".repeat(position));
    s.push('>');
    s.push_str(&" ".repeat(width - position - 1));
    s.push(']');
    s
}

/// A completely filled bar.
pub fn done_bar(width: usize) -> String {
    format!("[{}]", "=".repeat(width))
}

/// Text that blanks the bar after `prefix` and returns the cursor behind it.
pub fn clear_line(prefix: &str, width: usize) -> String {
    format!("\r{prefix}{}\r{prefix}", " ".repeat(width + 2))
}

/// Handle to a running (or inert) spinner.
pub struct Spinner {
    running: Option<(Sender<()>, JoinHandle<()>)>,
}

impl Spinner {
    /// A spinner that draws nothing.
    pub fn inert() -> Self {
        Self { running: None }
    }

    /// Start a spinner on stdout if `enabled`, otherwise return an inert one.
    pub fn start(prefix: &str, cfg: &ProgressConfig, enabled: bool) -> Self {
        if !enabled || !cfg.enabled {
            return Self::inert();
        }
        Self::start_on(io::stdout(), prefix, cfg)
    }

    /// Start a spinner drawing to `out`.
    pub fn start_on<W>(mut out: W, prefix: &str, cfg: &ProgressConfig) -> Self
    where
        W: Write + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let prefix = prefix.to_string();
        let width = cfg.bar_width.max(1);
        let period = Duration::from_millis(cfg.tick_millis.max(1));

        let handle = std::thread::spawn(move || {
            let mut position = 0usize;
            loop {
                let _ = write!(out, "\r{}{}", prefix, build_frame(position, width));
                let _ = out.flush();
                position = (position + 1) % (width + 1);
                match stop_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Stop requested or handle dropped.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                }
            }
        });

        Self {
            running: Some((stop_tx, handle)),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.running.is_some()
    }

    /// Stop the animation and wait for the drawing thread to exit.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        if let Some((stop_tx, handle)) = self.running.take() {
            let _ = stop_tx.send(());
            if handle.join().is_err() {
                tracing::warn!("progress spinner thread panicked");
            }
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.halt();
    }
}
