//! Runs a parsed script against a keyboard on virtual time.

use crate::script::Command;
use redpanda_core::{
    Config, DeadlineScheduler, EventLog, KeyEvent, KeySink, Keyboard, ProxySink, TextDocument,
};
use anyhow::Result;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// One emitted event with the virtual time it happened at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stamped {
    pub t_ms: u64,
    pub event: KeyEvent,
}

/// Something the runner wants printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Event(Stamped),
    Layout(String),
}

/// Keyboard plus the document its events are applied to.
pub struct Simulator {
    keyboard: Keyboard<DeadlineScheduler, EventLog>,
    document: ProxySink<TextDocument>,
}

impl Simulator {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            keyboard: Keyboard::with_sink(config, EventLog::new())?,
            document: ProxySink::new(TextDocument::new()),
        })
    }

    /// Final document text.
    pub fn text(&self) -> &str {
        self.document.proxy().text()
    }

    /// Run every command, collecting output in order.
    pub fn run(&mut self, commands: &[Command]) -> Vec<Output> {
        let mut out = Vec::new();
        for command in commands {
            self.step(command, &mut out);
        }
        out
    }

    fn step(&mut self, command: &Command, out: &mut Vec<Output>) {
        debug!(?command, now_ms = self.now_ms(), "step");
        match command {
            Command::Tap(label) => self.keyboard.tap(label),
            Command::Press(label) => self.keyboard.press(label),
            Command::Release(label) => {
                self.keyboard.release(label);
            }
            Command::Wait(duration) => self.wait(*duration, out),
            Command::Hold(label, duration) => {
                self.keyboard.press(label);
                self.flush(out);
                self.wait(*duration, out);
                self.keyboard.release(label);
            }
            Command::Show => {
                self.flush(out);
                out.push(Output::Layout(format!(
                    "[{}]\n{}",
                    self.keyboard.layer(),
                    self.keyboard.context().render_rows()
                )));
            }
            Command::Reset => self.keyboard.reset(),
        }
        self.flush(out);
    }

    // Step deadline by deadline so each repeat gets its own timestamp.
    fn wait(&mut self, duration: Duration, out: &mut Vec<Output>) {
        let target = self.keyboard.now() + duration;
        while let Some(deadline) = self.keyboard.scheduler().next_deadline() {
            if deadline > target {
                break;
            }
            self.keyboard.advance_to(deadline);
            self.flush(out);
        }
        self.keyboard.advance_to(target);
        self.flush(out);
    }

    fn flush(&mut self, out: &mut Vec<Output>) {
        let t_ms = self.now_ms();
        for event in self.keyboard.sink_mut().take() {
            self.document.send(event.clone());
            out.push(Output::Event(Stamped { t_ms, event }));
        }
    }

    fn now_ms(&self) -> u64 {
        self.keyboard.now().as_millis() as u64
    }
}
