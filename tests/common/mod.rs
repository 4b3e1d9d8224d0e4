#![allow(dead_code)]

use folio::{
    ContentSurface, LayoutCallback, LayoutResult, OutputResource, PageCount, PageFormat,
    PageRange, PipelineOutcome, RenderingBackend, WriteCallback,
};
use std::io::Write;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// How long a test waits for an outcome that is expected to arrive.
pub const OUTCOME_TIMEOUT: Duration = Duration::from_secs(5);

/// What a scripted backend does with a layout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutStep {
    Finish(PageCount),
    Fail(String),
    /// Drops the continuation without completing it.
    Abandon,
}

/// What a scripted backend does with a write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStep {
    /// Writes a few bytes into the sink, then reports every page written.
    Finish,
    Fail(String),
    Cancel,
    Abandon,
}

/// Where a scripted backend runs its continuations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Before `layout`/`write` returns.
    Inline,
    /// On a freshly spawned thread.
    Thread,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub layout: LayoutStep,
    pub write: WriteStep,
    pub dispatch: Dispatch,
}

impl Script {
    pub fn new(layout: LayoutStep, write: WriteStep) -> Self {
        Self {
            layout,
            write,
            dispatch: Dispatch::Inline,
        }
    }

    pub fn succeeding() -> Self {
        Self::new(LayoutStep::Finish(PageCount::Known(1)), WriteStep::Finish)
    }

    pub fn on_threads(mut self) -> Self {
        self.dispatch = Dispatch::Thread;
        self
    }
}

/// Everything observable about a job, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    BackendCreated(String),
    LayoutSubmitted(PageFormat),
    WriteSubmitted(Vec<PageRange>),
    Disposed,
    Delivered(PipelineOutcome),
}

#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }

    pub fn disposals(&self) -> usize {
        self.count(|e| matches!(e, Event::Disposed))
    }

    pub fn write_submissions(&self) -> usize {
        self.count(|e| matches!(e, Event::WriteSubmitted(_)))
    }

    pub fn deliveries(&self) -> usize {
        self.count(|e| matches!(e, Event::Delivered(_)))
    }

    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events().iter().position(pred)
    }
}

pub struct ScriptedBackend {
    script: Script,
    log: EventLog,
}

impl ScriptedBackend {
    fn dispatch(&self, f: impl FnOnce() + Send + 'static) {
        match self.script.dispatch {
            Dispatch::Inline => f(),
            Dispatch::Thread => {
                thread::spawn(f);
            }
        }
    }
}

impl RenderingBackend for ScriptedBackend {
    fn layout(&self, format: &PageFormat, callback: LayoutCallback) {
        self.log.push(Event::LayoutSubmitted(*format));
        let step = self.script.layout.clone();
        self.dispatch(move || match step {
            LayoutStep::Finish(pages) => {
                callback.finished(LayoutResult::new("scripted", pages, true));
            }
            LayoutStep::Fail(diagnostic) => callback.failed(diagnostic),
            LayoutStep::Abandon => drop(callback),
        });
    }

    fn write(&self, pages: &[PageRange], mut sink: OutputResource, callback: WriteCallback) {
        self.log.push(Event::WriteSubmitted(pages.to_vec()));
        let step = self.script.write.clone();
        let pages = pages.to_vec();
        self.dispatch(move || match step {
            WriteStep::Finish => match sink.write_all(b"%PDF-1.7\n%%EOF\n") {
                Ok(()) => callback.finished(pages),
                Err(e) => callback.failed(e.to_string()),
            },
            WriteStep::Fail(diagnostic) => callback.failed(diagnostic),
            WriteStep::Cancel => callback.cancelled(),
            WriteStep::Abandon => {
                drop(sink);
                drop(callback);
            }
        });
    }

    fn name(&self) -> &'static str {
        "ScriptedBackend"
    }
}

/// A surface whose backend follows a [`Script`] and whose lifecycle is
/// recorded in an [`EventLog`].
pub struct TrackedSurface {
    script: Script,
    log: EventLog,
}

impl TrackedSurface {
    pub fn new(script: Script) -> (Self, EventLog) {
        let log = EventLog::default();
        (
            Self {
                script,
                log: log.clone(),
            },
            log,
        )
    }
}

impl ContentSurface for TrackedSurface {
    fn create_backend(&self, document_name: &str) -> Arc<dyn RenderingBackend> {
        self.log.push(Event::BackendCreated(document_name.to_string()));
        Arc::new(ScriptedBackend {
            script: self.script.clone(),
            log: self.log.clone(),
        })
    }

    fn dispose(&mut self) {
        self.log.push(Event::Disposed);
    }
}

/// A handler that records its outcome in `log` and forwards it to the
/// returned receiver.
pub fn recording_handler(
    log: &EventLog,
) -> (impl FnOnce(PipelineOutcome) + Send + 'static, Receiver<PipelineOutcome>) {
    let (tx, rx): (Sender<PipelineOutcome>, _) = mpsc::channel();
    let log = log.clone();
    let handler = move |outcome: PipelineOutcome| {
        log.push(Event::Delivered(outcome.clone()));
        let _ = tx.send(outcome);
    };
    (handler, rx)
}
