//! Routing of rendered lines to appenders, synchronously or through the
//! process-wide async worker
//!
//! Loggers do not own threads: derived loggers are cheap and short-lived, so
//! every logger with async output enabled shares one background worker,
//! started on first use.

use super::{
    appender::Appender,
    config::LoggerConfig,
    error::{LoggerError, Result},
    log_entry::LogEntry,
};
use crate::appenders::{ConsoleAppender, FileAppender, WriterAppender};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::any::Any;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

/// Capacity of the async queue; a full queue falls back to a direct write
pub const ASYNC_BUFFER_SIZE: usize = 10_000;

const BATCH_SIZE: usize = 50;

/// A rendered line together with the destinations it goes to
pub struct Record {
    appenders: Vec<Box<dyn Appender>>,
    entry: LogEntry,
    line: String,
}

impl Record {
    pub fn new(appenders: Vec<Box<dyn Appender>>, entry: LogEntry, line: String) -> Self {
        Self {
            appenders,
            entry,
            line,
        }
    }
}

enum Job {
    Write(Record),
    Flush(Sender<()>),
}

struct AsyncWorker {
    sender: Sender<Job>,
}

static WORKER: OnceLock<AsyncWorker> = OnceLock::new();

impl AsyncWorker {
    fn spawn() -> Self {
        let (sender, receiver) = bounded(ASYNC_BUFFER_SIZE);
        let spawned = thread::Builder::new()
            .name("rust-chain-logger".to_string())
            .spawn(move || Self::run(receiver));
        if let Err(e) = spawned {
            // The receiver is gone with the closure, so every send reports
            // Disconnected and callers write synchronously.
            eprintln!("[LOGGER ERROR] Failed to start async log worker: {}", e);
        }
        Self { sender }
    }

    fn run(receiver: Receiver<Job>) {
        let mut batch: Vec<Record> = Vec::with_capacity(BATCH_SIZE);

        while let Ok(job) = receiver.recv() {
            let mut acks = Vec::new();
            Self::collect(job, &mut batch, &mut acks);

            // Drain whatever is already queued, up to one batch
            while batch.len() < BATCH_SIZE {
                match receiver.try_recv() {
                    Ok(job) => Self::collect(job, &mut batch, &mut acks),
                    Err(_) => break,
                }
            }

            process_batch(&mut batch);

            for ack in acks {
                let _ = ack.send(());
            }
        }
    }

    fn collect(job: Job, batch: &mut Vec<Record>, acks: &mut Vec<Sender<()>>) {
        match job {
            Job::Write(record) => batch.push(record),
            Job::Flush(ack) => acks.push(ack),
        }
    }
}

/// Destinations for one line under `config`
///
/// A configured writer replaces both file and console output.
pub fn appenders_for(config: &LoggerConfig) -> Vec<Box<dyn Appender>> {
    if let Some(ref writer) = config.writer {
        return vec![Box::new(WriterAppender::new(writer.clone()))];
    }

    let mut appenders: Vec<Box<dyn Appender>> = Vec::with_capacity(2);
    if !config.path.is_empty() {
        appenders.push(Box::new(FileAppender::new(&config.path, config.file.as_str())));
    }
    if config.stdout_print {
        appenders.push(Box::new(ConsoleAppender::new()));
    }
    appenders
}

/// Write `record` now, or queue it for the async worker
pub fn dispatch(record: Record, async_mode: bool) {
    if !async_mode {
        process_record(record);
        return;
    }

    let worker = WORKER.get_or_init(AsyncWorker::spawn);
    send_or_write(&worker.sender, record);
}

/// Queue `record`, writing it on the caller's thread when the queue is full
/// or the worker is gone
fn send_or_write(sender: &Sender<Job>, record: Record) {
    if let Err(e) = sender.try_send(Job::Write(record)) {
        match e.into_inner() {
            Job::Write(record) => process_record(record),
            Job::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

/// Wait until every line queued before this call has been written
///
/// Returns immediately when the async worker was never started.
pub fn flush_async(timeout: Duration) -> Result<()> {
    let Some(worker) = WORKER.get() else {
        return Ok(());
    };

    let (ack_sender, ack_receiver) = bounded(1);
    match worker.sender.send_timeout(Job::Flush(ack_sender), timeout) {
        Ok(()) => ack_receiver
            .recv_timeout(timeout)
            .map_err(|_| LoggerError::FlushTimeout),
        Err(crossbeam_channel::SendTimeoutError::Timeout(_)) => Err(LoggerError::FlushTimeout),
        // No worker thread: queued lines were already written synchronously
        Err(crossbeam_channel::SendTimeoutError::Disconnected(_)) => Ok(()),
    }
}

fn process_batch(batch: &mut Vec<Record>) {
    for record in batch.drain(..) {
        process_record(record);
    }
}

/// Write one record to each of its appenders
///
/// **Per-Appender Panic Isolation**: each appender call is wrapped in
/// catch_unwind so a failing destination never keeps the line from the
/// others.
fn process_record(mut record: Record) {
    let Record {
        ref mut appenders,
        ref entry,
        ref line,
    } = record;

    for appender in appenders.iter_mut() {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.append(entry, line)?;
            appender.flush()
        }));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}. \
                     Other appenders continue to function.",
                    appender.name(),
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
