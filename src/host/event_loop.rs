//! A single-threaded cooperative task loop standing in for the host
//! scheduler.
//!
//! Host bindings deliver async completions by scheduling work here; bridge
//! code that parks on a rendezvous must run on some other thread, or the
//! settle task can never fire.

use std::sync::mpsc::{self, Sender};
use std::sync::OnceLock;
use std::thread;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Owns a loop thread that runs queued tasks in FIFO order.
///
/// The thread exits once the loop and every [`Handle`] onto it are dropped.
pub struct EventLoop {
    tx: Sender<Task>,
}

impl EventLoop {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<Task>();
        thread::Builder::new()
            .name("loopio-host-loop".into())
            .spawn(move || {
                for task in rx {
                    task();
                }
            })
            .expect("spawn host loop thread");
        Self { tx }
    }

    /// A cloneable scheduling handle onto this loop.
    pub fn handle(&self) -> Handle {
        Handle {
            tx: self.tx.clone(),
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Schedules tasks onto an [`EventLoop`].
#[derive(Clone)]
pub struct Handle {
    tx: Sender<Task>,
}

impl Handle {
    /// Queue a task; it runs on the loop thread after everything queued
    /// before it. Tasks queued after the loop has shut down are dropped.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let _ = self.tx.send(Box::new(task));
    }
}

/// The process-wide host loop, initialized on first use and never torn
/// down. Mirrors a single long-lived host connection.
pub fn global() -> Handle {
    static GLOBAL: OnceLock<EventLoop> = OnceLock::new();
    GLOBAL.get_or_init(EventLoop::new).handle()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_run_in_fifo_order() {
        let host = EventLoop::new();
        let handle = host.handle();
        let (tx, rx) = mpsc::channel();
        for i in 0..4 {
            let tx = tx.clone();
            handle.schedule(move || {
                tx.send(i).unwrap();
            });
        }
        let order: Vec<i32> = rx.iter().take(4).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn global_handle_is_always_available() {
        let (tx, rx) = mpsc::channel();
        global().schedule(move || {
            tx.send(()).unwrap();
        });
        rx.recv().unwrap();
    }
}
