//! Single-settlement deferred values.

use std::fmt;
use std::sync::{Arc, Mutex};

use super::Value;
use crate::error::HostFault;

/// The settled outcome of a deferred: a value, or the host-exception analog.
pub type Outcome = Result<Value, HostFault>;

type SettleFn = Box<dyn FnOnce(Outcome) + Send>;

/// A host-owned future with exactly one settlement.
///
/// Callbacks registered before settlement run on the settling thread, in
/// registration order. Callbacks registered after settlement run immediately
/// with a copy of the outcome. Settle calls after the first are ignored.
#[derive(Clone)]
pub struct Deferred {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    outcome: Option<Outcome>,
    callbacks: Vec<SettleFn>,
}

impl Deferred {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Settle with a value.
    pub fn resolve(&self, value: Value) {
        self.settle(Ok(value));
    }

    /// Settle with a fault.
    pub fn reject(&self, fault: HostFault) {
        self.settle(Err(fault));
    }

    /// True once either settle call has happened.
    pub fn is_settled(&self) -> bool {
        self.state.lock().unwrap().outcome.is_some()
    }

    /// Register a settle callback.
    pub fn on_settle<F>(&self, f: F)
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        let mut state = self.state.lock().unwrap();
        match state.outcome.clone() {
            Some(outcome) => {
                drop(state);
                f(outcome);
            }
            None => state.callbacks.push(Box::new(f)),
        }
    }

    fn settle(&self, outcome: Outcome) {
        let callbacks = {
            let mut state = self.state.lock().unwrap();
            if state.outcome.is_some() {
                return;
            }
            state.outcome = Some(outcome.clone());
            std::mem::take(&mut state.callbacks)
        };
        for cb in callbacks {
            cb(outcome.clone());
        }
    }
}

impl Default for Deferred {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_settled() {
            f.write_str("Deferred(settled)")
        } else {
            f.write_str("Deferred(pending)")
        }
    }
}
