//! Scripted EIP-1193 provider for adapter tests.

use async_trait::async_trait;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use wp_chain_client::{ChainError, ChainResult, Eip1193};

type PauseHook = Box<dyn Fn(usize)>;

pub(crate) struct MockProvider {
    injected: bool,
    scripted: RefCell<HashMap<String, VecDeque<ChainResult<Value>>>>,
    calls: RefCell<Vec<(String, Value)>>,
    pauses: Cell<usize>,
    on_pause: RefCell<Option<PauseHook>>,
}

impl MockProvider {
    pub fn injected() -> Self {
        Self::with_injection(true)
    }

    pub fn absent() -> Self {
        Self::with_injection(false)
    }

    fn with_injection(injected: bool) -> Self {
        Self {
            injected,
            scripted: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
            pauses: Cell::new(0),
            on_pause: RefCell::new(None),
        }
    }

    /// Queue a successful response for the next `method` request.
    pub fn respond(&self, method: &str, value: Value) {
        self.enqueue(method, Ok(value));
    }

    pub fn fail(&self, method: &str, err: ChainError) {
        self.enqueue(method, Err(err));
    }

    fn enqueue(&self, method: &str, response: ChainResult<Value>) {
        self.scripted
            .borrow_mut()
            .entry(method.to_owned())
            .or_default()
            .push_back(response);
    }

    pub fn on_pause(&self, hook: impl Fn(usize) + 'static) {
        *self.on_pause.borrow_mut() = Some(Box::new(hook));
    }

    pub fn calls_to(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|(m, _)| m == method).count()
    }

    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn pauses(&self) -> usize {
        self.pauses.get()
    }
}

#[async_trait(?Send)]
impl Eip1193 for MockProvider {
    fn is_injected(&self) -> bool {
        self.injected
    }

    async fn request(&self, method: &str, params: Value) -> ChainResult<Value> {
        self.calls.borrow_mut().push((method.to_owned(), params));
        self.scripted
            .borrow_mut()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ChainError::Transport(format!("unscripted {method}"))))
    }

    async fn pause(&self, _interval: Duration) {
        let count = self.pauses.get() + 1;
        self.pauses.set(count);
        if let Some(hook) = self.on_pause.borrow().as_ref() {
            hook(count);
        }
    }
}
