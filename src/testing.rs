/// In-memory fakes for the host ports, shared by unit tests

use crate::controller::Clock;
use crate::error::{Result, SessionError};
use crate::storage::KeyValueStore;
use crate::tab_data::TabInfo;
use crate::tabs::TabHost;
use async_trait::async_trait;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, Value>>>,
    writes: Rc<RefCell<HashMap<String, usize>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
    read_yields: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: &str, value: Value) {
        self.values.borrow_mut().insert(key.to_string(), value);
    }

    pub fn value(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    pub fn writes(&self, key: &str) -> usize {
        self.writes.borrow().get(key).copied().unwrap_or(0)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Suspend this many times on every read
    pub fn slow_reads(&self, yields: usize) {
        self.read_yields.set(yields);
    }
}

#[async_trait(?Send)]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        for _ in 0..self.read_yields.get() {
            tokio::task::yield_now().await;
        }
        if self.fail_reads.get() {
            return Err(SessionError::Storage("storage unavailable".to_string()));
        }
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        if self.fail_writes.get() {
            return Err(SessionError::Storage("quota exceeded".to_string()));
        }
        self.insert(key, value);
        *self.writes.borrow_mut().entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeTabs {
    tabs: Rc<RefCell<Vec<TabInfo>>>,
    created: Rc<RefCell<Vec<(String, bool)>>>,
    fail_query: Rc<Cell<bool>>,
    fail_create_at: Rc<Cell<Option<usize>>>,
}

impl FakeTabs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tabs(tabs: Vec<TabInfo>) -> Self {
        let host = Self::new();
        *host.tabs.borrow_mut() = tabs;
        host
    }

    pub fn created(&self) -> Vec<(String, bool)> {
        self.created.borrow().clone()
    }

    pub fn fail_query(&self, fail: bool) {
        self.fail_query.set(fail);
    }

    /// Fail the create call with this zero-based index
    pub fn fail_create_at(&self, index: usize) {
        self.fail_create_at.set(Some(index));
    }
}

#[async_trait(?Send)]
impl TabHost for FakeTabs {
    async fn query_current_window(&self) -> Result<Vec<TabInfo>> {
        // Suspend once so overlapping operations can be observed
        tokio::task::yield_now().await;
        if self.fail_query.get() {
            return Err(SessionError::Tabs("no current window".to_string()));
        }
        Ok(self.tabs.borrow().clone())
    }

    async fn create_tab(&self, url: &str, active: bool) -> Result<()> {
        if self.fail_create_at.get() == Some(self.created.borrow().len()) {
            return Err(SessionError::Tabs(format!("cannot open {}", url)));
        }
        self.created.borrow_mut().push((url.to_string(), active));
        Ok(())
    }
}

/// Clock that advances by one millisecond per reading
pub struct FixedClock {
    now: Cell<i64>,
}

impl FixedClock {
    pub fn starting_at(now: i64) -> Self {
        FixedClock { now: Cell::new(now) }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        let now = self.now.get();
        self.now.set(now + 1);
        now
    }

    fn format_local(&self, millis: i64) -> String {
        format!("t{}", millis)
    }
}
