//! In-process store with redis semantics for the five benchmarked commands.
//!
//! Records every call so tests can assert on ordering and key namespaces,
//! and can simulate a fixed per-call latency or a failure after N calls.

use std::collections::{HashMap, VecDeque};
use std::thread;
use std::time::Duration;

use kv_core::types::Operation;
use kv_core::BenchError;

use crate::store::KvStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCall {
    pub operation: Operation,
    pub key: String,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    strings: HashMap<String, String>,
    lists: HashMap<String, VecDeque<String>>,
    calls: Vec<StoreCall>,
    latency: Option<Duration>,
    operation_latency: HashMap<Operation, Duration>,
    fail_after: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call sleeps for `latency` before answering.
    pub fn with_latency(latency: Duration) -> Self {
        MemoryStore {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Override the latency of one command family.
    pub fn with_operation_latency(mut self, operation: Operation, latency: Duration) -> Self {
        self.operation_latency.insert(operation, latency);
        self
    }

    /// Calls after the first `calls` succeed return a store error.
    pub fn failing_after(mut self, calls: usize) -> Self {
        self.fail_after = Some(calls);
        self
    }

    pub fn calls(&self) -> &[StoreCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn list_len(&self, key: &str) -> usize {
        self.lists.get(key).map_or(0, VecDeque::len)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    fn record(&mut self, operation: Operation, key: &str) -> Result<(), BenchError> {
        if let Some(limit) = self.fail_after {
            if self.calls.len() >= limit {
                return Err(BenchError::Store(format!(
                    "{} {key} failed: injected failure",
                    operation.name().to_uppercase()
                )));
            }
        }
        self.calls.push(StoreCall {
            operation,
            key: key.to_string(),
        });
        if let Some(latency) = self
            .operation_latency
            .get(&operation)
            .copied()
            .or(self.latency)
        {
            thread::sleep(latency);
        }
        Ok(())
    }

    fn wrong_type(operation: Operation, key: &str) -> BenchError {
        BenchError::Store(format!(
            "{} {key} failed: WRONGTYPE Operation against a key holding the wrong kind of value",
            operation.name().to_uppercase()
        ))
    }
}

impl KvStore for MemoryStore {
    fn set(&mut self, key: &str, value: &str) -> Result<(), BenchError> {
        self.record(Operation::Set, key)?;
        self.lists.remove(key);
        self.strings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<Option<String>, BenchError> {
        self.record(Operation::Get, key)?;
        if self.lists.contains_key(key) {
            return Err(Self::wrong_type(Operation::Get, key));
        }
        Ok(self.strings.get(key).cloned())
    }

    fn incr(&mut self, key: &str) -> Result<i64, BenchError> {
        self.record(Operation::Incr, key)?;
        if self.lists.contains_key(key) {
            return Err(Self::wrong_type(Operation::Incr, key));
        }
        let current = match self.strings.get(key) {
            Some(raw) => raw.parse::<i64>().map_err(|_| {
                BenchError::Store(format!(
                    "INCR {key} failed: value is not an integer or out of range"
                ))
            })?,
            None => 0,
        };
        let next = current + 1;
        self.strings.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    fn lpush(&mut self, key: &str, value: &str) -> Result<usize, BenchError> {
        self.record(Operation::Lpush, key)?;
        if self.strings.contains_key(key) {
            return Err(Self::wrong_type(Operation::Lpush, key));
        }
        let list = self.lists.entry(key.to_string()).or_default();
        list.push_front(value.to_string());
        Ok(list.len())
    }

    fn lpop(&mut self, key: &str) -> Result<Option<String>, BenchError> {
        self.record(Operation::Lpop, key)?;
        if self.strings.contains_key(key) {
            return Err(Self::wrong_type(Operation::Lpop, key));
        }
        let Some(list) = self.lists.get_mut(key) else {
            return Ok(None);
        };
        let popped = list.pop_front();
        if list.is_empty() {
            self.lists.remove(key);
        }
        Ok(popped)
    }
}
