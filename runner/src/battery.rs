//! Batteries: the fixed command sequences timed for one trial.
//!
//! Each battery has an untimed `prepare` half (seeding keys the timed half
//! reads back) and a timed `exercise` half:
//!
//! | Battery      | prepare (untimed)              | exercise (timed)          |
//! |--------------|--------------------------------|---------------------------|
//! | set(size)    | -                              | N x SET distinct keys     |
//! | get(size)    | N x SET distinct keys          | N x GET the same keys     |
//! | incr         | N x SET distinct keys to "0"   | N x INCR the same keys    |
//! | lpush(size)  | -                              | N x LPUSH onto one list   |
//! | lpop         | N x LPUSH 100-byte filler      | N x LPOP draining it      |

use std::time::Instant;

use kv_core::constants::{FILLER_BYTE, INCR_INITIAL_VALUE, LPOP_VALUE_SIZE};
use kv_core::types::{BenchmarkSpec, EndpointRole, Operation};
use kv_core::BenchError;

use crate::store::KvStore;

/// Namespace for every key one trial touches: `{endpoint}:{benchmark}:{trial}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    pub fn new(role: EndpointRole, spec: BenchmarkSpec, trial: usize) -> Self {
        KeyPrefix(format!("{}:{}:{}", role.name(), spec.key(), trial))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}:{}", self.0, suffix)
    }

    fn indexed(&self, family: &str, index: usize) -> String {
        format!("{}:{}:{}", self.0, family, index)
    }
}

/// `size` bytes of filler.
pub fn filler(size: usize) -> String {
    FILLER_BYTE.to_string().repeat(size)
}

/// One battery instance, bound to its key namespace and payload.
pub struct Battery<'a> {
    spec: BenchmarkSpec,
    prefix: &'a KeyPrefix,
    operations: usize,
    value: String,
}

impl<'a> Battery<'a> {
    pub fn new(spec: BenchmarkSpec, prefix: &'a KeyPrefix, operations: usize) -> Self {
        let value = match spec.operation {
            Operation::Incr => INCR_INITIAL_VALUE.to_string(),
            Operation::Lpop => filler(LPOP_VALUE_SIZE),
            Operation::Set | Operation::Get | Operation::Lpush => filler(spec.sort_size()),
        };
        Battery {
            spec,
            prefix,
            operations,
            value,
        }
    }

    /// Untimed setup issued before the measured loop.
    pub fn prepare<S: KvStore + ?Sized>(&self, store: &mut S) -> Result<(), BenchError> {
        match self.spec.operation {
            Operation::Set | Operation::Lpush => {}
            Operation::Get | Operation::Incr => {
                let family = self.spec.operation.name();
                for i in 0..self.operations {
                    store.set(&self.prefix.indexed(family, i), &self.value)?;
                }
            }
            Operation::Lpop => {
                let key = self.prefix.key("list:pop");
                for _ in 0..self.operations {
                    store.lpush(&key, &self.value)?;
                }
            }
        }
        Ok(())
    }

    /// The measured loop.
    pub fn exercise<S: KvStore + ?Sized>(&self, store: &mut S) -> Result<(), BenchError> {
        let family = self.spec.operation.name();
        match self.spec.operation {
            Operation::Set => {
                for i in 0..self.operations {
                    store.set(&self.prefix.indexed(family, i), &self.value)?;
                }
            }
            Operation::Get => {
                for i in 0..self.operations {
                    store.get(&self.prefix.indexed(family, i))?;
                }
            }
            Operation::Incr => {
                for i in 0..self.operations {
                    store.incr(&self.prefix.indexed(family, i))?;
                }
            }
            Operation::Lpush => {
                let key = self.prefix.key("list");
                for _ in 0..self.operations {
                    store.lpush(&key, &self.value)?;
                }
            }
            Operation::Lpop => {
                let key = self.prefix.key("list:pop");
                for _ in 0..self.operations {
                    store.lpop(&key)?;
                }
            }
        }
        Ok(())
    }
}

/// Run one trial of `spec` and return the timed window in seconds.
pub fn run_trial<S: KvStore + ?Sized>(
    store: &mut S,
    spec: BenchmarkSpec,
    prefix: &KeyPrefix,
    operations: usize,
) -> Result<f64, BenchError> {
    let battery = Battery::new(spec, prefix, operations);
    battery.prepare(store)?;

    let start = Instant::now();
    battery.exercise(store)?;
    Ok(start.elapsed().as_secs_f64())
}
