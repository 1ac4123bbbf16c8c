//! Store client seam: the five commands a battery issues, and the redis-backed
//! implementation used against real servers.

use std::time::Duration;

use kv_core::types::EndpointRole;
use kv_core::BenchError;

use crate::config::Endpoint;

/// Blocking key-value client. Every call is one round-trip.
pub trait KvStore {
    fn set(&mut self, key: &str, value: &str) -> Result<(), BenchError>;
    fn get(&mut self, key: &str) -> Result<Option<String>, BenchError>;
    fn incr(&mut self, key: &str) -> Result<i64, BenchError>;
    fn lpush(&mut self, key: &str, value: &str) -> Result<usize, BenchError>;
    fn lpop(&mut self, key: &str) -> Result<Option<String>, BenchError>;
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn set(&mut self, key: &str, value: &str) -> Result<(), BenchError> {
        (**self).set(key, value)
    }

    fn get(&mut self, key: &str) -> Result<Option<String>, BenchError> {
        (**self).get(key)
    }

    fn incr(&mut self, key: &str) -> Result<i64, BenchError> {
        (**self).incr(key)
    }

    fn lpush(&mut self, key: &str, value: &str) -> Result<usize, BenchError> {
        (**self).lpush(key, value)
    }

    fn lpop(&mut self, key: &str) -> Result<Option<String>, BenchError> {
        (**self).lpop(key)
    }
}

/// A synchronous redis-protocol connection to one endpoint.
pub struct RedisStore {
    con: redis::Connection,
}

impl RedisStore {
    pub fn new(con: redis::Connection) -> Self {
        RedisStore { con }
    }
}

fn command_failed(command: &str, key: &str, err: redis::RedisError) -> BenchError {
    BenchError::Store(format!("{command} {key} failed: {err}"))
}

impl KvStore for RedisStore {
    fn set(&mut self, key: &str, value: &str) -> Result<(), BenchError> {
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query::<()>(&mut self.con)
            .map_err(|err| command_failed("SET", key, err))
    }

    fn get(&mut self, key: &str) -> Result<Option<String>, BenchError> {
        redis::cmd("GET")
            .arg(key)
            .query(&mut self.con)
            .map_err(|err| command_failed("GET", key, err))
    }

    fn incr(&mut self, key: &str) -> Result<i64, BenchError> {
        redis::cmd("INCR")
            .arg(key)
            .query(&mut self.con)
            .map_err(|err| command_failed("INCR", key, err))
    }

    fn lpush(&mut self, key: &str, value: &str) -> Result<usize, BenchError> {
        redis::cmd("LPUSH")
            .arg(key)
            .arg(value)
            .query(&mut self.con)
            .map_err(|err| command_failed("LPUSH", key, err))
    }

    fn lpop(&mut self, key: &str) -> Result<Option<String>, BenchError> {
        redis::cmd("LPOP")
            .arg(key)
            .query(&mut self.con)
            .map_err(|err| command_failed("LPOP", key, err))
    }
}

/// Open a connection to `endpoint` and confirm it answers `PING`.
pub fn connect(
    role: EndpointRole,
    endpoint: &Endpoint,
    timeout: Duration,
) -> Result<RedisStore, BenchError> {
    let failure = |reason: String| BenchError::ConnectionFailure {
        endpoint: role.name().to_string(),
        address: endpoint.address(),
        reason,
    };

    let client = redis::Client::open(endpoint.url().as_str())
        .map_err(|err| failure(format!("invalid client parameters: {err}")))?;
    let mut con = client
        .get_connection_with_timeout(timeout)
        .map_err(|err| failure(err.to_string()))?;

    let pong: String = redis::cmd("PING")
        .query(&mut con)
        .map_err(|err| failure(format!("PING failed: {err}")))?;
    log::debug!("{} answered PING with {pong}", endpoint.address());

    Ok(RedisStore::new(con))
}
