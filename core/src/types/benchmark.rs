use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Store command family exercised by a battery. Declaration order is the
/// order batteries run in and the order results are listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operation {
    Set,
    Get,
    Incr,
    Lpush,
    Lpop,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Set,
        Operation::Get,
        Operation::Incr,
        Operation::Lpush,
        Operation::Lpop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Set => "set",
            Operation::Get => "get",
            Operation::Incr => "incr",
            Operation::Lpush => "lpush",
            Operation::Lpop => "lpop",
        }
    }

    /// Whether the battery is run once per payload size.
    pub fn takes_size(self) -> bool {
        matches!(self, Operation::Set | Operation::Get | Operation::Lpush)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Operation::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One benchmark: an operation family, sized when the family takes a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BenchmarkSpec {
    pub operation: Operation,
    pub size: Option<usize>,
}

impl BenchmarkSpec {
    pub fn sized(operation: Operation, size: usize) -> Self {
        debug_assert!(operation.takes_size());
        BenchmarkSpec {
            operation,
            size: Some(size),
        }
    }

    pub fn plain(operation: Operation) -> Self {
        debug_assert!(!operation.takes_size());
        BenchmarkSpec {
            operation,
            size: None,
        }
    }

    /// The fixed battery list: set and get per size, incr, lpush per size, lpop.
    pub fn standard_list(data_sizes: &[usize]) -> Vec<BenchmarkSpec> {
        let mut specs = Vec::with_capacity(data_sizes.len() * 3 + 2);
        for operation in Operation::ALL {
            if operation.takes_size() {
                specs.extend(data_sizes.iter().map(|&size| Self::sized(operation, size)));
            } else {
                specs.push(Self::plain(operation));
            }
        }
        specs
    }

    /// Document key, e.g. `set_10` or `incr`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Payload size used for ordering categories; unsized specs sort first.
    pub fn sort_size(&self) -> usize {
        self.size.unwrap_or(0)
    }

    /// Human-readable label, e.g. `SET 10B` or `INCR`.
    pub fn label(&self) -> String {
        let name = self.operation.name().to_uppercase();
        match self.size {
            Some(size) => format!("{name} {size}B"),
            None => name,
        }
    }
}

impl fmt::Display for BenchmarkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            Some(size) => write!(f, "{}_{}", self.operation, size),
            None => f.write_str(self.operation.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSpecError(String);

impl fmt::Display for ParseSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid benchmark key: {}", self.0)
    }
}

impl std::error::Error for ParseSpecError {}

impl FromStr for BenchmarkSpec {
    type Err = ParseSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSpecError(s.to_string());

        let (name, size) = match s.split_once('_') {
            Some((name, size)) => (name, Some(size.parse::<usize>().map_err(|_| invalid())?)),
            None => (s, None),
        };
        let operation = Operation::from_name(name).ok_or_else(invalid)?;

        if operation.takes_size() != size.is_some() {
            return Err(invalid());
        }

        Ok(BenchmarkSpec { operation, size })
    }
}

impl Serialize for BenchmarkSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BenchmarkSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Which of the two compared servers a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointRole {
    Primary,
    Secondary,
}

impl EndpointRole {
    pub const BOTH: [EndpointRole; 2] = [EndpointRole::Primary, EndpointRole::Secondary];

    pub fn name(self) -> &'static str {
        match self {
            EndpointRole::Primary => "primary",
            EndpointRole::Secondary => "secondary",
        }
    }
}

impl fmt::Display for EndpointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_list_matches_the_fixed_battery() {
        let keys: Vec<String> = BenchmarkSpec::standard_list(&[10, 1000])
            .iter()
            .map(BenchmarkSpec::key)
            .collect();
        assert_eq!(
            keys,
            [
                "set_10",
                "set_1000",
                "get_10",
                "get_1000",
                "incr",
                "lpush_10",
                "lpush_1000",
                "lpop"
            ]
        );
    }

    #[test]
    fn standard_list_is_already_in_sorted_order() {
        let specs = BenchmarkSpec::standard_list(&[10, 1000]);
        let mut sorted = specs.clone();
        sorted.sort();
        assert_eq!(specs, sorted);
    }

    #[test]
    fn keys_parse_back_into_specs() {
        assert_eq!(
            "lpush_1000".parse::<BenchmarkSpec>(),
            Ok(BenchmarkSpec::sized(Operation::Lpush, 1000))
        );
        assert_eq!(
            "lpop".parse::<BenchmarkSpec>(),
            Ok(BenchmarkSpec::plain(Operation::Lpop))
        );
    }

    #[test]
    fn malformed_keys_are_rejected() {
        for key in ["set", "incr_10", "del_10", "get_big", "", "lpop_"] {
            assert!(key.parse::<BenchmarkSpec>().is_err(), "{key} parsed");
        }
    }

    #[test]
    fn labels_are_upper_case_with_byte_suffix() {
        assert_eq!(BenchmarkSpec::sized(Operation::Get, 10).label(), "GET 10B");
        assert_eq!(BenchmarkSpec::plain(Operation::Incr).label(), "INCR");
    }

    #[test]
    fn unsized_specs_sort_at_position_zero() {
        assert_eq!(BenchmarkSpec::plain(Operation::Lpop).sort_size(), 0);
        assert_eq!(BenchmarkSpec::sized(Operation::Set, 100).sort_size(), 100);
    }
}
