//! Pass/fail status shared by test runs and their threshold settings.
//!
//! Stored as `TEXT` (`"ok"` / `"fail"`) in the `test_runs.status` column and
//! inside the `thresholds` JSONB document.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical string for [`Status::Ok`].
pub const STATUS_OK: &str = "ok";

/// Canonical string for [`Status::Fail`].
pub const STATUS_FAIL: &str = "fail";

/// Outcome of a test run or of a single latency threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Ok,
    Fail,
}

impl Status {
    /// Return the canonical string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => STATUS_OK,
            Status::Fail => STATUS_FAIL,
        }
    }

    /// Parse a stored status string.
    ///
    /// Only `"fail"` maps to [`Status::Fail`]; every other input, including
    /// unknown strings, maps to [`Status::Ok`]. Unknown values are accepted
    /// leniently so old or hand-edited rows never fail to load.
    pub fn from_str_lossy(s: &str) -> Self {
        if s == STATUS_FAIL {
            Status::Fail
        } else {
            Status::Ok
        }
    }

    pub fn is_fail(self) -> bool {
        self == Status::Fail
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Status {
    fn from(value: &str) -> Self {
        Status::from_str_lossy(value)
    }
}

// Used by `#[sqlx(try_from = "String")]` when decoding rows.
impl From<String> for Status {
    fn from(value: String) -> Self {
        Status::from_str_lossy(&value)
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `null` is treated like a missing status.
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Status::Ok, Status::from_str_lossy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_string_canonical_forms() {
        assert_eq!(Status::Ok.to_string(), "ok");
        assert_eq!(Status::Fail.to_string(), "fail");
        assert_eq!(Status::Fail.as_str(), STATUS_FAIL);
    }

    #[test]
    fn from_string_known_values() {
        assert_eq!(Status::from_str_lossy("ok"), Status::Ok);
        assert_eq!(Status::from_str_lossy("fail"), Status::Fail);
    }

    #[test]
    fn from_string_unknown_is_ok() {
        assert_eq!(Status::from_str_lossy("garbage"), Status::Ok);
        assert_eq!(Status::from_str_lossy(""), Status::Ok);
        // Case-sensitive: only the exact canonical form fails.
        assert_eq!(Status::from_str_lossy("FAIL"), Status::Ok);
    }

    #[test]
    fn default_is_ok() {
        assert_eq!(Status::default(), Status::Ok);
    }

    #[test]
    fn serde_uses_canonical_strings() {
        assert_eq!(serde_json::to_string(&Status::Fail).unwrap(), "\"fail\"");
        let parsed: Status = serde_json::from_str("\"fail\"").unwrap();
        assert_eq!(parsed, Status::Fail);
    }

    #[test]
    fn deserialize_unknown_string_is_ok() {
        let parsed: Status = serde_json::from_str("\"foo\"").unwrap();
        assert_eq!(parsed, Status::Ok);
    }

    #[test]
    fn deserialize_null_is_ok() {
        let parsed: Status = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, Status::Ok);
    }

    #[test]
    fn owned_string_conversion() {
        assert_eq!(Status::from(String::from("fail")), Status::Fail);
        assert_eq!(Status::from("pass"), Status::Ok);
    }
}
