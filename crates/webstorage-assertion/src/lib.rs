//! Pluggable value assertions for remote getters.
//!
//! Keeps comparison semantics out of the storage proxy so any getter that
//! produces a JSON value can route through the same verifier: pass the
//! actual value, an optional operator, and the expected value, and get the
//! actual value back on success or a descriptive error on mismatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Closed set of comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    /// Substring match for strings, element match for arrays.
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

impl AssertionOperator {
    /// Symbolic form used in failure messages.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Contains => "*=",
            Self::NotContains => "not contains",
            Self::StartsWith => "^=",
            Self::EndsWith => "$=",
        }
    }
}

impl std::fmt::Display for AssertionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::str::FromStr for AssertionOperator {
    type Err = AssertionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" | "equal" | "equals" | "should be" => Ok(Self::Equal),
            "!=" | "inequal" | "should not be" => Ok(Self::NotEqual),
            "<" | "less than" => Ok(Self::LessThan),
            "<=" => Ok(Self::LessThanOrEqual),
            ">" | "greater than" => Ok(Self::GreaterThan),
            ">=" => Ok(Self::GreaterThanOrEqual),
            "*=" | "contains" => Ok(Self::Contains),
            "not contains" => Ok(Self::NotContains),
            "^=" | "should start with" => Ok(Self::StartsWith),
            "$=" | "should end with" => Ok(Self::EndsWith),
            other => Err(AssertionError::UnknownOperator(other.to_owned())),
        }
    }
}

/// Assertion error.
#[derive(Debug, Error)]
pub enum AssertionError {
    #[error("{context}`{actual}` {operator} `{expected}` should have passed")]
    Failed {
        context: String,
        actual: Value,
        operator: AssertionOperator,
        expected: Value,
    },
    #[error("{context}cannot apply {operator} to `{actual}` and `{expected}`")]
    Incomparable {
        context: String,
        actual: Value,
        operator: AssertionOperator,
        expected: Value,
    },
    #[error("unknown assertion operator: {0}")]
    UnknownOperator(String),
}

/// Verify `actual` against `expected` under `operator`.
///
/// With no operator the actual value passes through unchanged, whatever
/// its type. `context` is a label (e.g. `"localStorage "`) prefixed to
/// failure messages so the caller can tell which getter failed.
///
/// # Errors
/// Returns [`AssertionError::Failed`] on mismatch and
/// [`AssertionError::Incomparable`] when the operator does not apply to
/// the operand types.
pub fn verify_value(
    actual: Value,
    operator: Option<AssertionOperator>,
    expected: Option<Value>,
    context: &str,
) -> Result<Value, AssertionError> {
    let Some(operator) = operator else {
        return Ok(actual);
    };
    let expected = expected.unwrap_or(Value::Null);

    let outcome = match operator {
        AssertionOperator::Equal => Some(actual == expected),
        AssertionOperator::NotEqual => Some(actual != expected),
        AssertionOperator::LessThan
        | AssertionOperator::LessThanOrEqual
        | AssertionOperator::GreaterThan
        | AssertionOperator::GreaterThanOrEqual => {
            compare_order(&actual, &expected).map(|ord| match operator {
                AssertionOperator::LessThan => ord.is_lt(),
                AssertionOperator::LessThanOrEqual => ord.is_le(),
                AssertionOperator::GreaterThan => ord.is_gt(),
                _ => ord.is_ge(),
            })
        }
        AssertionOperator::Contains => contains(&actual, &expected),
        AssertionOperator::NotContains => contains(&actual, &expected).map(|c| !c),
        AssertionOperator::StartsWith => match (&actual, &expected) {
            (Value::String(a), Value::String(e)) => Some(a.starts_with(e.as_str())),
            _ => None,
        },
        AssertionOperator::EndsWith => match (&actual, &expected) {
            (Value::String(a), Value::String(e)) => Some(a.ends_with(e.as_str())),
            _ => None,
        },
    };

    match outcome {
        Some(true) => Ok(actual),
        Some(false) => Err(AssertionError::Failed {
            context: context.to_owned(),
            actual,
            operator,
            expected,
        }),
        None => Err(AssertionError::Incomparable {
            context: context.to_owned(),
            actual,
            operator,
            expected,
        }),
    }
}

fn compare_order(actual: &Value, expected: &Value) -> Option<std::cmp::Ordering> {
    match (actual, expected) {
        (Value::Number(a), Value::Number(e)) => a.as_f64()?.partial_cmp(&e.as_f64()?),
        (Value::String(a), Value::String(e)) => Some(a.cmp(e)),
        _ => None,
    }
}

fn contains(actual: &Value, expected: &Value) -> Option<bool> {
    match (actual, expected) {
        (Value::String(a), Value::String(e)) => Some(a.contains(e.as_str())),
        (Value::Array(items), e) => Some(items.contains(e)),
        _ => None,
    }
}
