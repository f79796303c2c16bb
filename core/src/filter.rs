//! Client-side exact-match filtering of vehicle lists.
//!
//! Nothing is pushed to the server: the full list is fetched and every
//! constraint is checked against every record, O(n·k).

use serde_json::{Number, Value};

use crate::error::ApiError;
use crate::types::{Vehicle, FIELDS};

/// A conjunction of `field == value` constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    constraints: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint requiring `field` to equal `value`.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constraints.push((field.into(), value.into()));
        self
    }

    fn validate(&self) -> Result<(), ApiError> {
        for (field, _) in &self.constraints {
            if !FIELDS.contains(&field.as_str()) {
                return Err(ApiError::UnknownField(field.clone()));
            }
        }
        Ok(())
    }

    fn matches(&self, vehicle: &Vehicle) -> Result<bool, ApiError> {
        for (field, expected) in &self.constraints {
            if !values_equal(&vehicle.field(field)?, expected) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Keep the vehicles matching every constraint, preserving order.
    ///
    /// Constraints naming fields vehicles don't have are rejected before
    /// `fetch` is called.
    pub fn apply<F>(&self, fetch: F) -> Result<Vec<Vehicle>, ApiError>
    where
        F: FnOnce() -> Result<Vec<Vehicle>, ApiError>,
    {
        self.validate()?;
        let mut kept = Vec::new();
        for vehicle in fetch()? {
            if self.matches(&vehicle)? {
                kept.push(vehicle);
            }
        }
        Ok(kept)
    }
}

impl<K, V> FromIterator<(K, V)> for Filter
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Filter::new(), |filter, (field, value)| filter.where_eq(field, value))
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

/// JSON equality, except that numbers compare by value so `2020` == `2020.0`.
/// Two integers compare exactly; floats only enter when one side is a float.
fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (as_integer(a), as_integer(b)) {
            (Some(a), Some(b)) => a == b,
            _ => a.as_f64() == b.as_f64(),
        },
        _ => actual == expected,
    }
}
