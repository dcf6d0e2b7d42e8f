//! Named parameter values and the parameter domain of a model.

use std::collections::BTreeMap;

use crate::LoadError;

/// A set of named real parameter values, e.g. one point of parameter space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RbParameters {
    values: BTreeMap<String, f64>,
}

impl RbParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn n_parameters(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RbParameters {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut params = RbParameters::new();
        for (name, value) in iter {
            params.set_value(name, value);
        }
        params
    }
}

/// The parameter domain a model was trained on: continuous ranges plus the
/// allowed values of discrete parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterConfig {
    min: RbParameters,
    max: RbParameters,
    discrete: BTreeMap<String, Vec<f64>>,
}

impl ParameterConfig {
    /// Builds a parameter domain. Both bounds must name the same parameters
    /// and every minimum must not exceed its maximum.
    pub fn new(
        min: RbParameters,
        max: RbParameters,
        discrete: BTreeMap<String, Vec<f64>>,
    ) -> Result<Self, LoadError> {
        if min.n_parameters() != max.n_parameters() {
            return Err(LoadError::Parameter(format!(
                "{} minimum values but {} maximum values",
                min.n_parameters(),
                max.n_parameters()
            )));
        }
        for (name, lo) in min.iter() {
            let hi = max.value(name).ok_or_else(|| {
                LoadError::Parameter(format!("parameter `{name}` has no maximum value"))
            })?;
            if lo > hi {
                return Err(LoadError::Parameter(format!(
                    "minimum value {lo} of parameter `{name}` exceeds its maximum {hi}"
                )));
            }
        }
        Ok(Self { min, max, discrete })
    }

    pub fn min(&self) -> &RbParameters {
        &self.min
    }

    pub fn max(&self) -> &RbParameters {
        &self.max
    }

    /// Number of continuous parameters.
    pub fn n_parameters(&self) -> usize {
        self.min.n_parameters()
    }

    pub fn discrete_values(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.discrete
    }

    pub fn is_discrete(&self, name: &str) -> bool {
        self.discrete.contains_key(name)
    }
}
