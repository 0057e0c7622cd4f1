//! Score functions of a function score query.

use serde_json::Value;

use crate::connection::Connection;
use crate::error::{DevToolsError, Result};
use crate::query::function_score::{
    DecayKind, DecayParams, FieldValueModifier, FilteredFunction, ScoreFunction,
};
use crate::query::script::Script;
use crate::search::builder::SearchBuilder;

/// Collects the score functions of a function score query.
///
/// [`filter`](Self::filter) and [`with_weight`](Self::with_weight) apply to
/// the function added last.
pub struct FunctionScoreBuilder<'c> {
    connection: &'c dyn Connection,
    functions: Vec<FilteredFunction>,
}

fn require_finite(what: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(DevToolsError::invalid_argument(format!(
            "{what} must be finite, got {value}"
        )));
    }
    Ok(())
}

fn validate(function: &ScoreFunction) -> Result<()> {
    match function {
        ScoreFunction::FieldValueFactor { field, factor, .. } => {
            if field.trim().is_empty() {
                return Err(DevToolsError::invalid_argument(
                    "field_value_factor needs a field",
                ));
            }
            if let Some(factor) = factor {
                require_finite("factor", *factor)?;
            }
        }
        ScoreFunction::Weight(weight) => require_finite("weight", *weight)?,
        ScoreFunction::RandomScore { .. } => {}
        ScoreFunction::ScriptScore(script) => {
            if script.is_blank() {
                return Err(DevToolsError::invalid_argument(
                    "script_score needs a script source",
                ));
            }
        }
        ScoreFunction::Decay { kind, field, .. } => {
            if field.trim().is_empty() {
                return Err(DevToolsError::invalid_argument(format!(
                    "{} decay needs a field",
                    kind.as_str()
                )));
            }
        }
    }
    Ok(())
}

impl<'c> FunctionScoreBuilder<'c> {
    pub(crate) fn new(connection: &'c dyn Connection) -> Self {
        FunctionScoreBuilder {
            connection,
            functions: Vec::new(),
        }
    }

    /// Add a score function.
    pub fn add(&mut self, function: ScoreFunction) -> Result<&mut Self> {
        validate(&function)?;
        self.functions.push(FilteredFunction::new(function));
        Ok(self)
    }

    /// Multiply the score by `factor` times the modified value of `field`.
    pub fn field_value_factor<F: Into<String>>(
        &mut self,
        field: F,
        factor: f64,
        modifier: FieldValueModifier,
    ) -> Result<&mut Self> {
        self.add(ScoreFunction::FieldValueFactor {
            field: field.into(),
            factor: Some(factor),
            modifier: Some(modifier),
            missing: None,
        })
    }

    /// Constant score.
    pub fn weight(&mut self, weight: f64) -> Result<&mut Self> {
        self.add(ScoreFunction::Weight(weight))
    }

    /// Random score, different on every request.
    pub fn random_score(&mut self) -> Result<&mut Self> {
        self.add(ScoreFunction::RandomScore {
            seed: None,
            field: None,
        })
    }

    /// Reproducible random score derived from `seed` and the values of `field`.
    pub fn random_score_with<V: Into<Value>, F: Into<String>>(
        &mut self,
        seed: V,
        field: F,
    ) -> Result<&mut Self> {
        self.add(ScoreFunction::RandomScore {
            seed: Some(seed.into()),
            field: Some(field.into()),
        })
    }

    /// Score computed by a script.
    pub fn script_score<S: Into<Script>>(&mut self, script: S) -> Result<&mut Self> {
        self.add(ScoreFunction::ScriptScore(script.into()))
    }

    /// Score decaying with the distance of `field` from the origin.
    pub fn decay<F: Into<String>>(
        &mut self,
        kind: DecayKind,
        field: F,
        params: DecayParams,
    ) -> Result<&mut Self> {
        self.add(ScoreFunction::Decay {
            kind,
            field: field.into(),
            params,
        })
    }

    fn last_function(&mut self, what: &str) -> Result<&mut FilteredFunction> {
        self.functions.last_mut().ok_or_else(|| {
            DevToolsError::invalid_argument(format!("{what} needs a score function to apply to"))
        })
    }

    /// Restrict the last function to the documents matched by the clauses `build` collects.
    pub fn filter<F>(&mut self, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut SearchBuilder<'c>) -> Result<()>,
    {
        self.last_function("filter")?;

        let mut inner = SearchBuilder::new(self.connection);
        build(&mut inner)?;
        let filter = inner.into_document().into_query();

        self.last_function("filter")?.filter = Some(filter);
        Ok(self)
    }

    /// Weight the last function.
    ///
    /// A `weight` function already is a weight; set its value through
    /// [`weight`](Self::weight) instead.
    pub fn with_weight(&mut self, weight: f64) -> Result<&mut Self> {
        require_finite("weight", weight)?;
        let last = self.last_function("weight")?;
        if matches!(last.function, ScoreFunction::Weight(_)) {
            return Err(DevToolsError::invalid_argument(
                "a weight function cannot carry a second weight",
            ));
        }
        last.weight = Some(weight);
        Ok(self)
    }

    /// Functions added so far.
    pub fn functions(&self) -> &[FilteredFunction] {
        &self.functions
    }

    pub(crate) fn into_functions(self) -> Vec<FilteredFunction> {
        self.functions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::StaticConnection;
    use serde_json::json;

    #[test]
    fn test_filter_needs_function() {
        let connection = StaticConnection::default();
        let mut builder = FunctionScoreBuilder::new(&connection);

        assert!(matches!(
            builder.filter(|_| Ok(())),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert!(builder.with_weight(2.0).is_err());
    }

    #[test]
    fn test_filter_and_weight_apply_to_last_function() -> Result<()> {
        let connection = StaticConnection::default();
        let mut builder = FunctionScoreBuilder::new(&connection);

        builder.weight(1.0)?;
        builder.field_value_factor("likes", 1.2, FieldValueModifier::Log1p)?;
        builder.filter(|q| {
            q.term("status", "published")?;
            Ok(())
        })?;
        builder.with_weight(3.0)?;

        let functions = builder.functions();
        assert!(functions[0].filter.is_none());
        assert_eq!(functions[1].weight, Some(3.0));
        assert_eq!(
            functions[1].to_value(),
            json!({
                "field_value_factor": {"field": "likes", "factor": 1.2, "modifier": "log1p"},
                "filter": {"term": {"status": "published"}},
                "weight": 3.0
            })
        );
        Ok(())
    }

    #[test]
    fn test_weight_function_rejects_extra_weight() -> Result<()> {
        let connection = StaticConnection::default();
        let mut builder = FunctionScoreBuilder::new(&connection);

        builder.weight(1.0)?;
        assert!(matches!(
            builder.with_weight(3.0),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert_eq!(builder.functions()[0].to_value(), json!({"weight": 1.0}));
        Ok(())
    }

    #[test]
    fn test_blank_script_rejected() {
        let connection = StaticConnection::default();
        let mut builder = FunctionScoreBuilder::new(&connection);
        assert!(builder.script_score(" ").is_err());
        assert!(builder.functions().is_empty());
    }
}
