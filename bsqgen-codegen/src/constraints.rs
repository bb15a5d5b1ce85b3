//! Constraint synthesis from refinement facets.

use crate::error::ResolveError;
use crate::path::AccessPath;
use bsqgen_schema::RefinementFacets;
use std::fmt::Display;

/// Synthesizes the constraints implied by `facets`, anchored at `path`.
///
/// Constraints are returned in a fixed order: pattern, known values, length,
/// item count, value bounds.
///
/// # Errors
/// Returns `ResolveError::UnsupportedConstraintFacet` if the known-values
/// facet is present.
pub fn synthesize(
    facets: &RefinementFacets,
    path: &AccessPath,
) -> Result<Vec<String>, ResolveError> {
    let mut constraints = Vec::new();

    if let Some(pattern) = &facets.pattern {
        constraints.push(format!("/{pattern}/.accepts({path})"));
    }

    if facets.known_values.is_some() {
        return Err(ResolveError::UnsupportedConstraintFacet {
            facet: "knownValues".to_string(),
            path: path.to_string(),
        });
    }

    if facets.min_length.is_some() || facets.max_length.is_some() {
        constraints.push(format!(
            "{path}.length() in [{}, {}]",
            open_bound(facets.min_length),
            open_bound(facets.max_length)
        ));
    }

    if let Some(c) = bounds(&format!("{path}.size()"), facets.min_items, facets.max_items) {
        constraints.push(c);
    }

    let (min_value, max_value) = (facets.min_value.as_ref(), facets.max_value.as_ref());
    if let Some(c) = bounds(path.as_str(), min_value, max_value) {
        constraints.push(c);
    }

    Ok(constraints)
}

fn open_bound(bound: Option<u64>) -> String {
    bound.map(|b| b.to_string()).unwrap_or_default()
}

/// Renders a one- or two-sided comparison of `subject`.
fn bounds<T: Display>(subject: &str, min: Option<T>, max: Option<T>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!("{min} <= {subject} <= {max}")),
        (Some(min), None) => Some(format!("{subject} >= {min}")),
        (None, Some(max)) => Some(format!("{subject} <= {max}")),
        (None, None) => None,
    }
}

/// Joins constraints into one boolean expression.
#[must_use]
pub fn conjoin(constraints: &[String]) -> String {
    match constraints {
        [] => "true".to_string(),
        [single] => single.clone(),
        many => many
            .iter()
            .map(|c| format!("({c})"))
            .collect::<Vec<_>>()
            .join(" && "),
    }
}
