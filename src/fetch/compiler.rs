use super::condition::Condition;
use super::error::FetchError;
use super::selector::scope;
use super::types::{FilterOperator, QueryFilter};
use crate::types::EntityKind;

/// Compile the filters scoped to `target` into one condition.
///
/// Scoping follows the field selector: `adGroup.status` targets AdGroup,
/// unprefixed names target `primary`. Every filter's operator is checked
/// first, whatever its scope, so an unsupported operator fails the whole
/// fetch. Separate filters are AND-ed, including filters on the same field.
/// Filters on unknown fields contribute nothing.
pub fn compile(
    filters: &[QueryFilter],
    target: EntityKind,
    primary: EntityKind,
) -> Result<Option<Condition>, FetchError> {
    validate_operators(filters)?;

    let related = primary.other();
    let mut compiled = Vec::new();
    for filter in filters {
        let (kind, name) = scope(&filter.field, primary, related);
        if kind != target {
            continue;
        }
        if let Some(condition) = compile_filter(filter, kind, name) {
            compiled.push(condition);
        }
    }

    Ok(Condition::all(compiled))
}

/// Compile both halves of a fetch: `(primary condition, related condition)`
pub fn compile_scoped(
    filters: &[QueryFilter],
    primary: EntityKind,
) -> Result<(Option<Condition>, Option<Condition>), FetchError> {
    let primary_condition = compile(filters, primary, primary)?;
    let related_condition = compile(filters, primary.other(), primary)?;
    Ok((primary_condition, related_condition))
}

fn validate_operators(filters: &[QueryFilter]) -> Result<(), FetchError> {
    for filter in filters {
        if let FilterOperator::Unsupported(op) = &filter.operator {
            return Err(FetchError::UnsupportedOperator(op.clone()));
        }
    }
    Ok(())
}

fn compile_filter(filter: &QueryFilter, kind: EntityKind, name: &str) -> Option<Condition> {
    let Some(column) = kind.column_for(name) else {
        tracing::debug!("Dropping filter on unknown field '{}' for {:?}", filter.field, kind);
        return None;
    };

    match filter.operator {
        // no values matches nothing, same as an empty IN
        FilterOperator::Equals => Condition::any(
            filter
                .values
                .iter()
                .map(|value| Condition::equals_ignore_case(column, value.as_str()))
                .collect(),
        )
        .or_else(|| Some(Condition::is_in(column, vec![]))),
        FilterOperator::In => Some(Condition::is_in(column, filter.values.clone())),
        // rejected by validate_operators
        FilterOperator::Unsupported(_) => None,
    }
}
