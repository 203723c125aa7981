use super::catalog::ID_FIELD;
use super::types::FetchRequest;
use crate::types::EntityKind;

/// Caller fields split by the entity they belong to, prefixes stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFields {
    pub primary: Vec<String>,
    pub related: Vec<String>,
}

/// Work out which entity a dotted name targets.
///
/// `adGroup.status` scopes to AdGroup, `campaign.name` to Campaign. A name
/// carrying the primary entity's own prefix is treated as unprefixed, so the
/// same list works for both fetch directions. Anything else (including
/// unknown prefixes) stays with the primary entity untouched.
pub fn scope(field: &str, primary: EntityKind, related: EntityKind) -> (EntityKind, &str) {
    if let Some(name) = strip_scope(field, related) {
        (related, name)
    } else if let Some(name) = strip_scope(field, primary) {
        (primary, name)
    } else {
        (primary, field)
    }
}

fn strip_scope(field: &str, kind: EntityKind) -> Option<&str> {
    field.strip_prefix(kind.prefix())?.strip_prefix('.')
}

/// Split the request's fields between the primary and related entity and
/// inject `id` into both lists.
///
/// With `default_to_all_fields_when_empty`, a request that names no related
/// field projects every related field instead of the related id alone.
pub fn select(
    request: &FetchRequest,
    primary: EntityKind,
    related: EntityKind,
    default_to_all_fields_when_empty: bool,
) -> SelectedFields {
    let mut primary_fields: Vec<String> = vec![];
    let mut related_fields: Vec<String> = vec![];

    for field in &request.fields {
        let (kind, name) = scope(field, primary, related);
        let target = if kind == related { &mut related_fields } else { &mut primary_fields };
        push_unique(target, name);
    }

    if related_fields.is_empty() && default_to_all_fields_when_empty {
        related_fields = related.field_names().into_iter().map(str::to_string).collect();
    }

    push_unique(&mut primary_fields, ID_FIELD);
    push_unique(&mut related_fields, ID_FIELD);

    SelectedFields { primary: primary_fields, related: related_fields }
}

fn push_unique(fields: &mut Vec<String>, name: &str) {
    if !fields.iter().any(|f| f == name) {
        fields.push(name.to_string());
    }
}
