use std::collections::BTreeMap;

use super::catalog::{value_i64, Entity, FieldDescriptor};
use super::executor::RawRow;
use super::types::Grouped;

/// Fold the raw join rows into primary objects with their related objects.
///
/// Rows are grouped by primary identity; groups come out in ascending
/// identity order and are cut at `limit`. The primary object is built from
/// the first row of its group. A row whose related identity is null (the
/// unmatched side of a LEFT JOIN) yields no related object unless
/// `keep_rows_without_related` is set.
pub fn assemble<P: Entity, R: Entity>(
    rows: &[RawRow],
    primary_fields: &[&'static FieldDescriptor<P>],
    related_fields: &[&'static FieldDescriptor<R>],
    limit: usize,
    keep_rows_without_related: bool,
) -> Vec<Grouped<P, R>> {
    let primary_id = P::KIND.id_column();
    let related_id = R::KIND.id_column();

    let mut groups: BTreeMap<i64, Grouped<P, R>> = BTreeMap::new();
    for row in rows {
        let Some(id) = value_i64(row.get(&primary_id)) else {
            tracing::warn!("Skipping joined row without a {:?} id", P::KIND);
            continue;
        };

        let group = groups.entry(id).or_insert_with(|| Grouped {
            primary: build(row, primary_fields),
            related: vec![],
        });

        if row.get(&related_id).is_null() && !keep_rows_without_related {
            continue;
        }
        group.related.push(build(row, related_fields));
    }

    groups.into_values().take(limit).collect()
}

fn build<E: Entity>(row: &RawRow, fields: &[&'static FieldDescriptor<E>]) -> E {
    fields
        .iter()
        .fold(E::default(), |entity, field| (field.apply)(entity, row.get(&field.column)))
}
