use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::field::{Direction, FieldSpec};
use crate::kind::{RequestKind, Tier};

static TABLE: Lazy<FieldMappingTable> = Lazy::new(FieldMappingTable::build);

/// Lookup tables over all [`RequestKind`]s, built once on first access.
///
/// Field specs are grouped by [`Direction`] at construction, so extraction never filters. Type
/// names are indexed per [`Tier`].
#[derive(Debug)]
pub struct FieldMappingTable {
    fields: HashMap<(RequestKind, Direction), Vec<FieldSpec>>,
    operations: HashMap<&'static str, RequestKind>,
    generics: HashMap<&'static str, RequestKind>,
}

impl FieldMappingTable {
    /// Returns the shared table.
    pub fn get() -> &'static Self {
        &TABLE
    }

    fn build() -> Self {
        let mut fields: HashMap<_, Vec<_>> = HashMap::new();
        let mut operations = HashMap::new();
        let mut generics = HashMap::new();

        for &kind in RequestKind::ALL {
            let index = match kind.tier() {
                Tier::Generic => &mut generics,
                Tier::Operation => &mut operations,
            };
            index.insert(kind.type_name(), kind);

            for spec in kind.field_specs() {
                fields
                    .entry((kind, spec.direction()))
                    .or_default()
                    .push(*spec);
            }
        }

        Self {
            fields,
            operations,
            generics,
        }
    }

    /// Returns the field specs of a kind for one direction, in declaration order.
    pub fn fields(&self, kind: RequestKind, direction: Direction) -> &[FieldSpec] {
        self.fields
            .get(&(kind, direction))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Looks up the kind matching a request type name.
    ///
    /// Operation specific kinds take precedence over generic kinds.
    pub fn by_type_name(&self, type_name: &str) -> Option<RequestKind> {
        self.operations
            .get(type_name)
            .or_else(|| self.generics.get(type_name))
            .copied()
    }
}
