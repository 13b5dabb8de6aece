//! Symbol resolution at identifier occurrences.
//!
//! The engine never performs name resolution itself; it asks a
//! [`ResolveSymbol`] collaborator whether a given identifier occurrence
//! refers to a tracked exported entity. Occurrences that resolve are
//! rewritten to the entity's canonical emission name; everything else is
//! left as original text.

use std::collections::HashMap;

use veneer_core::entity::EntityId;
use veneer_core::model::Resolution;
use veneer_core::syntax::NodeId;

/// Maps an identifier occurrence to the tracked entity it refers to.
pub trait ResolveSymbol {
    /// The entity referenced by the identifier at `occurrence`, or `None`
    /// when the identifier is not tracked.
    fn resolve(&self, occurrence: NodeId) -> Option<EntityId>;
}

/// A [`ResolveSymbol`] backed by a precomputed occurrence table, as
/// supplied in a surface model.
#[derive(Debug, Default)]
pub struct ResolutionTable {
    entries: HashMap<NodeId, EntityId>,
}

impl ResolutionTable {
    pub fn from_resolutions(resolutions: &[Resolution]) -> Self {
        Self {
            entries: resolutions
                .iter()
                .map(|resolution| (resolution.node, resolution.entity))
                .collect(),
        }
    }
}

impl ResolveSymbol for ResolutionTable {
    fn resolve(&self, occurrence: NodeId) -> Option<EntityId> {
        self.entries.get(&occurrence).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_table_lookup() {
        let table = ResolutionTable::from_resolutions(&[
            Resolution {
                node: NodeId(5),
                entity: EntityId(0),
            },
            Resolution {
                node: NodeId(9),
                entity: EntityId(1),
            },
        ]);

        assert_eq!(table.resolve(NodeId(5)), Some(EntityId(0)));
        assert_eq!(table.resolve(NodeId(9)), Some(EntityId(1)));
        assert_eq!(table.resolve(NodeId(6)), None);
    }
}
