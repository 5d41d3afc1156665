//! Core graph data structures.

use kk_core::{RestrictionId, VolumeId};

/// A volume in the network (pressure node).
///
/// Nodes are minimal: they carry no fluid state, just an ID and the
/// declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeNode {
    pub id: VolumeId,
    pub name: String,
}

/// A restriction (flow path) between two volumes.
///
/// Positive flow runs from `upstream` to `downstream`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictionEdge {
    pub id: RestrictionId,
    pub name: String,
    pub upstream: VolumeId,
    pub downstream: VolumeId,
}

/// The graph: a validated, immutable set of volumes and restrictions.
///
/// Adjacency is stored in compressed form: volume i's inbound restrictions
/// are `inbound[inbound_offsets[i]..inbound_offsets[i + 1]]`, sorted by
/// restriction ID for determinism. Outbound lists use the same layout.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) volumes: Vec<VolumeNode>,
    pub(crate) restrictions: Vec<RestrictionEdge>,

    pub(crate) inbound_offsets: Vec<usize>,
    pub(crate) inbound: Vec<RestrictionId>,

    pub(crate) outbound_offsets: Vec<usize>,
    pub(crate) outbound: Vec<RestrictionId>,
}

impl Graph {
    /// Return all volumes in declaration order.
    pub fn volumes(&self) -> &[VolumeNode] {
        &self.volumes
    }

    /// Return all restrictions in declaration order.
    pub fn restrictions(&self) -> &[RestrictionEdge] {
        &self.restrictions
    }

    /// Get a volume by ID (None if out of bounds).
    pub fn volume(&self, id: VolumeId) -> Option<&VolumeNode> {
        self.volumes.get(id.idx())
    }

    /// Get a restriction by ID (None if out of bounds).
    pub fn restriction(&self, id: RestrictionId) -> Option<&RestrictionEdge> {
        self.restrictions.get(id.idx())
    }

    /// Find a volume by its declared name.
    pub fn volume_by_name(&self, name: &str) -> Option<VolumeId> {
        self.volumes.iter().find(|v| v.name == name).map(|v| v.id)
    }

    /// Find a restriction by its declared name.
    pub fn restriction_by_name(&self, name: &str) -> Option<RestrictionId> {
        self.restrictions
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.id)
    }

    /// Restrictions delivering flow into a volume.
    pub fn inbound(&self, volume: VolumeId) -> &[RestrictionId] {
        Self::slice(&self.inbound_offsets, &self.inbound, volume)
    }

    /// Restrictions drawing flow out of a volume.
    pub fn outbound(&self, volume: VolumeId) -> &[RestrictionId] {
        Self::slice(&self.outbound_offsets, &self.outbound, volume)
    }

    /// Upstream volume of a restriction.
    pub fn upstream(&self, restriction: RestrictionId) -> Option<VolumeId> {
        self.restriction(restriction).map(|r| r.upstream)
    }

    /// Downstream volume of a restriction.
    pub fn downstream(&self, restriction: RestrictionId) -> Option<VolumeId> {
        self.restriction(restriction).map(|r| r.downstream)
    }

    fn slice<'a>(
        offsets: &[usize],
        flat: &'a [RestrictionId],
        volume: VolumeId,
    ) -> &'a [RestrictionId] {
        let idx = volume.idx();
        if idx + 1 >= offsets.len() {
            return &[];
        }
        &flat[offsets[idx]..offsets[idx + 1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kk_core::Id;

    fn two_volume_graph() -> Graph {
        Graph {
            volumes: vec![
                VolumeNode {
                    id: Id::from_index(0),
                    name: "A".into(),
                },
                VolumeNode {
                    id: Id::from_index(1),
                    name: "B".into(),
                },
            ],
            restrictions: vec![RestrictionEdge {
                id: Id::from_index(0),
                name: "R".into(),
                upstream: Id::from_index(0),
                downstream: Id::from_index(1),
            }],
            inbound_offsets: vec![0, 0, 1],
            inbound: vec![Id::from_index(0)],
            outbound_offsets: vec![0, 1, 1],
            outbound: vec![Id::from_index(0)],
        }
    }

    #[test]
    fn adjacency_accessors() {
        let graph = two_volume_graph();
        let a = Id::from_index(0);
        let b = Id::from_index(1);
        let r = Id::from_index(0);

        assert!(graph.inbound(a).is_empty());
        assert_eq!(graph.outbound(a), &[r]);
        assert_eq!(graph.inbound(b), &[r]);
        assert_eq!(graph.upstream(r), Some(a));
        assert_eq!(graph.downstream(r), Some(b));
    }

    #[test]
    fn out_of_range_volume_has_no_neighbors() {
        let graph = two_volume_graph();
        assert!(graph.inbound(Id::from_index(7)).is_empty());
        assert!(graph.volume(Id::from_index(7)).is_none());
    }

    #[test]
    fn lookup_by_name() {
        let graph = two_volume_graph();
        assert_eq!(graph.volume_by_name("B"), Some(Id::from_index(1)));
        assert_eq!(graph.restriction_by_name("R"), Some(Id::from_index(0)));
        assert_eq!(graph.volume_by_name("R"), None);
    }
}
