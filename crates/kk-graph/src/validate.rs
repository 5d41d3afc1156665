//! Graph validation logic.

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Check that every adjacency entry points back at the volume that lists it.
pub(crate) fn validate_adjacency(graph: &Graph) -> GraphResult<()> {
    let expected = graph.volumes.len() + 1;
    if graph.inbound_offsets.len() != expected || graph.outbound_offsets.len() != expected {
        return Err(GraphError::IdNotFound {
            what: "adjacency offsets",
        });
    }

    for volume in &graph.volumes {
        for &rid in graph.inbound(volume.id) {
            let edge = graph
                .restriction(rid)
                .ok_or(GraphError::IdNotFound { what: "restriction" })?;
            if edge.downstream != volume.id {
                return Err(GraphError::InconsistentAdjacency {
                    restriction: rid,
                    volume: volume.id,
                });
            }
        }
        for &rid in graph.outbound(volume.id) {
            let edge = graph
                .restriction(rid)
                .ok_or(GraphError::IdNotFound { what: "restriction" })?;
            if edge.upstream != volume.id {
                return Err(GraphError::InconsistentAdjacency {
                    restriction: rid,
                    volume: volume.id,
                });
            }
        }
    }

    let listed = graph.inbound.len() + graph.outbound.len();
    if listed != 2 * graph.restrictions.len() {
        return Err(GraphError::IdNotFound {
            what: "restriction endpoint",
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{RestrictionEdge, VolumeNode};
    use kk_core::Id;

    #[test]
    fn detects_misfiled_restriction() {
        let graph = Graph {
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
            // R filed as inbound to A, which is its upstream end.
            inbound_offsets: vec![0, 1, 1],
            inbound: vec![Id::from_index(0)],
            outbound_offsets: vec![0, 1, 1],
            outbound: vec![Id::from_index(0)],
        };
        assert!(matches!(
            validate_adjacency(&graph),
            Err(GraphError::InconsistentAdjacency { .. })
        ));
    }
}
