//! Dense indexing of volume subsets.
//!
//! Integrators and solvers keep state only for some volumes (Static ones).
//! `IndexMap` maps those volumes to contiguous indices 0..N and back.

use kk_core::VolumeId;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Bidirectional map between selected volume IDs and dense indices.
#[derive(Debug, Clone)]
pub struct IndexMap {
    /// Dense index -> VolumeId.
    volume_ids: Vec<VolumeId>,

    /// VolumeId.index -> dense index (None if the volume was not selected).
    volume_to_idx: Vec<Option<usize>>,
}

impl IndexMap {
    /// Index the volumes for which `select` returns true, in graph order.
    pub fn from_volumes(graph: &Graph, mut select: impl FnMut(VolumeId) -> bool) -> Self {
        let volume_ids: Vec<VolumeId> = graph
            .volumes()
            .iter()
            .map(|v| v.id)
            .filter(|&id| select(id))
            .collect();

        let mut volume_to_idx = vec![None; graph.volumes().len()];
        for (i, id) in volume_ids.iter().enumerate() {
            if let Some(slot) = volume_to_idx.get_mut(id.idx()) {
                *slot = Some(i);
            }
        }

        Self {
            volume_ids,
            volume_to_idx,
        }
    }

    /// Index every volume in the graph.
    pub fn all_volumes(graph: &Graph) -> Self {
        Self::from_volumes(graph, |_| true)
    }

    pub fn len(&self) -> usize {
        self.volume_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volume_ids.is_empty()
    }

    /// VolumeId at a dense index.
    pub fn volume_id(&self, idx: usize) -> GraphResult<VolumeId> {
        self.volume_ids
            .get(idx)
            .copied()
            .ok_or(GraphError::IdNotFound { what: "dense index" })
    }

    /// Dense index of a volume, or None if it is not part of this map.
    pub fn index_of(&self, id: VolumeId) -> Option<usize> {
        self.volume_to_idx.get(id.idx()).copied().flatten()
    }

    /// Selected volume IDs in dense order.
    pub fn volume_ids(&self) -> &[VolumeId] {
        &self.volume_ids
    }
}
