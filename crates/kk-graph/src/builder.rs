//! Incremental, name-resolving graph builder.

use std::collections::{HashMap, HashSet};
use kk_core::{Id, RestrictionId, VolumeId};

use crate::error::{EndpointSide, GraphError, GraphResult};
use crate::graph::{Graph, RestrictionEdge, VolumeNode};
use crate::validate;

#[derive(Debug, Clone)]
enum Target {
    Id(RestrictionId),
    Name(String),
}

#[derive(Debug, Clone)]
struct Link {
    volume: VolumeId,
    target: Target,
    side: EndpointSide,
}

/// Builder for constructing a graph incrementally.
///
/// Volumes declare which restrictions they feed (`connect_out`) and which
/// feed them (`connect_in`). Restriction names are resolved in `build()`,
/// so declarations may appear in any order.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    volumes: Vec<String>,
    restrictions: Vec<String>,
    links: Vec<Link>,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a volume and return its ID.
    pub fn add_volume(&mut self, name: impl Into<String>) -> VolumeId {
        let id = Id::from_index(self.volumes.len() as u32);
        self.volumes.push(name.into());
        id
    }

    /// Add a restriction and return its ID. Endpoints are attached later.
    pub fn add_restriction(&mut self, name: impl Into<String>) -> RestrictionId {
        let id = Id::from_index(self.restrictions.len() as u32);
        self.restrictions.push(name.into());
        id
    }

    /// Declare that `volume` is fed by the named restriction (its downstream end).
    pub fn connect_in(&mut self, volume: VolumeId, restriction: impl Into<String>) {
        self.links.push(Link {
            volume,
            target: Target::Name(restriction.into()),
            side: EndpointSide::Downstream,
        });
    }

    /// Declare that `volume` feeds the named restriction (its upstream end).
    pub fn connect_out(&mut self, volume: VolumeId, restriction: impl Into<String>) {
        self.links.push(Link {
            volume,
            target: Target::Name(restriction.into()),
            side: EndpointSide::Upstream,
        });
    }

    /// Attach both endpoints of a restriction by ID.
    pub fn connect(&mut self, restriction: RestrictionId, upstream: VolumeId, downstream: VolumeId) {
        self.links.push(Link {
            volume: upstream,
            target: Target::Id(restriction),
            side: EndpointSide::Upstream,
        });
        self.links.push(Link {
            volume: downstream,
            target: Target::Id(restriction),
            side: EndpointSide::Downstream,
        });
    }

    /// Resolve references, validate, and freeze into an immutable `Graph`.
    pub fn build(self) -> GraphResult<Graph> {
        let mut seen = HashSet::new();
        for name in self.volumes.iter().chain(self.restrictions.iter()) {
            if !seen.insert(name.as_str()) {
                return Err(GraphError::DuplicateName { name: name.clone() });
            }
        }

        let by_name: HashMap<&str, RestrictionId> = self
            .restrictions
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), Id::from_index(i as u32)))
            .collect();

        let mut upstream: Vec<Option<VolumeId>> = vec![None; self.restrictions.len()];
        let mut downstream: Vec<Option<VolumeId>> = vec![None; self.restrictions.len()];

        for link in &self.links {
            let volume_name = self
                .volumes
                .get(link.volume.idx())
                .ok_or(GraphError::IdNotFound { what: "volume" })?;

            let rid = match &link.target {
                Target::Id(id) => *id,
                Target::Name(name) => *by_name.get(name.as_str()).ok_or_else(|| {
                    GraphError::UnresolvedReference {
                        from: volume_name.clone(),
                        name: name.clone(),
                    }
                })?,
            };
            let restriction_name = self
                .restrictions
                .get(rid.idx())
                .ok_or(GraphError::IdNotFound {
                    what: "restriction",
                })?;

            let slot = match link.side {
                EndpointSide::Upstream => &mut upstream[rid.idx()],
                EndpointSide::Downstream => &mut downstream[rid.idx()],
            };
            match *slot {
                None => *slot = Some(link.volume),
                Some(existing) if existing == link.volume => {}
                Some(existing) => {
                    return Err(GraphError::MultipleEndpoints {
                        restriction: restriction_name.clone(),
                        side: link.side,
                        first: self.volumes[existing.idx()].clone(),
                        second: volume_name.clone(),
                    });
                }
            }
        }

        let mut restrictions = Vec::with_capacity(self.restrictions.len());
        for (i, name) in self.restrictions.iter().enumerate() {
            let missing = |side| GraphError::MissingEndpoint {
                restriction: name.clone(),
                side,
            };
            let up = upstream[i].ok_or_else(|| missing(EndpointSide::Upstream))?;
            let down = downstream[i].ok_or_else(|| missing(EndpointSide::Downstream))?;
            if up == down {
                return Err(GraphError::SelfLoop {
                    restriction: name.clone(),
                    volume: self.volumes[up.idx()].clone(),
                });
            }
            restrictions.push(RestrictionEdge {
                id: Id::from_index(i as u32),
                name: name.clone(),
                upstream: up,
                downstream: down,
            });
        }

        let volumes: Vec<VolumeNode> = self
            .volumes
            .into_iter()
            .enumerate()
            .map(|(i, name)| VolumeNode {
                id: Id::from_index(i as u32),
                name,
            })
            .collect();

        let (inbound_offsets, inbound) =
            Self::build_adjacency(volumes.len(), &restrictions, |r| r.downstream);
        let (outbound_offsets, outbound) =
            Self::build_adjacency(volumes.len(), &restrictions, |r| r.upstream);

        let graph = Graph {
            volumes,
            restrictions,
            inbound_offsets,
            inbound,
            outbound_offsets,
            outbound,
        };
        validate::validate_adjacency(&graph)?;
        Ok(graph)
    }

    /// Build compact adjacency lists keyed by the volume `endpoint` selects.
    fn build_adjacency(
        volume_count: usize,
        restrictions: &[RestrictionEdge],
        endpoint: impl Fn(&RestrictionEdge) -> VolumeId,
    ) -> (Vec<usize>, Vec<RestrictionId>) {
        let mut per_volume: Vec<Vec<RestrictionId>> = vec![Vec::new(); volume_count];
        for r in restrictions {
            if let Some(list) = per_volume.get_mut(endpoint(r).idx()) {
                list.push(r.id);
            }
        }

        let mut offsets = Vec::with_capacity(volume_count + 1);
        let mut flat = Vec::with_capacity(restrictions.len());
        offsets.push(0);
        for mut list in per_volume {
            list.sort_by_key(|r| r.index());
            flat.extend_from_slice(&list);
            offsets.push(flat.len());
        }
        (offsets, flat)
    }
}
