//! Graph-specific error types.

use kk_core::{KkError, RestrictionId, VolumeId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Which end of a restriction an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSide {
    Upstream,
    Downstream,
}

impl std::fmt::Display for EndpointSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointSide::Upstream => write!(f, "upstream"),
            EndpointSide::Downstream => write!(f, "downstream"),
        }
    }
}

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two objects share a name.
    DuplicateName { name: String },

    /// A volume lists a restriction that does not exist.
    UnresolvedReference { from: String, name: String },

    /// No volume connects to this side of the restriction.
    MissingEndpoint {
        restriction: String,
        side: EndpointSide,
    },

    /// More than one volume claims this side of the restriction.
    MultipleEndpoints {
        restriction: String,
        side: EndpointSide,
        first: String,
        second: String,
    },

    /// A restriction starts and ends on the same volume.
    SelfLoop { restriction: String, volume: String },

    /// Adjacency list is inconsistent with the restriction endpoints.
    InconsistentAdjacency {
        restriction: RestrictionId,
        volume: VolumeId,
    },

    /// ID not found in index map.
    IdNotFound { what: &'static str },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateName { name } => {
                write!(f, "Object name '{}' is used more than once", name)
            }
            GraphError::UnresolvedReference { from, name } => {
                write!(f, "'{}' references unknown restriction '{}'", from, name)
            }
            GraphError::MissingEndpoint { restriction, side } => {
                write!(f, "Restriction '{}' has no {} volume", restriction, side)
            }
            GraphError::MultipleEndpoints {
                restriction,
                side,
                first,
                second,
            } => {
                write!(
                    f,
                    "Restriction '{}' has more than one {} volume ('{}' and '{}')",
                    restriction, side, first, second
                )
            }
            GraphError::SelfLoop {
                restriction,
                volume,
            } => {
                write!(
                    f,
                    "Restriction '{}' connects volume '{}' to itself",
                    restriction, volume
                )
            }
            GraphError::InconsistentAdjacency {
                restriction,
                volume,
            } => {
                write!(
                    f,
                    "Restriction {} in volume {}'s adjacency list but doesn't reference that volume",
                    restriction, volume
                )
            }
            GraphError::IdNotFound { what } => {
                write!(f, "{} not found in index map", what)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for KkError {
    fn from(err: GraphError) -> Self {
        KkError::Invariant {
            what: err.to_string(),
        }
    }
}
