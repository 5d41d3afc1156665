//! kk-graph: network topology for kinetic-kebab.
//!
//! Provides:
//! - Core graph data structures (volumes as nodes, restrictions as edges)
//! - Name-based graph builder with reference resolution and validation
//! - Dense indexing of volume subsets for solver/integrator state vectors
//!
//! # Example
//!
//! ```
//! use kk_graph::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new();
//! let tank = builder.add_volume("Tank");
//! let atm = builder.add_volume("Atmosphere");
//! let orifice = builder.add_restriction("Orifice");
//! builder.connect(orifice, tank, atm);
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.volumes().len(), 2);
//! assert_eq!(graph.upstream(orifice), Some(tank));
//! assert_eq!(graph.inbound(atm), &[orifice]);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod indexing;
pub(crate) mod validate;

pub use builder::GraphBuilder;
pub use error::{EndpointSide, GraphError, GraphResult};
pub use graph::{Graph, RestrictionEdge, VolumeNode};
pub use indexing::IndexMap;
