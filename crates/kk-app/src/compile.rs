//! Compilation of a model description into a runnable network.

use kk_components::{
    FlowNetwork, MdotMethod, Orifice, Restriction, StaticVolume, Volume, VoidVolume,
};
use kk_core::units::{k, m2, m3, pa};
use kk_fluids::Species;
use kk_graph::GraphBuilder;
use kk_project::{ModelDef, ResolvedSimOptions, SimObjectDef, SteadyModeDef};
use kk_solver::SteadyMode;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::recorder::RecorderConfig;
use crate::registry::{ObjectEntry, ObjectSlot};

/// Everything a handle needs, built from one model.
#[derive(Debug, Clone)]
pub struct CompiledModel {
    pub network: FlowNetwork,
    /// Declared objects in model order.
    pub objects: Vec<ObjectEntry>,
    pub options: ResolvedSimOptions,
    pub steady_mode: SteadyMode,
    pub recorder: RecorderConfig,
}

const RESERVED_NAME: &str = "sim";

/// Build the graph and element models, then compute every derived
/// quantity for the initial state.
pub fn compile_model(model: &ModelDef) -> AppResult<CompiledModel> {
    kk_project::validate_model(model)?;

    let mut builder = GraphBuilder::new();
    let mut objects = Vec::with_capacity(model.sim_objects.len());
    let mut volumes = Vec::new();
    let mut restrictions = Vec::new();

    for def in &model.sim_objects {
        if def.name() == RESERVED_NAME {
            return Err(AppError::Model(format!(
                "object name '{RESERVED_NAME}' is reserved"
            )));
        }
        let slot = match def {
            SimObjectDef::Static(d) => {
                let id = builder.add_volume(&d.name);
                connect(&mut builder, id, &d.connections_in, &d.connections_out);
                let species = parse_species(&d.name, &d.fluid)?;
                let vol =
                    StaticVolume::new(&d.name, species, pa(d.press), k(d.temp), m3(d.volume))
                        .map_err(|e| model_error(&d.name, e))?;
                volumes.push(Volume::Static(vol));
                ObjectSlot::Static(volumes.len() - 1)
            }
            SimObjectDef::Void(d) => {
                let id = builder.add_volume(&d.name);
                connect(&mut builder, id, &d.connections_in, &d.connections_out);
                let species = parse_species(&d.name, &d.fluid)?;
                let vol = VoidVolume::new(&d.name, species, pa(d.press), k(d.temp))
                    .map_err(|e| model_error(&d.name, e))?;
                volumes.push(Volume::Void(vol));
                ObjectSlot::Void(volumes.len() - 1)
            }
            SimObjectDef::Orifice(d) => {
                builder.add_restriction(&d.name);
                let method: MdotMethod = d
                    .mdot_method
                    .parse()
                    .map_err(|e| model_error(&d.name, e))?;
                restrictions.push(Restriction::Orifice(Orifice::new(&d.name, m2(d.cda), method)));
                ObjectSlot::Orifice(restrictions.len() - 1)
            }
        };
        objects.push(ObjectEntry {
            name: def.name().to_string(),
            slot,
        });
    }

    let graph = builder.build()?;
    let mut network =
        FlowNetwork::new(graph, volumes, restrictions).map_err(|e| model_error("network", e))?;
    network
        .refresh()
        .map_err(|e| model_error("initial state", e))?;

    debug!(
        volumes = network.volumes().len(),
        restrictions = network.restrictions().len(),
        "model compiled"
    );

    let recorder = model
        .recorder_options
        .as_ref()
        .map(|r| RecorderConfig {
            min_dt: r.min_dt,
            pool_window: r.pool_window,
        })
        .unwrap_or_default();
    let options = model.sim_options.resolved();

    Ok(CompiledModel {
        network,
        objects,
        steady_mode: steady_mode(options.steady_mode),
        options,
        recorder,
    })
}

fn connect(
    builder: &mut GraphBuilder,
    volume: kk_core::VolumeId,
    inbound: &[String],
    outbound: &[String],
) {
    for name in inbound {
        builder.connect_in(volume, name);
    }
    for name in outbound {
        builder.connect_out(volume, name);
    }
}

fn parse_species(object: &str, fluid: &str) -> AppResult<Species> {
    fluid.parse().map_err(|e| model_error(object, e))
}

fn steady_mode(def: SteadyModeDef) -> SteadyMode {
    match def {
        SteadyModeDef::Pressure => SteadyMode::Pressure,
        SteadyModeDef::PressureTemperature => SteadyMode::PressureTemperature,
    }
}

fn model_error(object: &str, err: impl std::fmt::Display) -> AppError {
    AppError::Model(format!("{object}: {err}"))
}
