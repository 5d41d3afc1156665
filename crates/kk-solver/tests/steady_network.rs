//! Steady solves over small networks.

use kk_components::{
    FlowNetwork, FlowRestriction, MdotMethod, Orifice, PortStates, Restriction, StaticVolume,
    Volume, VoidVolume,
};
use kk_core::units::{k, m2, m3, pa};
use kk_fluids::Species;
use kk_graph::GraphBuilder;
use proptest::prelude::*;
use kk_solver::{SolverError, SteadyConfig, SteadyMode, iterate, jacobian_snapshot, solve};

/// Void -> A -> Tank -> B -> Void.
fn chain(t_inlet: f64, t_tank: f64) -> FlowNetwork {
    chain_from(150_000.0, t_inlet, t_tank)
}

fn chain_from(p_tank: f64, t_inlet: f64, t_tank: f64) -> FlowNetwork {
    let mut b = GraphBuilder::new();
    let inlet = b.add_volume("Inlet");
    b.connect_out(inlet, "A");
    let tank = b.add_volume("Tank");
    b.connect_in(tank, "A");
    b.connect_out(tank, "B");
    let outlet = b.add_volume("Outlet");
    b.connect_in(outlet, "B");
    b.add_restriction("A");
    b.add_restriction("B");
    let graph = b.build().unwrap();

    let volumes = vec![
        Volume::Void(VoidVolume::new("Inlet", Species::N2, pa(300_000.0), k(t_inlet)).unwrap()),
        Volume::Static(
            StaticVolume::new("Tank", Species::N2, pa(p_tank), k(t_tank), m3(2.0)).unwrap(),
        ),
        Volume::Void(VoidVolume::new("Outlet", Species::N2, pa(100_000.0), k(300.0)).unwrap()),
    ];
    let restrictions = vec![
        Restriction::Orifice(Orifice::new("A", m2(1e-3), MdotMethod::IdealCompressible)),
        Restriction::Orifice(Orifice::new("B", m2(1.5e-3), MdotMethod::IdealCompressible)),
    ];
    FlowNetwork::new(graph, volumes, restrictions).unwrap()
}

/// Void -> O1 -> A -> O2 -> B -> O3 -> Void, all orifices the same size.
fn two_tank_chain(p_supply: f64, p_a: f64, p_b: f64) -> FlowNetwork {
    let mut b = GraphBuilder::new();
    let supply = b.add_volume("Supply");
    b.connect_out(supply, "O1");
    let tank_a = b.add_volume("A");
    b.connect_in(tank_a, "O1");
    b.connect_out(tank_a, "O2");
    let tank_b = b.add_volume("B");
    b.connect_in(tank_b, "O2");
    b.connect_out(tank_b, "O3");
    let exhaust = b.add_volume("Exhaust");
    b.connect_in(exhaust, "O3");
    for name in ["O1", "O2", "O3"] {
        b.add_restriction(name);
    }
    let graph = b.build().unwrap();

    let tank = |name: &str, p: f64| {
        Volume::Static(StaticVolume::new(name, Species::N2, pa(p), k(300.0), m3(1.0)).unwrap())
    };
    let volumes = vec![
        Volume::Void(VoidVolume::new("Supply", Species::N2, pa(p_supply), k(300.0)).unwrap()),
        tank("A", p_a),
        tank("B", p_b),
        Volume::Void(VoidVolume::new("Exhaust", Species::N2, pa(100_000.0), k(300.0)).unwrap()),
    ];
    let restrictions = ["O1", "O2", "O3"]
        .map(|name| Restriction::Orifice(Orifice::new(name, m2(1e-3), MdotMethod::IdealCompressible)))
        .to_vec();
    FlowNetwork::new(graph, volumes, restrictions).unwrap()
}

fn static_press(net: &FlowNetwork, index: usize) -> f64 {
    net.volumes()[index].as_static().unwrap().press
}

fn orifice_flows(net: &FlowNetwork) -> Vec<f64> {
    let states = net.volume_states().unwrap();
    net.graph()
        .restrictions()
        .iter()
        .zip(net.restrictions())
        .map(|(edge, r)| {
            r.flow(PortStates {
                upstream: &states[edge.upstream.idx()],
                downstream: &states[edge.downstream.idx()],
            })
            .unwrap()
            .mdot
        })
        .collect()
}

#[test]
fn chain_converges_and_flows_balance() {
    let mut net = chain(300.0, 300.0);
    let config = SteadyConfig::default();
    let solution = solve(&mut net, &config).unwrap();
    assert!(solution.iterations < config.max_iterations);

    let flows = orifice_flows(&net);
    assert!(flows[0] > 0.0);
    assert!((flows[0] - flows[1]).abs() < config.tolerance);

    // Stored orifice outputs agree with the flow law at the converged state.
    for (r, expected) in net.restrictions().iter().zip(&flows) {
        let Restriction::Orifice(o) = r;
        assert!((o.mdot - expected).abs() < config.tolerance);
    }
}

#[test]
fn converged_state_is_a_fixed_point() {
    let mut net = chain(300.0, 300.0);
    let config = SteadyConfig::default();
    solve(&mut net, &config).unwrap();
    let before = net.volumes()[1].as_static().unwrap().press;

    let report = iterate(&mut net, &config, 99).unwrap();
    let after = net.volumes()[1].as_static().unwrap().press;
    assert!(!report.still_iterating);
    assert!((after - before).abs() < config.tolerance);
}

#[test]
fn pressure_temperature_mode_relaxes_temperature() {
    let mut net = chain(350.0, 280.0);
    let config = SteadyConfig {
        mode: SteadyMode::PressureTemperature,
        ..SteadyConfig::default()
    };
    solve(&mut net, &config).unwrap();
    let tank = net.volumes()[1].as_static().unwrap();
    // Isenthalpic throttling of an ideal gas: the tank settles at the inlet temperature.
    assert!((tank.temp - 350.0).abs() < 1e-3);
}

#[test]
fn pressure_mode_keeps_temperature() {
    let mut net = chain(350.0, 280.0);
    solve(&mut net, &SteadyConfig::default()).unwrap();
    assert_eq!(net.volumes()[1].as_static().unwrap().temp, 280.0);
}

#[test]
fn iteration_cap_reports_did_not_converge() {
    let mut net = chain(300.0, 300.0);
    let config = SteadyConfig {
        max_iterations: 1,
        tolerance: 1e-30,
        ..SteadyConfig::default()
    };
    let err = solve(&mut net, &config).unwrap_err();
    assert!(matches!(
        err,
        SolverError::DidNotConverge { iterations: 1, .. }
    ));
}

#[test]
fn jacobian_snapshot_does_not_mutate() {
    let net = chain(300.0, 300.0);
    let before = net.volumes().to_vec();
    let (jac, labels) = jacobian_snapshot(&net, &SteadyConfig::default()).unwrap();
    assert_eq!(labels, vec!["Tank.press [Pa]".to_string()]);
    assert_eq!(jac.shape(), (1, 1));
    // More tank pressure means less inflow and more outflow.
    assert!(jac[(0, 0)] < 0.0);
    assert_eq!(net.volumes(), before.as_slice());
}

#[test]
fn two_tank_chain_converges() {
    let mut net = two_tank_chain(300_000.0, 250_000.0, 150_000.0);
    let config = SteadyConfig::default();
    let (jac, labels) = jacobian_snapshot(&net, &config).unwrap();
    assert_eq!(labels, ["A.press [Pa]", "B.press [Pa]"]);
    assert_eq!(jac.shape(), (2, 2));

    let solution = solve(&mut net, &config).unwrap();
    assert!(solution.iterations < config.max_iterations);

    let (p_a, p_b) = (static_press(&net, 1), static_press(&net, 2));
    assert!(300_000.0 > p_a && p_a > p_b && p_b > 100_000.0);

    let flows = orifice_flows(&net);
    assert!(flows[0] > 0.0);
    assert!((flows[0] - flows[1]).abs() < config.tolerance);
    assert!((flows[1] - flows[2]).abs() < config.tolerance);
    for (r, expected) in net.restrictions().iter().zip(&flows) {
        let Restriction::Orifice(o) = r;
        assert!((o.mdot - expected).abs() < config.tolerance);
    }
}

#[test]
fn choked_interior_orifice_gives_singular_jacobian() {
    // O1 is choked forward and O2 choked in reverse, so no residual
    // depends on the pressure in A.
    let mut net = two_tank_chain(500_000.0, 110_000.0, 400_000.0);
    let config = SteadyConfig::default();
    let (jac, _) = jacobian_snapshot(&net, &config).unwrap();
    assert_eq!(jac[(0, 0)], 0.0);
    assert_eq!(jac[(1, 0)], 0.0);

    let before = net.volumes().to_vec();
    let err = solve(&mut net, &config).unwrap_err();
    assert!(matches!(err, SolverError::SingularJacobian { .. }));
    assert_eq!(net.volumes(), before.as_slice());
    assert_eq!(static_press(&net, 1), 110_000.0);
    assert_eq!(static_press(&net, 2), 400_000.0);
}

#[test]
fn voids_only_network_is_already_steady() {
    let mut b = GraphBuilder::new();
    let hi = b.add_volume("Hi");
    let lo = b.add_volume("Lo");
    let r = b.add_restriction("R");
    b.connect(r, hi, lo);
    let graph = b.build().unwrap();
    let volumes = vec![
        Volume::Void(VoidVolume::new("Hi", Species::Air, pa(200_000.0), k(300.0)).unwrap()),
        Volume::Void(VoidVolume::new("Lo", Species::Air, pa(100_000.0), k(300.0)).unwrap()),
    ];
    let restrictions = vec![Restriction::Orifice(Orifice::new(
        "R",
        m2(1e-4),
        MdotMethod::IdealCompressible,
    ))];
    let mut net = FlowNetwork::new(graph, volumes, restrictions).unwrap();

    let report = iterate(&mut net, &SteadyConfig::default(), 0).unwrap();
    assert!(!report.still_iterating);
    let Restriction::Orifice(o) = &net.restrictions()[0];
    assert!(o.mdot > 0.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn converges_from_any_interior_guess(p_tank in 110_000.0f64..290_000.0) {
        let mut net = chain_from(p_tank, 300.0, 300.0);
        let config = SteadyConfig::default();
        let solution = solve(&mut net, &config).unwrap();
        prop_assert!(solution.iterations < config.max_iterations);
        let flows = orifice_flows(&net);
        prop_assert!((flows[0] - flows[1]).abs() < config.tolerance);
    }
}
