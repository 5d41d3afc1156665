use kk_graph::{EndpointSide, GraphBuilder, GraphError, IndexMap};

/// Void -> Orifice -> Static -> Orifice -> Void, declared the way a model
/// file would declare it (volumes naming restrictions).
#[test]
fn two_orifice_chain_from_names() {
    let mut b = GraphBuilder::new();
    let inlet = b.add_volume("Inlet");
    b.connect_out(inlet, "OrificeA");
    let tank = b.add_volume("Tank");
    b.connect_in(tank, "OrificeA");
    b.connect_out(tank, "OrificeB");
    let outlet = b.add_volume("Outlet");
    b.connect_in(outlet, "OrificeB");
    let a = b.add_restriction("OrificeA");
    let ob = b.add_restriction("OrificeB");

    let graph = b.build().unwrap();

    assert_eq!(graph.inbound(tank), &[a]);
    assert_eq!(graph.outbound(tank), &[ob]);
    assert!(graph.inbound(inlet).is_empty());
    assert!(graph.outbound(outlet).is_empty());
    assert_eq!(graph.upstream(ob), Some(tank));
    assert_eq!(graph.downstream(ob), Some(outlet));
    assert_eq!(graph.volume_by_name("Tank"), Some(tank));

    let statics = IndexMap::from_volumes(&graph, |id| id == tank);
    assert_eq!(statics.len(), 1);
}

#[test]
fn adjacency_is_sorted_by_restriction() {
    let mut b = GraphBuilder::new();
    let hub = b.add_volume("Hub");
    let mut spokes = Vec::new();
    for i in 0..4 {
        spokes.push(b.add_volume(format!("Spoke{i}")));
    }
    // Declare restrictions in reverse so insertion order differs from ID order.
    let names: Vec<String> = (0..4).map(|i| format!("R{i}")).collect();
    for (i, spoke) in spokes.iter().enumerate().rev() {
        b.connect_in(hub, names[i].clone());
        b.connect_out(*spoke, names[i].clone());
    }
    let ids: Vec<_> = names.iter().map(|n| b.add_restriction(n.clone())).collect();

    let graph = b.build().unwrap();
    assert_eq!(graph.inbound(hub), ids.as_slice());
}

#[test]
fn disconnected_components_are_allowed() {
    let mut b = GraphBuilder::new();
    let a = b.add_volume("A");
    let c = b.add_volume("C");
    b.add_volume("Lonely");
    let r = b.add_restriction("R");
    b.connect(r, a, c);
    let graph = b.build().unwrap();
    assert_eq!(graph.volumes().len(), 3);
}

#[test]
fn restriction_without_any_endpoint() {
    let mut b = GraphBuilder::new();
    b.add_volume("A");
    b.add_restriction("Floating");
    assert_eq!(
        b.build().unwrap_err(),
        GraphError::MissingEndpoint {
            restriction: "Floating".into(),
            side: EndpointSide::Upstream,
        }
    );
}
