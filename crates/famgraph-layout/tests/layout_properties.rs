use famgraph_layout::*;
use std::collections::HashSet;

fn persons(ids: &[&str]) -> Vec<Person> {
    ids.iter().map(|id| Person::new(*id)).collect()
}

fn generation(out: &FamilyLayout, id: &str) -> u32 {
    out.node(&id.into()).unwrap().generation
}

/// Three generations, two married-in partners, a remarriage and a sibling link
fn sample_family() -> (Vec<Person>, Vec<RelationshipEdge>) {
    let people = persons(&[
        "grandpa", "grandma", "dad", "aunt", "mum", "uncle", "kid1", "kid2", "cousin", "stepmum",
    ]);
    let edges = vec![
        RelationshipEdge::spouse("grandpa", "grandma"),
        RelationshipEdge::parent("grandpa", "dad"),
        RelationshipEdge::parent("grandma", "dad"),
        RelationshipEdge::parent("grandpa", "aunt"),
        RelationshipEdge::new("aunt", "grandma", RelationType::Child),
        RelationshipEdge::new("dad", "mum", RelationType::ExSpouse),
        RelationshipEdge::spouse("dad", "stepmum"),
        RelationshipEdge::spouse("aunt", "uncle"),
        RelationshipEdge::parent("dad", "kid1"),
        RelationshipEdge::parent("mum", "kid1"),
        RelationshipEdge::parent("mum", "kid2"),
        RelationshipEdge::new("kid1", "kid2", RelationType::Sibling),
        RelationshipEdge::parent("aunt", "cousin"),
        RelationshipEdge::parent("uncle", "cousin"),
    ];
    (people, edges)
}

#[test]
fn test_no_edges_keeps_every_person() {
    let people = persons(&["a", "b", "c", "d"]);
    let out = layout(&people, &[], Spacing::default());

    assert_eq!(out.nodes.len(), people.len());
    assert!(out.edges.is_empty());
    assert!(out.nodes.iter().all(|n| n.generation == 0));
}

#[test]
fn test_scenario_parent_with_two_children() {
    let people = persons(&["p1", "p2", "p3"]);
    let edges = vec![
        RelationshipEdge::parent("p1", "p2"),
        RelationshipEdge::parent("p1", "p3"),
    ];
    let out = layout(&people, &edges, Spacing::default());

    assert_eq!(generation(&out, "p1"), 0);
    assert_eq!(generation(&out, "p2"), 1);
    assert_eq!(generation(&out, "p3"), 1);

    let x2 = out.node(&"p2".into()).unwrap().position.x;
    let x3 = out.node(&"p3".into()).unwrap().position.x;
    assert_eq!(x2, -x3);
    assert!(x2 != 0.0);
}

#[test]
fn test_scenario_spouse_without_parents_is_equalized() {
    let people = persons(&["p1", "p2", "p3", "p4"]);
    let edges = vec![
        RelationshipEdge::parent("p1", "p2"),
        RelationshipEdge::parent("p1", "p3"),
        RelationshipEdge::spouse("p2", "p4"),
    ];
    let out = layout(&people, &edges, Spacing::default());

    assert_eq!(generation(&out, "p4"), 1);
}

#[test]
fn test_scenario_spouse_recorded_both_ways() {
    let people = persons(&["p1", "p2"]);
    let edges = vec![
        RelationshipEdge::spouse("p1", "p2"),
        RelationshipEdge::spouse("p2", "p1"),
    ];
    let out = layout(&people, &edges, Spacing::default());

    let spouse_edges = out.edges.iter().filter(|e| e.kind == EdgeKind::Spouse).count();
    assert_eq!(spouse_edges, 1);
}

#[test]
fn test_children_always_below_parents() {
    let (people, edges) = sample_family();
    let out = layout(&people, &edges, Spacing::default());

    for edge in edges.iter().map(RelationshipEdge::normalized) {
        if edge.relation_type != RelationType::Parent {
            continue;
        }
        let parent = generation(&out, edge.from.as_str());
        let child = generation(&out, edge.to.as_str());
        assert!(child > parent, "{} ({}) not below {} ({})", edge.to, child, edge.from, parent);
    }
}

#[test]
fn test_roots_stay_on_top_unless_married_down() {
    let (people, edges) = sample_family();
    let graph = FamilyGraph::build(&people, &edges);
    let out = layout(&people, &edges, Spacing::default());

    for node in graph.nodes() {
        if !node.is_root() {
            continue;
        }
        let g = generation(&out, node.id().as_str());
        let married_down = graph
            .ids_of(&node.spouse_ids)
            .any(|partner| generation(&out, partner.as_str()) == g && g > 0);
        assert!(g == 0 || married_down, "root {} sits at {}", node.id(), g);
    }

    assert_eq!(generation(&out, "mum"), 1);
    assert_eq!(generation(&out, "uncle"), 1);
    assert_eq!(generation(&out, "stepmum"), 1);
}

#[test]
fn test_couples_and_siblings_sit_together() {
    let (people, edges) = sample_family();
    let out = layout(&people, &edges, Spacing::default());
    let spacing = Spacing::default().horizontal;

    let x = |id: &str| out.node(&id.into()).unwrap().position.x;
    assert_eq!((x("grandpa") - x("grandma")).abs(), spacing);
    assert_eq!((x("aunt") - x("uncle")).abs(), spacing);
    assert_eq!((x("kid1") - x("kid2")).abs(), spacing);
}

#[test]
fn test_layout_is_idempotent() {
    let (people, edges) = sample_family();
    let first = layout(&people, &edges, Spacing::new(180.0, 120.0));
    let second = layout(&people, &edges, Spacing::new(180.0, 120.0));

    for (a, b) in first.nodes.iter().zip(&second.nodes) {
        assert_eq!(a.position.x.to_bits(), b.position.x.to_bits());
        assert_eq!(a.position.y.to_bits(), b.position.y.to_bits());
    }
    let e1: HashSet<_> = first.edges.iter().cloned().collect();
    let e2: HashSet<_> = second.edges.iter().cloned().collect();
    assert_eq!(e1, e2);
}

#[test]
fn test_edge_order_does_not_change_layout() {
    let (people, edges) = sample_family();
    let mut reversed = edges.clone();
    reversed.reverse();

    let a = layout(&people, &edges, Spacing::default());
    let b = layout(&people, &reversed, Spacing::default());
    assert_eq!(a.nodes, b.nodes);
}

#[test]
fn test_dangling_edge_tolerated() {
    let (people, mut edges) = sample_family();
    edges.push(RelationshipEdge::parent("dad", "nobody"));
    edges.push(RelationshipEdge::spouse("ghost", "mum"));
    let out = layout(&people, &edges, Spacing::default());

    assert_eq!(out.nodes.len(), people.len());
    let ids: HashSet<&PersonId> = out.nodes.iter().map(|n| &n.person_id).collect();
    assert!(out
        .edges
        .iter()
        .all(|e| ids.contains(&e.source_id) && ids.contains(&e.target_id)));
}

#[test]
fn test_mutual_parent_cycle() {
    let people = persons(&["A", "B"]);
    let edges = vec![
        RelationshipEdge::parent("A", "B"),
        RelationshipEdge::parent("B", "A"),
    ];
    let out = layout(&people, &edges, Spacing::default());

    assert_eq!(out.nodes.len(), 2);
    assert_eq!(out.edges.len(), 1);
}

#[test]
fn test_unknown_relation_is_not_drawn() {
    let people = persons(&["a", "b"]);
    let edges = vec![RelationshipEdge::new("a", "b", RelationType::Unknown)];
    let out = layout(&people, &edges, Spacing::default());

    assert_eq!(out.nodes.len(), 2);
    assert!(out.edges.is_empty());
}

#[test]
fn test_rows_centered_on_zero() {
    let (people, edges) = sample_family();
    let out = layout(&people, &edges, Spacing::default());

    for g in 0..out.depth() {
        let sum: f64 = out
            .nodes
            .iter()
            .filter(|n| n.generation == g)
            .map(|n| n.position.x)
            .sum();
        assert!(sum.abs() < 1e-9, "row {} not centered: {}", g, sum);
    }
}
