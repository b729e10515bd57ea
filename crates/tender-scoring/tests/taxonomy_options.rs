use tender_scoring::taxonomy::{
    OptionGroup, TaxonRequirement, TaxonSpec, TaxonomyError, TaxonomyTree,
};

fn requirement(id: u32, name: &str, group_requirement: bool) -> TaxonRequirement {
    TaxonRequirement {
        id,
        name: name.to_string(),
        group_requirement,
    }
}

fn group(level: u32, name: &str) -> OptionGroup {
    OptionGroup {
        level,
        name: name.to_string(),
        description: None,
    }
}

#[test]
fn breadcrumb_skips_the_top_level_taxon() {
    let mut tree = TaxonomyTree::new();
    let root = tree.add_root("Service Capability");
    let a = tree.add_child(root, "Agile Delivery").expect("root exists");
    let b = tree.add_child(a, "Delivery Management").expect("a exists");
    tree.attach_requirement(b, requirement(41, "Delivery Manager", false))
        .expect("b exists");
    tree.attach_requirement(b, requirement(40, "Delivery Management", true))
        .expect("b exists");

    let options = tree.options(root).expect("options collect");

    assert_eq!(options.len(), 2);
    let manager = options
        .iter()
        .find(|option| option.requirement_id == 41)
        .expect("requirement option");
    assert_eq!(
        manager.groups,
        vec![group(1, "Agile Delivery"), group(2, "Delivery Management")]
    );

    let group_option = options
        .iter()
        .find(|option| option.requirement_id == 40)
        .expect("group requirement option");
    assert!(group_option.group_requirement);
    assert_eq!(group_option.groups, vec![group(1, "Agile Delivery")]);
}

#[test]
fn options_collect_recursively_and_dedupe() {
    let specs: Vec<TaxonSpec> = serde_json::from_str(
        r#"[
          {
            "name": "Location",
            "children": [
              {
                "name": "England",
                "description": "English regions",
                "requirements": [{ "id": 1, "name": "London" }, { "id": 2, "name": "Leeds" }],
                "children": [
                  { "name": "North East", "requirements": [{ "id": 3, "name": "Newcastle" }] }
                ]
              },
              { "name": "Scotland", "requirements": [{ "id": 4, "name": "Scotland", "group_requirement": true }] }
            ]
          },
          {
            "name": "Security Clearance",
            "requirements": [{ "id": 9, "name": "SC" }]
          }
        ]"#,
    )
    .expect("taxonomy json parses");
    let tree = TaxonomyTree::from_specs(&specs);

    let location = tree.roots()[0];
    let options = tree.options(location).expect("options collect");

    let names: Vec<&str> = options.iter().map(|option| option.name.as_str()).collect();
    assert_eq!(names.len(), 4);
    for expected in ["London", "Leeds", "Newcastle", "Scotland"] {
        assert!(names.contains(&expected), "missing {expected}");
    }

    let newcastle = options
        .iter()
        .find(|option| option.requirement_id == 3)
        .expect("newcastle option");
    assert_eq!(newcastle.groups.len(), 2);
    assert_eq!(newcastle.groups[0].name, "England");
    assert_eq!(
        newcastle.groups[0].description.as_deref(),
        Some("English regions")
    );
    assert_eq!(newcastle.groups[1], group(2, "North East"));

    let london = options
        .iter()
        .find(|option| option.requirement_id == 1)
        .expect("london option");
    assert_eq!(london.description.as_deref(), Some("English regions"));

    let scotland = options
        .iter()
        .find(|option| option.requirement_id == 4)
        .expect("scotland option");
    assert!(scotland.groups.is_empty());

    let everything = tree
        .options_for_roots(&[tree.roots()[0], tree.roots()[1], tree.roots()[0]])
        .expect("options collect");
    assert_eq!(everything.len(), 5);
    let clearance = everything
        .iter()
        .find(|option| option.requirement_id == 9)
        .expect("clearance option");
    assert!(clearance.groups.is_empty());
}

#[test]
fn breadcrumb_of_a_single_taxon_includes_itself() {
    let mut tree = TaxonomyTree::new();
    let root = tree.add_root("Scalability");
    let child = tree.add_child(root, "Team Size").expect("root exists");
    tree.describe(child, "Headcount bands").expect("child exists");

    let crumbs = tree.breadcrumb(child).expect("child exists");

    assert_eq!(crumbs.len(), 1);
    assert_eq!(crumbs[0].level, 1);
    assert_eq!(crumbs[0].description.as_deref(), Some("Headcount bands"));
    assert!(tree.breadcrumb(root).expect("root exists").is_empty());
}

#[test]
fn foreign_taxon_ids_are_rejected() {
    let mut other = TaxonomyTree::new();
    let other_root = other.add_root("Other");
    let foreign = other.add_child(other_root, "Foreign").expect("root exists");

    let mut tree = TaxonomyTree::new();
    tree.add_root("Only");

    match tree.options(foreign) {
        Err(TaxonomyError::UnknownNode(id)) => assert_eq!(id, foreign),
        other => panic!("expected unknown node, got {other:?}"),
    }
    match tree.add_child(foreign, "Orphan") {
        Err(TaxonomyError::UnknownNode(_)) => {}
        other => panic!("expected unknown node, got {other:?}"),
    }
}
