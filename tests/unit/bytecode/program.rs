use super::*;

fn class(name: &str, iinit: u32, cinit: u32) -> Class {
    let run = TraitKind::Method {
        disp_id: 0,
        method: MethodIdx(2),
    };
    Class {
        name: QName::parse_dotted(name),
        super_name: None,
        flags: ClassFlags::default(),
        protected_ns: None,
        interfaces: Vec::new(),
        iinit: MethodIdx(iinit),
        cinit: MethodIdx(cinit),
        instance_traits: vec![Trait::new(QName::package("", "run"), run)],
        static_traits: Vec::new(),
    }
}

#[test]
fn add_returns_stable_indices_and_lookup_finds_classes() {
    let mut p = Program::default();
    assert_eq!(p.add_method(Method::default()), MethodIdx(0));
    assert_eq!(p.add_method(Method::default()), MethodIdx(1));
    let idx = p.add_class(class("pkg.Hero", 0, 1));
    assert_eq!(idx, ClassIdx(0));

    let (found, c) = p.class_by_name(&QName::parse_dotted("pkg.Hero")).unwrap();
    assert_eq!(found, idx);
    assert_eq!(c.iinit, MethodIdx(0));
    assert!(p.class_by_name(&QName::parse_dotted("pkg.Villain")).is_none());
}

#[test]
fn own_methods_include_initializers_and_trait_methods() {
    let c = class("pkg.Hero", 0, 1);
    assert_eq!(
        c.own_methods(),
        vec![MethodIdx(0), MethodIdx(1), MethodIdx(2)]
    );
}

#[test]
fn for_each_name_reaches_operands_and_signatures() {
    let hero = QName::parse_dotted("pkg.Hero");
    let mut p = Program::default();
    p.add_method(Method {
        params: vec![Some(Name::QName(hero.clone())), None],
        body: Some(MethodBody {
            code: vec![Instruction::with(
                Opcode::GetLex,
                [Operand::Name(Name::QName(hero.clone()))],
            )],
            ..MethodBody::default()
        }),
        ..Method::default()
    });

    let mut hits = 0;
    p.for_each_name(&mut |n| {
        if n.mentions(&hero) {
            hits += 1;
        }
    });
    assert_eq!(hits, 2);
}

#[test]
fn programs_deserialize_with_defaults() {
    let json = r#"{ "methods": [ {} ], "classes": [ {
        "name": { "ns": { "kind": "package", "name": "pkg" }, "name": "Hero" },
        "iinit": 0, "cinit": 0
    } ] }"#;
    let p: Program = serde_json::from_str(json).unwrap();
    assert!(p.scripts.is_empty());
    assert_eq!(p.classes[0].name, QName::parse_dotted("pkg.Hero"));
    assert!(p.classes[0].instance_traits.is_empty());
}
