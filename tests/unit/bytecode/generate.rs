use super::*;
use crate::bytecode::merge::find_class_collision;

#[test]
fn base_movie_clip_parses_into_package_and_name() {
    let q = base_movie_clip();
    assert_eq!(q.package_name(), "flash.display");
    assert_eq!(q.name, "MovieClip");
}

#[test]
fn generated_class_extends_base_and_is_defined_by_a_script() {
    let mut p = Program::default();
    let name = QName::parse_dotted("pkg.Hero");
    let idx = generate_default_class(&mut p, &name, &base_movie_clip()).unwrap();

    let (found, class) = p.class_by_name(&name).unwrap();
    assert_eq!(found, idx);
    assert_eq!(class.super_name, Some(base_movie_clip()));
    assert_eq!(class.protected_ns, Some(Namespace::protected("pkg:Hero")));
    assert!(p.method(class.iinit).unwrap().body.is_some());

    let script = p.scripts.last().unwrap();
    assert!(matches!(
        script.traits[0].kind,
        TraitKind::Class { class, .. } if class == idx
    ));
    let init = p.method(script.init).unwrap().body.as_ref().unwrap();
    let new_class = Instruction::with(Opcode::NewClass, [Operand::Class(idx)]);
    assert!(init.code.contains(&new_class));
}

#[test]
fn generating_an_existing_class_fails() {
    let mut p = Program::default();
    let name = QName::parse_dotted("pkg.Hero");
    generate_default_class(&mut p, &name, &base_movie_clip()).unwrap();
    let err = generate_default_class(&mut p, &name, &base_movie_clip()).unwrap_err();
    assert_eq!(err.tag(), Some("generate.class_exists"));
    assert_eq!(p.classes.len(), 1);

    let other = Program::default();
    assert!(find_class_collision(&other, &p).is_none());
}
