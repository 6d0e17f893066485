use crate::{
    bytecode::name::{Name, Namespace, QName},
    bytecode::program::{
        Class, ClassFlags, ClassIdx, Instruction, Method, MethodBody, Opcode, Operand, Program,
        Script, Trait, TraitKind,
    },
    foundation::error::{WeaveError, WeaveResult},
};

/// Dotted name of the base type every timeline-backed class extends.
pub const BASE_MOVIE_CLIP: &str = "flash.display.MovieClip";

/// [`BASE_MOVIE_CLIP`] as a qualified name.
pub fn base_movie_clip() -> QName {
    QName::parse_dotted(BASE_MOVIE_CLIP)
}

/// Append an empty class `name` extending `super_name`, plus the script that defines it.
///
/// The constructor only calls the super constructor. Fails if `program` already defines `name`.
pub fn generate_default_class(
    program: &mut Program,
    name: &QName,
    super_name: &QName,
) -> WeaveResult<ClassIdx> {
    if program.class_by_name(name).is_some() {
        return Err(WeaveError::code_merge(
            "generate.class_exists",
            format!("class '{name}' is already defined"),
        ));
    }

    let iinit = program.add_method(Method {
        name: Some(format!("{name}/{name}")),
        body: Some(body(
            4,
            vec![
                Instruction::with(Opcode::GetLocal, [Operand::Register(0)]),
                Instruction::new(Opcode::PushScope),
                Instruction::with(Opcode::GetLocal, [Operand::Register(0)]),
                Instruction::with(Opcode::ConstructSuper, [Operand::ArgCount(0)]),
                Instruction::new(Opcode::ReturnVoid),
            ],
        )),
        ..Method::default()
    });
    let cinit = program.add_method(Method {
        name: Some(format!("{name}$cinit")),
        body: Some(body(
            1,
            vec![
                Instruction::with(Opcode::GetLocal, [Operand::Register(0)]),
                Instruction::new(Opcode::PushScope),
                Instruction::new(Opcode::ReturnVoid),
            ],
        )),
        ..Method::default()
    });

    let class = program.add_class(Class {
        name: name.clone(),
        super_name: Some(super_name.clone()),
        flags: ClassFlags {
            sealed: true,
            ..ClassFlags::default()
        },
        protected_ns: Some(Namespace::protected(name.protected_namespace_name())),
        interfaces: Vec::new(),
        iinit,
        cinit,
        instance_traits: Vec::new(),
        static_traits: Vec::new(),
    });

    let super_ref = Operand::Name(Name::QName(super_name.clone()));
    let class_ref = Operand::Name(Name::QName(name.clone()));
    let init = program.add_method(Method {
        name: Some(format!("{name}$script")),
        body: Some(body(
            2,
            vec![
                Instruction::with(Opcode::GetLocal, [Operand::Register(0)]),
                Instruction::new(Opcode::PushScope),
                Instruction::with(Opcode::GetScopeObject, [Operand::Byte(0)]),
                Instruction::with(Opcode::GetLex, [super_ref.clone()]),
                Instruction::new(Opcode::PushScope),
                Instruction::with(Opcode::GetLex, [super_ref]),
                Instruction::with(Opcode::NewClass, [Operand::Class(class)]),
                Instruction::new(Opcode::PopScope),
                Instruction::with(Opcode::InitProperty, [class_ref]),
                Instruction::new(Opcode::ReturnVoid),
            ],
        )),
        ..Method::default()
    });
    program.scripts.push(Script {
        init,
        traits: vec![Trait::new(
            name.clone(),
            TraitKind::Class {
                slot_id: 0,
                class,
            },
        )],
    });

    tracing::debug!(class = %name, base = %super_name, "generated default class");
    Ok(class)
}

fn body(max_stack: u32, code: Vec<Instruction>) -> MethodBody {
    MethodBody {
        max_stack,
        local_count: 1,
        init_scope_depth: 0,
        max_scope_depth: 2,
        code,
        ..MethodBody::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bytecode/generate.rs"]
mod tests;
