use crate::{
    bytecode::block::{AbcBlock, BytecodeCodec},
    bytecode::name::QName,
    bytecode::program::{Method, Operand, Program, Trait, TraitKind},
    foundation::error::{WeaveError, WeaveResult},
};

/// Outcome of appending one program to another.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Classes appended.
    pub classes: usize,
    /// Methods appended.
    pub methods: usize,
    /// Scripts appended.
    pub scripts: usize,
    /// Index the first appended method landed at.
    pub method_offset: u32,
    /// Index the first appended class landed at.
    pub class_offset: u32,
}

/// First class of `incoming` whose qualified name `target` already defines.
pub fn find_class_collision<'a>(target: &Program, incoming: &'a Program) -> Option<&'a QName> {
    incoming
        .class_names()
        .find(|name| target.class_by_name(name).is_some())
}

/// Append the methods, classes and scripts of `incoming` to `target`.
///
/// Every method and class index carried by `incoming` is shifted by the size of the matching
/// `target` table. A class name defined by both programs fails before `target` is touched.
#[tracing::instrument(skip_all, fields(incoming = incoming.classes.len()))]
pub fn merge_programs(target: &mut Program, incoming: &Program) -> WeaveResult<MergeReport> {
    if let Some(name) = find_class_collision(target, incoming) {
        return Err(WeaveError::code_merge(
            "merge.class_collision",
            format!("class '{name}' is defined in both programs"),
        ));
    }

    let method_offset = table_len(target.methods.len(), "methods")?;
    let class_offset = table_len(target.classes.len(), "classes")?;
    let shift = Shift {
        methods: method_offset,
        classes: class_offset,
    };

    target.methods.extend(incoming.methods.iter().map(|m| {
        let mut m = m.clone();
        shift.method(&mut m);
        m
    }));

    for class in &incoming.classes {
        let mut class = class.clone();
        class.iinit = class.iinit.shifted(shift.methods);
        class.cinit = class.cinit.shifted(shift.methods);
        shift.traits(&mut class.instance_traits);
        shift.traits(&mut class.static_traits);
        tracing::debug!(class = %class.name, "appending class");
        target.classes.push(class);
    }

    target.scripts.extend(incoming.scripts.iter().map(|s| {
        let mut s = s.clone();
        s.init = s.init.shifted(shift.methods);
        shift.traits(&mut s.traits);
        s
    }));

    Ok(MergeReport {
        classes: incoming.classes.len(),
        methods: incoming.methods.len(),
        scripts: incoming.scripts.len(),
        method_offset,
        class_offset,
    })
}

/// Merge `incoming` into `target`, parsing both as needed. `target` becomes tampered.
///
/// `incoming` is left untouched: an unparsed block is decoded on the side.
pub fn merge_blocks(
    target: &mut AbcBlock,
    incoming: &AbcBlock,
    codec: &dyn BytecodeCodec,
) -> WeaveResult<MergeReport> {
    let incoming = incoming.resolved_program(codec)?;
    if let Some(name) = find_class_collision(target.parse(codec)?, &incoming) {
        return Err(WeaveError::code_merge(
            "merge.class_collision",
            format!("class '{name}' is defined in both programs"),
        ));
    }
    merge_programs(target.edit(codec)?, &incoming)
}

fn table_len(len: usize, what: &str) -> WeaveResult<u32> {
    u32::try_from(len).map_err(|_| {
        WeaveError::internal("merge.table_overflow", format!("too many {what} to index"))
    })
}

#[derive(Clone, Copy)]
struct Shift {
    methods: u32,
    classes: u32,
}

impl Shift {
    fn traits(self, traits: &mut [Trait]) {
        for t in traits {
            match &mut t.kind {
                TraitKind::Method { method, .. }
                | TraitKind::Getter { method, .. }
                | TraitKind::Setter { method, .. }
                | TraitKind::Function { method, .. } => *method = method.shifted(self.methods),
                TraitKind::Class { class, .. } => *class = class.shifted(self.classes),
                TraitKind::Slot { .. } | TraitKind::Const { .. } => {}
            }
        }
    }

    fn method(self, method: &mut Method) {
        let Some(body) = &mut method.body else { return };
        self.traits(&mut body.traits);
        for ins in &mut body.code {
            for op in &mut ins.operands {
                match op {
                    Operand::Method(m) => *m = m.shifted(self.methods),
                    Operand::Class(c) => *c = c.shifted(self.classes),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bytecode/merge.rs"]
mod tests;
