use std::collections::HashSet;

use crate::{
    bytecode::name::{Name, Namespace, NamespaceKind, NamespaceSet, QName},
    bytecode::program::{Method, MethodIdx, Operand, Program, Trait, TraitKind},
    foundation::error::{WeaveError, WeaveResult},
};

/// Counters describing what [`rename_class`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Class definitions renamed.
    pub classes: usize,
    /// Subclasses repointed at the new name.
    pub subclasses: usize,
    /// Protected namespaces replaced.
    pub protected_namespaces: usize,
    /// Traits whose name or namespace changed.
    pub traits: usize,
    /// Name operands and type references rewritten.
    pub names: usize,
    /// Methods treated as belonging to the renamed class.
    pub class_methods: usize,
}

/// Rename class `old` to the dotted name `new_dotted` throughout `program`.
///
/// The new name must carry a package. The renamed class's members move from the old package to
/// the new one, as do package and protected namespace references made from its methods. Exact
/// references to `old` are rewritten everywhere.
///
/// Unsupported shapes (namespace-valued operands, class members in foreign namespace kinds) are
/// rejected before anything is changed.
#[tracing::instrument(skip_all, fields(old = %old, new = new_dotted))]
pub fn rename_class(
    program: &mut Program,
    old: &QName,
    new_dotted: &str,
) -> WeaveResult<RenameReport> {
    let new = QName::parse_dotted(new_dotted);
    if new.package_name().is_empty() {
        return Err(WeaveError::code_merge(
            "rename.unpackaged_name",
            format!("new class name '{new_dotted}' has no package"),
        ));
    }

    let renamer = Renamer {
        old_protected: old.protected_namespace_name(),
        new_protected: new.protected_namespace_name(),
        old_package: old.package_name().to_owned(),
        new_package: new.package_name().to_owned(),
        old: old.clone(),
        new,
    };
    renamer.validate(program)?;

    let mut report = RenameReport::default();
    let mut class_methods: Vec<MethodIdx> = Vec::new();

    for class in &mut program.classes {
        let renamed = class.name == renamer.old;
        if renamed {
            class.name = renamer.new.clone();
            report.classes += 1;
            class_methods.extend(class.own_methods());
            tracing::debug!(class = %class.name, "renamed class");
        }
        if class.super_name.as_ref() == Some(&renamer.old) {
            class.super_name = Some(renamer.new.clone());
            report.subclasses += 1;
        }
        if let Some(ns) = &mut class.protected_ns
            && ns.name == renamer.old_protected
        {
            ns.name = renamer.new_protected.clone();
            report.protected_namespaces += 1;
        }
        for iface in &mut class.interfaces {
            report.names += usize::from(renamer.rewrite_name(iface, false));
        }
        let instance = class.instance_traits.iter_mut();
        for t in instance.chain(class.static_traits.iter_mut()) {
            report.traits += usize::from(renamer.rewrite_trait(t, renamed));
            report.names += renamer.rewrite_trait_type(t);
        }
    }

    for script in &mut program.scripts {
        for t in &mut script.traits {
            report.traits += usize::from(renamer.rewrite_trait(t, false));
            report.names += renamer.rewrite_trait_type(t);
        }
    }

    let inside = closure_of(program, class_methods);
    report.class_methods = inside.len();
    for (idx, method) in program.methods.iter_mut().enumerate() {
        let in_class = inside.contains(&MethodIdx(idx as u32));
        report.names += renamer.rewrite_method(method, in_class, &mut report.traits);
    }

    Ok(report)
}

/// `roots` plus every method reachable from them through method operands.
fn closure_of(program: &Program, roots: Vec<MethodIdx>) -> HashSet<MethodIdx> {
    let mut seen: HashSet<MethodIdx> = HashSet::new();
    let mut stack = roots;
    while let Some(idx) = stack.pop() {
        if !seen.insert(idx) {
            continue;
        }
        let Some(body) = program.method(idx).and_then(|m| m.body.as_ref()) else {
            continue;
        };
        for ins in &body.code {
            for op in &ins.operands {
                if let Operand::Method(m) = op {
                    stack.push(*m);
                }
            }
        }
        stack.extend(body.traits.iter().filter_map(Trait::method));
    }
    seen
}

struct Renamer {
    old: QName,
    new: QName,
    old_package: String,
    new_package: String,
    old_protected: String,
    new_protected: String,
}

impl Renamer {
    fn validate(&self, program: &Program) -> WeaveResult<()> {
        for class in program.classes.iter().filter(|c| c.name == self.old) {
            for t in class.traits() {
                if t.name != self.old
                    && !matches!(
                        t.name.ns.kind,
                        NamespaceKind::Package | NamespaceKind::PackageInternal
                    )
                {
                    return Err(WeaveError::code_merge(
                        "rename.trait_namespace",
                        format!(
                            "member '{}' of class '{}' is in an unsupported namespace",
                            t.name, self.old
                        ),
                    ));
                }
            }
        }
        for (idx, method) in program.methods.iter().enumerate() {
            let Some(body) = &method.body else { continue };
            for op in body.code.iter().flat_map(|ins| &ins.operands) {
                if let Operand::Namespace(ns) = op {
                    return Err(WeaveError::code_merge(
                        "rename.namespace_operand",
                        format!("method {idx} uses namespace {ns} as a value"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Package namespaces of the old package, except the shared public namespace.
    fn is_old_package(&self, ns: &Namespace) -> bool {
        ns.name == self.old_package && !(ns.kind == NamespaceKind::Package && ns.name.is_empty())
    }

    fn rewrite_qname(&self, q: &mut QName, inside: bool) -> bool {
        if *q == self.old {
            *q = self.new.clone();
            return true;
        }
        if inside
            && matches!(
                q.ns.kind,
                NamespaceKind::Package | NamespaceKind::PackageInternal
            )
            && self.is_old_package(&q.ns)
        {
            q.ns.name = self.new_package.clone();
            return true;
        }
        false
    }

    fn rewrite_ns_set(&self, set: &NamespaceSet) -> Option<NamespaceSet> {
        let mut changed = false;
        let rebuilt = set
            .0
            .iter()
            .map(|ns| {
                let replacement = match ns.kind {
                    NamespaceKind::Protected | NamespaceKind::StaticProtected
                        if ns.name == self.old_protected =>
                    {
                        Some(ns.renamed(self.new_protected.as_str()))
                    }
                    NamespaceKind::Package
                    | NamespaceKind::PackageInternal
                    | NamespaceKind::Private
                    | NamespaceKind::Namespace
                        if self.is_old_package(ns) =>
                    {
                        Some(ns.renamed(self.new_package.as_str()))
                    }
                    _ => None,
                };
                changed |= replacement.is_some();
                replacement.unwrap_or_else(|| ns.clone())
            })
            .collect();
        changed.then_some(NamespaceSet(rebuilt))
    }

    fn rewrite_name(&self, name: &mut Name, inside: bool) -> bool {
        match name {
            Name::QName(q) => self.rewrite_qname(q, inside),
            Name::Multiname { ns_set, .. } | Name::MultinameL { ns_set } => {
                if !inside {
                    return false;
                }
                match self.rewrite_ns_set(ns_set) {
                    Some(set) => {
                        *ns_set = set;
                        true
                    }
                    None => false,
                }
            }
            Name::TypeName { base, params } => {
                let mut changed = self.rewrite_name(base, inside);
                for p in params {
                    changed |= self.rewrite_name(p, inside);
                }
                changed
            }
            Name::RtQName { .. } | Name::RtQNameL => false,
        }
    }

    /// Trait name: exact matches everywhere; members of the renamed class follow its package.
    fn rewrite_trait(&self, t: &mut Trait, member_of_renamed: bool) -> bool {
        if t.name == self.old {
            t.name = self.new.clone();
            return true;
        }
        if member_of_renamed && self.is_old_package(&t.name.ns) {
            t.name.ns.name = self.new_package.clone();
            return true;
        }
        false
    }

    fn rewrite_trait_type(&self, t: &mut Trait) -> usize {
        match &mut t.kind {
            TraitKind::Slot { type_name: Some(ty), .. }
            | TraitKind::Const { type_name: Some(ty), .. } => {
                usize::from(self.rewrite_name(ty, false))
            }
            _ => 0,
        }
    }

    fn rewrite_method(&self, method: &mut Method, inside: bool, traits: &mut usize) -> usize {
        let mut names = 0;
        for param in method.params.iter_mut().flatten() {
            names += usize::from(self.rewrite_name(param, false));
        }
        if let Some(ret) = &mut method.return_type {
            names += usize::from(self.rewrite_name(ret, false));
        }
        let Some(body) = &mut method.body else {
            return names;
        };
        for handler in &mut body.exceptions {
            if let Some(ty) = &mut handler.exc_type {
                names += usize::from(self.rewrite_name(ty, false));
            }
        }
        for t in &mut body.traits {
            *traits += usize::from(self.rewrite_trait(t, false));
            names += self.rewrite_trait_type(t);
        }
        for ins in &mut body.code {
            for op in &mut ins.operands {
                if let Operand::Name(n) = op {
                    names += usize::from(self.rewrite_name(n, inside));
                }
            }
        }
        names
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bytecode/rename.rs"]
mod tests;
