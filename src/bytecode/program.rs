use serde::{Deserialize, Serialize};

use crate::bytecode::name::{Name, Namespace, QName};

/// Index into [`Program::methods`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodIdx(pub u32);

/// Index into [`Program::classes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassIdx(pub u32);

impl MethodIdx {
    pub(crate) fn shifted(self, by: u32) -> Self {
        Self(self.0 + by)
    }
}

impl ClassIdx {
    pub(crate) fn shifted(self, by: u32) -> Self {
        Self(self.0 + by)
    }
}

/// Parsed symbol tables and code of one bytecode block.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Program {
    /// Entry scripts, each with its initializer and top-level traits.
    pub scripts: Vec<Script>,
    /// Class definitions.
    pub classes: Vec<Class>,
    /// Method signatures and bodies.
    pub methods: Vec<Method>,
}

impl Program {
    /// Class with qualified name `name`.
    pub fn class_by_name(&self, name: &QName) -> Option<(ClassIdx, &Class)> {
        self.classes
            .iter()
            .enumerate()
            .find(|(_, c)| c.name == *name)
            .map(|(i, c)| (ClassIdx(i as u32), c))
    }

    /// Class at `idx`.
    pub fn class(&self, idx: ClassIdx) -> Option<&Class> {
        self.classes.get(idx.0 as usize)
    }

    /// Method at `idx`.
    pub fn method(&self, idx: MethodIdx) -> Option<&Method> {
        self.methods.get(idx.0 as usize)
    }

    /// Append a method and return its index.
    pub fn add_method(&mut self, method: Method) -> MethodIdx {
        self.methods.push(method);
        MethodIdx(self.methods.len() as u32 - 1)
    }

    /// Append a class and return its index.
    pub fn add_class(&mut self, class: Class) -> ClassIdx {
        self.classes.push(class);
        ClassIdx(self.classes.len() as u32 - 1)
    }

    /// Qualified names of all classes, in definition order.
    pub fn class_names(&self) -> impl Iterator<Item = &QName> + '_ {
        self.classes.iter().map(|c| &c.name)
    }

    /// Visit every name in the program: class headers, traits, signatures, handlers and operands.
    ///
    /// Names nested inside type names are not visited separately.
    pub fn for_each_name(&self, f: &mut dyn FnMut(&Name)) {
        for script in &self.scripts {
            visit_traits(&script.traits, f);
        }
        for class in &self.classes {
            f(&Name::QName(class.name.clone()));
            if let Some(sup) = &class.super_name {
                f(&Name::QName(sup.clone()));
            }
            for iface in &class.interfaces {
                f(iface);
            }
            visit_traits(&class.instance_traits, f);
            visit_traits(&class.static_traits, f);
        }
        for method in &self.methods {
            for param in method.params.iter().flatten() {
                f(param);
            }
            if let Some(ret) = &method.return_type {
                f(ret);
            }
            let Some(body) = &method.body else { continue };
            visit_traits(&body.traits, f);
            for handler in &body.exceptions {
                if let Some(t) = &handler.exc_type {
                    f(t);
                }
                if let Some(v) = &handler.var_name {
                    f(v);
                }
            }
            for ins in &body.code {
                for op in &ins.operands {
                    if let Operand::Name(n) = op {
                        f(n);
                    }
                }
            }
        }
    }
}

fn visit_traits(traits: &[Trait], f: &mut dyn FnMut(&Name)) {
    for t in traits {
        f(&Name::QName(t.name.clone()));
        match &t.kind {
            TraitKind::Slot { type_name: Some(ty), .. }
            | TraitKind::Const { type_name: Some(ty), .. } => f(ty),
            _ => {}
        }
    }
}

/// Entry script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Script initializer.
    pub init: MethodIdx,
    /// Top-level traits, typically one class trait per defined class.
    #[serde(default)]
    pub traits: Vec<Trait>,
}

/// Class header flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassFlags {
    /// Instances cannot get dynamic properties.
    pub sealed: bool,
    /// Cannot be subclassed.
    pub is_final: bool,
    /// Declares an interface.
    pub interface: bool,
}

/// Class definition: instance half and static half.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Qualified class name.
    pub name: QName,
    /// Superclass, `None` only for the root object type.
    #[serde(default)]
    pub super_name: Option<QName>,
    /// Header flags.
    #[serde(default)]
    pub flags: ClassFlags,
    /// Protected namespace of the class.
    #[serde(default)]
    pub protected_ns: Option<Namespace>,
    /// Implemented interfaces.
    #[serde(default)]
    pub interfaces: Vec<Name>,
    /// Instance initializer (constructor).
    pub iinit: MethodIdx,
    /// Static initializer.
    pub cinit: MethodIdx,
    /// Instance members.
    #[serde(default)]
    pub instance_traits: Vec<Trait>,
    /// Static members.
    #[serde(default)]
    pub static_traits: Vec<Trait>,
}

impl Class {
    /// Both trait lists, instance members first.
    pub fn traits(&self) -> impl Iterator<Item = &Trait> + '_ {
        self.instance_traits.iter().chain(&self.static_traits)
    }

    /// Initializers and every method reachable through the class traits.
    pub fn own_methods(&self) -> Vec<MethodIdx> {
        let mut out = vec![self.iinit, self.cinit];
        out.extend(self.traits().filter_map(Trait::method));
        out
    }
}

/// Named member of a script, class or activation scope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    /// Member name.
    pub name: QName,
    /// Member kind and payload.
    pub kind: TraitKind,
    /// Cannot be overridden.
    #[serde(default)]
    pub is_final: bool,
    /// Overrides an inherited member.
    #[serde(default)]
    pub is_override: bool,
}

impl Trait {
    /// Trait of `kind` named `name`.
    pub fn new(name: QName, kind: TraitKind) -> Self {
        Self {
            name,
            kind,
            is_final: false,
            is_override: false,
        }
    }

    /// Method implementing this trait, for method-like kinds.
    pub fn method(&self) -> Option<MethodIdx> {
        match &self.kind {
            TraitKind::Method { method, .. }
            | TraitKind::Getter { method, .. }
            | TraitKind::Setter { method, .. }
            | TraitKind::Function { method, .. } => Some(*method),
            TraitKind::Slot { .. } | TraitKind::Const { .. } | TraitKind::Class { .. } => None,
        }
    }
}

/// Kind-specific payload of a [`Trait`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraitKind {
    /// Variable slot.
    Slot {
        /// Slot id, 0 for auto-assigned.
        #[serde(default)]
        slot_id: u32,
        /// Declared type, `None` for untyped.
        #[serde(default)]
        type_name: Option<Name>,
        /// Default value.
        #[serde(default)]
        value: Option<ConstValue>,
    },
    /// Constant slot.
    Const {
        /// Slot id, 0 for auto-assigned.
        #[serde(default)]
        slot_id: u32,
        /// Declared type, `None` for untyped.
        #[serde(default)]
        type_name: Option<Name>,
        /// Constant value.
        #[serde(default)]
        value: Option<ConstValue>,
    },
    /// Method.
    Method {
        /// Dispatch id.
        #[serde(default)]
        disp_id: u32,
        /// Implementation.
        method: MethodIdx,
    },
    /// Property getter.
    Getter {
        /// Dispatch id.
        #[serde(default)]
        disp_id: u32,
        /// Implementation.
        method: MethodIdx,
    },
    /// Property setter.
    Setter {
        /// Dispatch id.
        #[serde(default)]
        disp_id: u32,
        /// Implementation.
        method: MethodIdx,
    },
    /// Class definition slot.
    Class {
        /// Slot id, 0 for auto-assigned.
        #[serde(default)]
        slot_id: u32,
        /// Defined class.
        class: ClassIdx,
    },
    /// Function slot.
    Function {
        /// Slot id, 0 for auto-assigned.
        #[serde(default)]
        slot_id: u32,
        /// Implementation.
        method: MethodIdx,
    },
}

/// Literal default value of a slot or parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstValue {
    /// Signed integer.
    Int(i32),
    /// Unsigned integer.
    UInt(u32),
    /// Double.
    Double(f64),
    /// String.
    String(String),
    /// `true`.
    True,
    /// `false`.
    False,
    /// `null`.
    Null,
    /// `undefined`.
    Undefined,
}

/// Method signature with an optional body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Method {
    /// Debug name.
    pub name: Option<String>,
    /// Parameter types, `None` for untyped.
    pub params: Vec<Option<Name>>,
    /// Return type, `None` for untyped.
    pub return_type: Option<Name>,
    /// Body; native and interface methods have none.
    pub body: Option<MethodBody>,
}

/// Code and frame metrics of a method.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodBody {
    /// Maximum operand stack depth.
    pub max_stack: u32,
    /// Number of local registers.
    pub local_count: u32,
    /// Scope depth at entry.
    pub init_scope_depth: u32,
    /// Maximum scope depth.
    pub max_scope_depth: u32,
    /// Instructions.
    pub code: Vec<Instruction>,
    /// Exception handlers.
    pub exceptions: Vec<ExceptionHandler>,
    /// Activation traits.
    pub traits: Vec<Trait>,
}

/// One entry of a method's exception table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExceptionHandler {
    /// First covered instruction.
    pub from: u32,
    /// One past the last covered instruction.
    pub to: u32,
    /// Handler entry instruction.
    pub target: u32,
    /// Caught type, `None` for catch-all.
    #[serde(default)]
    pub exc_type: Option<Name>,
    /// Name of the bound exception variable.
    #[serde(default)]
    pub var_name: Option<Name>,
}

/// One instruction with its decoded operands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Opcode.
    pub op: Opcode,
    /// Operands in encoding order.
    #[serde(default)]
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// Instruction without operands.
    pub fn new(op: Opcode) -> Self {
        Self {
            op,
            operands: Vec::new(),
        }
    }

    /// Instruction with `operands`.
    pub fn with(op: Opcode, operands: impl IntoIterator<Item = Operand>) -> Self {
        Self {
            op,
            operands: operands.into_iter().collect(),
        }
    }
}

/// Opcodes the engine distinguishes. Anything else decodes to [`Opcode::Other`].
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opcode {
    Nop,
    Label,
    Jump,
    IfTrue,
    IfFalse,
    PushByte,
    PushShort,
    PushInt,
    PushUInt,
    PushDouble,
    PushString,
    PushNamespace,
    PushNull,
    PushUndefined,
    PushTrue,
    PushFalse,
    Pop,
    Dup,
    Swap,
    GetLocal,
    SetLocal,
    Kill,
    PushScope,
    PopScope,
    GetScopeObject,
    GetGlobalScope,
    GetLex,
    FindProperty,
    FindPropStrict,
    GetProperty,
    SetProperty,
    InitProperty,
    DeleteProperty,
    GetSuper,
    SetSuper,
    CallProperty,
    CallPropVoid,
    CallPropLex,
    CallSuper,
    CallSuperVoid,
    ConstructProp,
    ConstructSuper,
    NewFunction,
    NewClass,
    NewObject,
    NewArray,
    NewActivation,
    NewCatch,
    Coerce,
    AsType,
    IsType,
    Throw,
    ReturnVoid,
    ReturnValue,
    Debug,
    DebugLine,
    DebugFile,
    /// Raw opcode byte the engine does not need to understand.
    Other(u8),
}

/// Decoded instruction operand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// Immediate byte.
    Byte(u8),
    /// Signed integer constant.
    Int(i32),
    /// Unsigned integer constant.
    UInt(u32),
    /// Double constant.
    Double(f64),
    /// String constant.
    String(String),
    /// Name constant.
    Name(Name),
    /// Namespace constant.
    Namespace(Namespace),
    /// Method reference.
    Method(MethodIdx),
    /// Class reference.
    Class(ClassIdx),
    /// Local register.
    Register(u32),
    /// Argument count.
    ArgCount(u32),
    /// Branch offset.
    Offset(i32),
    /// Source line.
    DebugLine(u32),
}

#[cfg(test)]
#[path = "../../tests/unit/bytecode/program.rs"]
mod tests;
