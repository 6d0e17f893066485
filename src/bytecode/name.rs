use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a namespace; each kind gets a different treatment during rename.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamespaceKind {
    /// Generic user-defined namespace.
    Namespace,
    /// Public namespace of a package.
    Package,
    /// Internal namespace of a package.
    PackageInternal,
    /// Protected namespace of a class.
    Protected,
    /// Explicitly opened namespace.
    Explicit,
    /// Static protected namespace of a class.
    StaticProtected,
    /// Private namespace.
    Private,
}

impl NamespaceKind {
    fn label(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Package => "package",
            Self::PackageInternal => "internal",
            Self::Protected => "protected",
            Self::Explicit => "explicit",
            Self::StaticProtected => "static_protected",
            Self::Private => "private",
        }
    }
}

/// A namespace value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Namespace {
    /// Kind.
    pub kind: NamespaceKind,
    /// Namespace name (the package name for package kinds).
    pub name: String,
}

impl Namespace {
    /// Namespace of `kind` named `name`.
    pub fn new(kind: NamespaceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Public namespace of a package.
    pub fn package(name: impl Into<String>) -> Self {
        Self::new(NamespaceKind::Package, name)
    }

    /// Internal namespace of a package.
    pub fn package_internal(name: impl Into<String>) -> Self {
        Self::new(NamespaceKind::PackageInternal, name)
    }

    /// Protected namespace.
    pub fn protected(name: impl Into<String>) -> Self {
        Self::new(NamespaceKind::Protected, name)
    }

    /// Private namespace.
    pub fn private(name: impl Into<String>) -> Self {
        Self::new(NamespaceKind::Private, name)
    }

    /// The public namespace shared by every public name.
    pub fn public() -> Self {
        Self::package("")
    }

    /// Same kind, different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(self.kind, name)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind.label(), self.name)
    }
}

/// Ordered set of namespaces a multiname is resolved against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceSet(pub Vec<Namespace>);

impl fmt::Display for NamespaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, ns) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ns}")?;
        }
        f.write_str("]")
    }
}

/// Namespace-qualified name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QName {
    /// Namespace.
    pub ns: Namespace,
    /// Local name.
    pub name: String,
}

impl QName {
    /// Name `name` in namespace `ns`.
    pub fn new(ns: Namespace, name: impl Into<String>) -> Self {
        Self {
            ns,
            name: name.into(),
        }
    }

    /// Public name `name` of package `package`.
    pub fn package(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Namespace::package(package), name)
    }

    /// Parse `a.b.Name` into package `a.b` and local name `Name`.
    ///
    /// A name without a dot lives in the unnamed package.
    pub fn parse_dotted(dotted: &str) -> Self {
        match dotted.rsplit_once('.') {
            Some((package, name)) => Self::package(package, name),
            None => Self::package("", dotted),
        }
    }

    /// Package part for package namespaces, otherwise the namespace name.
    pub fn package_name(&self) -> &str {
        &self.ns.name
    }

    /// Name of the protected namespace a class with this name gets.
    pub fn protected_namespace_name(&self) -> String {
        protected_namespace_name(&self.ns.name, &self.name)
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ns.kind {
            NamespaceKind::Package if self.ns.name.is_empty() => f.write_str(&self.name),
            NamespaceKind::Package => write!(f, "{}.{}", self.ns.name, self.name),
            _ => write!(f, "{}::{}", self.ns, self.name),
        }
    }
}

/// `package:Class`, or just `Class` in the unnamed package.
pub fn protected_namespace_name(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_owned()
    } else {
        format!("{package}:{simple}")
    }
}

/// A name operand as it appears in bytecode.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Name {
    /// Fully qualified name.
    #[serde(rename = "qname")]
    QName(QName),
    /// Local name resolved against a namespace set.
    Multiname {
        /// Local name.
        name: String,
        /// Candidate namespaces.
        ns_set: NamespaceSet,
    },
    /// Local name with the namespace taken from the stack.
    RtQName {
        /// Local name.
        name: String,
    },
    /// Namespace and local name both taken from the stack.
    RtQNameL,
    /// Local name taken from the stack, resolved against a namespace set.
    MultinameL {
        /// Candidate namespaces.
        ns_set: NamespaceSet,
    },
    /// Parameterized type such as a typed vector.
    TypeName {
        /// Generic base type.
        base: Box<Name>,
        /// Type parameters.
        params: Vec<Name>,
    },
}

impl Name {
    /// Borrow the qualified name, if this is one.
    pub fn as_qname(&self) -> Option<&QName> {
        match self {
            Self::QName(q) => Some(q),
            _ => None,
        }
    }

    /// Return `true` if this name, or any name nested in it, equals `q`.
    pub fn mentions(&self, q: &QName) -> bool {
        match self {
            Self::QName(own) => own == q,
            Self::TypeName { base, params } => {
                base.mentions(q) || params.iter().any(|p| p.mentions(q))
            }
            Self::Multiname { .. }
            | Self::RtQName { .. }
            | Self::RtQNameL
            | Self::MultinameL { .. } => false,
        }
    }
}

impl From<QName> for Name {
    fn from(q: QName) -> Self {
        Self::QName(q)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QName(q) => write!(f, "{q}"),
            Self::Multiname { name, ns_set } => write!(f, "{ns_set}::{name}"),
            Self::RtQName { name } => write!(f, "<rt>::{name}"),
            Self::RtQNameL => f.write_str("<rt>::<rt>"),
            Self::MultinameL { ns_set } => write!(f, "{ns_set}::<rt>"),
            Self::TypeName { base, params } => {
                write!(f, "{base}.<")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{p}")?;
                }
                f.write_str(">")
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bytecode/name.rs"]
mod tests;
