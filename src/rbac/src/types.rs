//! Core RBAC types: subjects, resources, rules, roles and role bindings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a requesting subject
///
/// The enum has no "unset" variant. A subject whose kind was never set
/// carries `None` in [`Subject::kind`] and is refused by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    /// A human user
    User,
    /// A group that users or service accounts belong to
    Group,
    /// An artificial user such as an application
    ServiceAccount,
}

impl SubjectKind {
    /// Canonical name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::User => "User",
            SubjectKind::Group => "Group",
            SubjectKind::ServiceAccount => "ServiceAccount",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity or group presented with a request, or listed in a binding.
///
/// Two subjects are equal when both name and kind are equal.
///
/// ```text
/// - Name: bofh                                       Kind: User
/// - Name: administrators                             Kind: Group
/// - Name: system:serviceaccount:my-ns:my-account     Kind: ServiceAccount
/// - Name: system:authenticated                       Kind: Group
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    /// Subject name
    pub name: String,

    /// Subject kind, `None` when unset
    #[serde(default)]
    pub kind: Option<SubjectKind>,
}

impl Subject {
    /// Create a subject of the given kind
    pub fn new(name: impl Into<String>, kind: SubjectKind) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self::new(name, SubjectKind::User)
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, SubjectKind::Group)
    }

    pub fn service_account(name: impl Into<String>) -> Self {
        Self::new(name, SubjectKind::ServiceAccount)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind.map(|k| k.as_str()).unwrap_or("");
        write!(f, "{}:{}", kind, self.name)
    }
}

/// Requested resource. An empty namespace is the global scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    /// Namespace of the resource, empty for global
    #[serde(default)]
    pub namespace: String,

    /// Resource type (e.g. "states", "nodes")
    pub resource: String,

    /// Specific instance, may be empty
    #[serde(default)]
    pub resource_name: String,
}

impl Resource {
    /// Create a resource
    pub fn new(
        namespace: impl Into<String>,
        resource: impl Into<String>,
        resource_name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            resource: resource.into(),
            resource_name: resource_name.into(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}:{:?}:{:?}",
            self.namespace, self.resource, self.resource_name
        )
    }
}

/// One conjunctive permission.
///
/// A request satisfies the rule when its verb is listed, its resource type is
/// listed, and either no resource names are listed or its resource name is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Allowed verbs, at least one, none empty
    pub verbs: Vec<String>,

    /// Allowed resource types, at least one
    pub resources: Vec<String>,

    /// Allowed resource names, empty means any
    #[serde(default)]
    pub resource_names: Vec<String>,
}

impl Rule {
    /// Create a rule applying to every instance of the given resource types
    pub fn new<V, R>(verbs: V, resources: R) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            verbs: verbs.into_iter().map(Into::into).collect(),
            resources: resources.into_iter().map(Into::into).collect(),
            resource_names: Vec::new(),
        }
    }

    /// Restrict the rule to the given resource names
    pub fn with_resource_names<N>(mut self, names: N) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
    {
        self.resource_names = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Named set of rules, OR-combined.
///
/// ```text
/// Name: node-watcher
/// Rules:
/// - Verbs: ["get", "list", "watch"]
///   Resources: ["nodes", "locations"]
/// - Verbs: ["get", "update", "delete"]
///   Resources: ["nodes/states"]
///   ResourceNames: ["linux"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role name
    pub name: String,

    /// Rules, evaluated in order
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Role {
    /// Create a role
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Append a rule
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Grants a role to a list of subjects.
///
/// With an empty namespace the binding applies to every request namespace.
/// Otherwise it only applies to requests for that namespace. The role is
/// referenced by name and may not exist; such a binding never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    /// Unique binding name
    pub name: String,

    /// Name of the granted role
    pub role: String,

    /// Namespace restriction, empty for global
    #[serde(default)]
    pub namespace: String,

    /// Subjects the role is granted to
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl RoleBinding {
    /// Create a global binding without subjects
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            namespace: String::new(),
            subjects: Vec::new(),
        }
    }

    /// Restrict the binding to a namespace
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Add a subject
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }
}

/// A batch of roles and bindings, as produced by a policy loader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySet {
    #[serde(default)]
    pub roles: Vec<Role>,

    #[serde(default)]
    pub role_bindings: Vec<RoleBinding>,
}
