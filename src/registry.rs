//! Node registry with a controlled lifecycle.
//!
//! The registry is an explicit object instead of process-wide state:
//! constructed empty, populated sequentially during load, optionally
//! frozen, then handed to the host for read-only consumption. Duplicate
//! identifiers are an explicit policy decision rather than a silent
//! last-write-wins.

use crate::core::descriptor::NodeDescriptor;
use crate::core::error::{RegistryError, TrellisError, UnsupportedTypeError};
use crate::core::schema::InputSlot;
use crate::core::types::TypeTag;
use indexmap::{IndexMap, IndexSet};

/// How identifier collisions are handled at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Reject the later registration with [`RegistryError::Duplicate`].
    #[default]
    Reject,
    /// Let the later registration replace the earlier one (plugin
    /// override behavior). The replacement is logged.
    Override,
}

/// Registry of node descriptors, keyed by identifier.
///
/// Also owns the set of host-defined custom value kinds: every custom
/// tag a descriptor declares must resolve against this set, so a typo'd
/// or unknown kind fails registration instead of flowing to the host.
pub struct NodeRegistry {
    nodes: IndexMap<String, NodeDescriptor>,
    kinds: IndexSet<String>,
    policy: DuplicatePolicy,
    frozen: bool,
}

impl NodeRegistry {
    /// Create an empty registry with the [`DuplicatePolicy::Reject`] policy.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Create an empty registry with an explicit duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            nodes: IndexMap::new(),
            kinds: IndexSet::new(),
            policy,
            frozen: false,
        }
    }

    /// Create a registry pre-populated with the built-in node set.
    pub fn with_builtins() -> Result<Self, TrellisError> {
        let mut registry = Self::new();
        crate::nodes::register_all(&mut registry)?;
        Ok(registry)
    }

    /// The active duplicate policy.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register a host-defined custom value kind.
    pub fn register_kind(&mut self, tag: impl Into<String>) -> Result<(), RegistryError> {
        let tag = tag.into();
        if self.frozen {
            return Err(RegistryError::Frozen(tag));
        }
        self.kinds.insert(tag);
        Ok(())
    }

    /// Whether a custom kind has been registered.
    pub fn known_kind(&self, tag: &str) -> bool {
        self.kinds.contains(tag)
    }

    /// Registered custom kinds, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(|s| s.as_str())
    }

    /// Register a node descriptor.
    ///
    /// Resolves every custom input/output tag against the registered
    /// kind set, then applies the duplicate policy. Any failure is fatal
    /// to this node's registration and leaves the registry unchanged.
    pub fn register(&mut self, descriptor: NodeDescriptor) -> Result<(), RegistryError> {
        if self.frozen {
            return Err(RegistryError::Frozen(descriptor.id));
        }

        for (name, slot) in &descriptor.inputs {
            if let InputSlot::Custom(tag) = slot {
                if !self.kinds.contains(tag) {
                    return Err(UnsupportedTypeError {
                        node: descriptor.id.clone(),
                        slot: name.clone(),
                        tag: tag.clone(),
                    }
                    .into());
                }
            }
        }
        for (position, tag) in descriptor.outputs.iter().enumerate() {
            if let TypeTag::Custom(tag) = tag {
                if !self.kinds.contains(tag) {
                    return Err(UnsupportedTypeError {
                        node: descriptor.id.clone(),
                        slot: format!("output[{}]", position),
                        tag: tag.clone(),
                    }
                    .into());
                }
            }
        }

        let exists = self.nodes.contains_key(&descriptor.id);
        if exists {
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(RegistryError::Duplicate(descriptor.id));
                }
                DuplicatePolicy::Override => {
                    log::warn!("overriding node '{}'", descriptor.id);
                }
            }
        }

        log::debug!(
            "registered node '{}' ({}): {} inputs, {} outputs",
            descriptor.id,
            descriptor.display_name,
            descriptor.inputs.len(),
            descriptor.outputs.len(),
        );
        self.nodes.insert(descriptor.id.clone(), descriptor);
        Ok(())
    }

    /// Freeze the registry; all further registrations are rejected.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Whether the load phase is over.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Look up a descriptor by identifier.
    pub fn get(&self, id: &str) -> Option<&NodeDescriptor> {
        self.nodes.get(id)
    }

    /// Look up a display name by identifier.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|d| d.display_name.as_str())
    }

    /// Check if a node is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All registered identifiers, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    /// Identifier → descriptor view, in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = (&str, &NodeDescriptor)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Identifier → display name view, parallel to [`descriptors`](Self::descriptors).
    pub fn display_names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .iter()
            .map(|(k, v)| (k.as_str(), v.display_name.as_str()))
    }

    /// Identifiers of all nodes in a category.
    pub fn by_category(&self, category: &str) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, d)| d.category == category)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Total number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
