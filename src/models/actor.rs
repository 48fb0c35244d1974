//! Actor, role and capability models.
//!
//! The review workflow never compares role names. Each actor's role is
//! resolved once into a [`CapabilitySet`] via the configured role table, and
//! the ownership capability is added per form by [`Actor::capabilities_for`].

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::RoleCapabilities;

use super::{FormOwner, PerformanceForm};

/// An organizational role as recorded by the portal's user store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Rank-and-file employee.
    Employee,
    /// Division chief or immediate supervisor.
    Supervisor,
    /// Head of office; reviews and finalizes.
    OfficeHead,
    /// HR manager; finalizes and manages office-level forms.
    HrManager,
    /// System administrator.
    Administrator,
}

impl Role {
    /// All roles, in ascending order.
    pub const ALL: [Role; 5] = [
        Role::Employee,
        Role::Supervisor,
        Role::OfficeHead,
        Role::HrManager,
        Role::Administrator,
    ];
}

/// An abstract permission, independent of the role that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Owns the form. Derived from the form, never granted by a role.
    Own,
    /// First-pass reviewer.
    Review,
    /// Final authority over ratings.
    Finalize,
    /// May create office-level (DPCR/OPCR) forms for any division.
    ManageOfficeForms,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Own => "own",
            Capability::Review => "review",
            Capability::Finalize => "finalize",
            Capability::ManageOfficeForms => "manage_office_forms",
        };
        f.write_str(name)
    }
}

/// A set of capabilities held by an actor.
///
/// # Example
///
/// ```
/// use hr_engine::models::{Capability, CapabilitySet};
///
/// let set = CapabilitySet::from_iter([Capability::Review, Capability::Finalize]);
/// assert!(set.contains(Capability::Finalize));
/// assert!(set.contains_any(&[Capability::Own, Capability::Review]));
/// assert!(!set.contains(Capability::Own));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the set holds `capability`.
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Returns true if the set holds at least one of `capabilities`.
    pub fn contains_any(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().any(|c| self.0.contains(c))
    }

    /// Adds a capability, returning the set.
    pub fn with(mut self, capability: Capability) -> Self {
        self.0.insert(capability);
        self
    }

    /// Iterates over the held capabilities in order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    /// Returns true if no capability is held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The current user as seen by the review workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's employee identifier.
    pub id: String,
    /// The actor's organizational role.
    pub role: Role,
    /// The division the actor heads, if any.
    #[serde(default)]
    pub headed_division: Option<String>,
    /// Capabilities resolved from `role`.
    pub capabilities: CapabilitySet,
}

impl Actor {
    /// Resolves an actor's capabilities from the role table.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::config::RoleCapabilities;
    /// use hr_engine::models::{Actor, Capability, Role};
    ///
    /// let actor = Actor::resolve("emp_100", Role::OfficeHead, None, &RoleCapabilities::default());
    /// assert!(actor.capabilities.contains(Capability::Review));
    /// assert!(actor.capabilities.contains(Capability::Finalize));
    /// ```
    pub fn resolve(
        id: impl Into<String>,
        role: Role,
        headed_division: Option<String>,
        table: &RoleCapabilities,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            headed_division,
            capabilities: table.capabilities_for(role),
        }
    }

    /// Returns true if the actor is the employee or division head owning the form.
    pub fn owns(&self, form: &PerformanceForm) -> bool {
        match &form.owner {
            FormOwner::Employee { employee_id } => *employee_id == self.id,
            FormOwner::Division { division_id } => {
                self.headed_division.as_deref() == Some(division_id.as_str())
            }
        }
    }

    /// The actor's capabilities with respect to one form.
    pub fn capabilities_for(&self, form: &PerformanceForm) -> CapabilitySet {
        if self.owns(form) {
            self.capabilities.clone().with(Capability::Own)
        } else {
            self.capabilities.clone()
        }
    }
}
