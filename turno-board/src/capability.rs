//! Role to capability resolution
//!
//! The single place that decides what a signed-in user may do on the
//! board. UI code and the workflows query capabilities, never role names.

use shared::models::{RoleName, UserDetail};

/// An action the board can gate on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// See the rotation board
    ViewRotation,
    /// Move an employee to a different block
    ReassignTurn,
    /// Skip an employee's turn in the running block
    SkipTurn,
    /// Inspect another employee's block history
    ViewEmployeeBlocks,
}

/// Resolved capability set for one user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    granted: Vec<Capability>,
}

impl CapabilitySet {
    /// Resolve capabilities from the user's role list
    ///
    /// Every role can view the board; only area administrators (Jefe de
    /// Área) get the turn mutation capabilities.
    pub fn for_roles(roles: &[RoleName]) -> Self {
        let mut granted = Vec::new();
        for role in roles {
            match role {
                RoleName::AreaAdmin => {
                    granted.extend([
                        Capability::ViewRotation,
                        Capability::ReassignTurn,
                        Capability::SkipTurn,
                        Capability::ViewEmployeeBlocks,
                    ]);
                }
                RoleName::SuperUser
                | RoleName::Admin
                | RoleName::GroupLeader
                | RoleName::IndustrialEngineer
                | RoleName::UnionRepresentative => {
                    granted.extend([Capability::ViewRotation, Capability::ViewEmployeeBlocks]);
                }
                RoleName::Unionized => {
                    granted.push(Capability::ViewRotation);
                }
                RoleName::Unknown => {}
            }
        }
        granted.sort_by_key(|c| *c as u8);
        granted.dedup();
        Self { granted }
    }

    /// Resolve capabilities for a full user record
    pub fn for_user(user: &UserDetail) -> Self {
        Self::for_roles(&user.roles)
    }

    pub fn allows(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_admin_may_reassign() {
        let caps = CapabilitySet::for_roles(&[RoleName::AreaAdmin]);
        assert!(caps.allows(Capability::ViewRotation));
        assert!(caps.allows(Capability::ReassignTurn));
        assert!(caps.allows(Capability::SkipTurn));
    }

    #[test]
    fn test_group_leader_is_read_only() {
        let caps = CapabilitySet::for_roles(&[RoleName::GroupLeader]);
        assert!(caps.allows(Capability::ViewRotation));
        assert!(caps.allows(Capability::ViewEmployeeBlocks));
        assert!(!caps.allows(Capability::ReassignTurn));
        assert!(!caps.allows(Capability::SkipTurn));
    }

    #[test]
    fn test_unionized_only_views() {
        let caps = CapabilitySet::for_roles(&[RoleName::Unionized]);
        assert!(caps.allows(Capability::ViewRotation));
        assert!(!caps.allows(Capability::ViewEmployeeBlocks));
        assert!(!caps.allows(Capability::ReassignTurn));
    }

    #[test]
    fn test_no_roles_grants_nothing() {
        let caps = CapabilitySet::for_roles(&[]);
        assert!(caps.is_empty());
    }

    #[test]
    fn test_unrecognized_role_grants_nothing() {
        let caps = CapabilitySet::for_roles(&[RoleName::Unknown]);
        assert!(caps.is_empty());
        let mixed = CapabilitySet::for_roles(&[RoleName::Unknown, RoleName::Unionized]);
        assert!(mixed.allows(Capability::ViewRotation));
        assert!(!mixed.allows(Capability::ReassignTurn));
    }

    #[test]
    fn test_multiple_roles_union_without_duplicates() {
        let caps = CapabilitySet::for_roles(&[RoleName::Unionized, RoleName::AreaAdmin]);
        assert!(caps.allows(Capability::ReassignTurn));
        let again = CapabilitySet::for_roles(&[RoleName::AreaAdmin, RoleName::Unionized]);
        assert_eq!(caps, again);
    }
}
