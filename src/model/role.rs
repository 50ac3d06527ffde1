use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
    Ceo,
    Manager,
    Employee,
    Intern,
}

impl Role {
    /// Roles that are scoped to a department.
    pub const DEPARTMENT_SCOPED: [Role; 3] = [Role::Manager, Role::Employee, Role::Intern];

    /// Roles that make up a department's attendance roster.
    pub const ROSTER: [Role; 2] = [Role::Employee, Role::Intern];

    /// Superadmin, admin and ceo act across the whole organisation.
    pub fn is_department_less(&self) -> bool {
        matches!(self, Role::Superadmin | Role::Admin | Role::Ceo)
    }

    /// Roles open to anonymous sign-up.
    pub fn is_self_service(&self) -> bool {
        Self::ROSTER.contains(self)
    }

    /// Whether a caller holding this role may create an account with `target`.
    pub fn may_provision(&self, target: Role) -> bool {
        match self {
            Role::Superadmin => true,
            Role::Admin => target != Role::Superadmin,
            _ => target.is_self_service(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().to_lowercase().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn names_round_trip() {
        for role in Role::iter() {
            assert_eq!(Role::from_name(role.as_ref()), Some(role));
        }
        assert_eq!(Role::from_name(" Manager "), Some(Role::Manager));
        assert_eq!(Role::from_name("owner"), None);
    }

    #[test]
    fn department_scoping() {
        assert!(Role::Ceo.is_department_less());
        assert!(!Role::Intern.is_department_less());
        assert!(Role::DEPARTMENT_SCOPED.iter().all(|r| !r.is_department_less()));
    }

    #[test]
    fn only_administrators_hand_out_privileged_roles() {
        assert!(Role::Employee.is_self_service());
        assert!(!Role::Manager.is_self_service());

        assert!(Role::Superadmin.may_provision(Role::Superadmin));
        assert!(Role::Admin.may_provision(Role::Manager));
        assert!(!Role::Admin.may_provision(Role::Superadmin));
        assert!(!Role::Manager.may_provision(Role::Manager));
        assert!(!Role::Ceo.may_provision(Role::Admin));
        assert!(Role::Manager.may_provision(Role::Intern));
    }
}
