//! Role/department navigation lookup.
//!
//! The sidebar a user sees and the set of pages they may open come from the
//! same static table. Lookups never fail: an unknown role or department
//! simply yields no navigation.

mod table;

use crate::model::{department::Department, navigation::NavigationEntry, role::Role};

/// Ordered navigation entries for `(role, department)`.
pub fn resolve(role: Option<Role>, department: Option<Department>) -> &'static [NavigationEntry] {
    let Some(role) = role else {
        return &[];
    };

    if role.is_department_less() {
        return table::ROLE_TABLE.get(&role).copied().unwrap_or(&[]);
    }

    department
        .and_then(|d| table::DEPARTMENT_TABLE.get(&role)?.get(&d).copied())
        .unwrap_or(&[])
}

/// Same as [`resolve`] for unparsed names; anything unrecognised counts as absent.
pub fn resolve_raw(role: Option<&str>, department: Option<&str>) -> &'static [NavigationEntry] {
    resolve(
        role.and_then(Role::from_name),
        department.and_then(Department::from_name),
    )
}

/// Whether `path` is one of the user's pages or nested below one.
pub fn can_access(role: Option<Role>, department: Option<Department>, path: &str) -> bool {
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        return false;
    }
    resolve(role, department).iter().any(|entry| entry.covers(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn hr_manager_gets_declared_order() {
        let nav = resolve(Some(Role::Manager), Some(Department::Hr));
        assert_eq!(nav, table::HR_MANAGER_TABLE);

        let names: Vec<_> = nav.iter().map(|n| n.name).collect();
        assert_eq!(
            names,
            [
                "Dashboard",
                "Employees",
                "Attendance",
                "Leave Requests",
                "Recruitment",
                "Payroll"
            ]
        );
    }

    #[test]
    fn unknown_department_is_empty() {
        assert!(resolve_raw(Some("manager"), Some("unknown")).is_empty());
        assert!(resolve(Some(Role::Employee), None).is_empty());
    }

    #[test]
    fn missing_role_is_empty() {
        assert!(resolve(None, Some(Department::Hr)).is_empty());
        assert!(resolve_raw(None, None).is_empty());
        assert!(resolve_raw(Some("janitor"), Some("hr")).is_empty());
    }

    #[test]
    fn superadmin_ignores_department() {
        for department in Department::iter() {
            assert_eq!(
                resolve(Some(Role::Superadmin), Some(department)),
                table::SUPERADMIN_TABLE
            );
        }
        assert_eq!(resolve(Some(Role::Superadmin), None), table::SUPERADMIN_TABLE);
    }

    #[test]
    fn every_combination_has_navigation() {
        for role in Role::iter() {
            if role.is_department_less() {
                assert!(!resolve(Some(role), None).is_empty(), "{role}");
                continue;
            }
            for department in Department::iter() {
                assert!(
                    !resolve(Some(role), Some(department)).is_empty(),
                    "{role}/{department}"
                );
            }
        }
    }

    #[test]
    fn nested_pages_are_reachable() {
        let (role, dept) = (Some(Role::Manager), Some(Department::Hr));
        assert!(can_access(role, dept, "/hr/manager/attendance"));
        assert!(can_access(role, dept, "/hr/manager/attendance/42/"));
        assert!(!can_access(role, dept, "/hr/manager/attendance-export"));
        assert!(!can_access(role, dept, "/iot/manager/devices"));
        assert!(!can_access(role, dept, "/"));
        assert!(!can_access(None, None, "/hr/manager/dashboard"));
    }
}
