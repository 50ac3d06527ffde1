use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::model::{
    department::Department,
    navigation::{IconRef::*, NavigationEntry as Nav},
    role::Role,
};

// ---------- department-less roles ----------

const SUPERADMIN: &[Nav] = &[
    Nav::new("Dashboard", "/superadmin/dashboard", Dashboard),
    Nav::new("Departments", "/superadmin/departments", Building),
    Nav::new("Users", "/superadmin/users", Users),
    Nav::new("Roles & Permissions", "/superadmin/roles", Shield),
    Nav::new("Reports", "/superadmin/reports", ChartBar),
    Nav::new("Settings", "/superadmin/settings", Settings),
];

const ADMIN: &[Nav] = &[
    Nav::new("Dashboard", "/admin/dashboard", Dashboard),
    Nav::new("Users", "/admin/users", Users),
    Nav::new("Job Postings", "/admin/jobs", Briefcase),
    Nav::new("Applications", "/admin/applications", Inbox),
    Nav::new("Reports", "/admin/reports", ChartBar),
    Nav::new("Settings", "/admin/settings", Settings),
];

const CEO: &[Nav] = &[
    Nav::new("Dashboard", "/ceo/dashboard", Dashboard),
    Nav::new("Departments", "/ceo/departments", Building),
    Nav::new("Financial Overview", "/ceo/finance", Wallet),
    Nav::new("Performance", "/ceo/performance", ChartBar),
    Nav::new("Announcements", "/ceo/announcements", Megaphone),
];

// ---------- managers ----------

const HR_MANAGER: &[Nav] = &[
    Nav::new("Dashboard", "/hr/manager/dashboard", Dashboard),
    Nav::new("Employees", "/hr/manager/employees", Users),
    Nav::new("Attendance", "/hr/manager/attendance", Clock),
    Nav::new("Leave Requests", "/hr/manager/leaves", Calendar),
    Nav::new("Recruitment", "/hr/manager/recruitment", UserPlus),
    Nav::new("Payroll", "/hr/manager/payroll", Wallet),
];

const IOT_MANAGER: &[Nav] = &[
    Nav::new("Dashboard", "/iot/manager/dashboard", Dashboard),
    Nav::new("Team", "/iot/manager/team", Users),
    Nav::new("Attendance", "/iot/manager/attendance", Clock),
    Nav::new("Devices", "/iot/manager/devices", Cpu),
    Nav::new("Projects", "/iot/manager/projects", Briefcase),
];

const SOFTWARE_MANAGER: &[Nav] = &[
    Nav::new("Dashboard", "/software/manager/dashboard", Dashboard),
    Nav::new("Team", "/software/manager/team", Users),
    Nav::new("Attendance", "/software/manager/attendance", Clock),
    Nav::new("Projects", "/software/manager/projects", Code),
    Nav::new("Issues", "/software/manager/issues", Bug),
];

const FINANCIAL_MANAGER: &[Nav] = &[
    Nav::new("Dashboard", "/financial/manager/dashboard", Dashboard),
    Nav::new("Team", "/financial/manager/team", Users),
    Nav::new("Attendance", "/financial/manager/attendance", Clock),
    Nav::new("Invoices", "/financial/manager/invoices", FileText),
    Nav::new("Budgets", "/financial/manager/budgets", Wallet),
    Nav::new("Reports", "/financial/manager/reports", ChartBar),
];

const BUSINESS_MANAGER: &[Nav] = &[
    Nav::new("Dashboard", "/business/manager/dashboard", Dashboard),
    Nav::new("Team", "/business/manager/team", Users),
    Nav::new("Attendance", "/business/manager/attendance", Clock),
    Nav::new("Clients", "/business/manager/clients", Handshake),
    Nav::new("Campaigns", "/business/manager/campaigns", Megaphone),
];

// ---------- employees ----------

const HR_EMPLOYEE: &[Nav] = &[
    Nav::new("Dashboard", "/hr/employee/dashboard", Dashboard),
    Nav::new("Candidates", "/hr/employee/candidates", UserPlus),
    Nav::new("Onboarding", "/hr/employee/onboarding", FileText),
    Nav::new("My Attendance", "/hr/employee/attendance", Clock),
    Nav::new("Leave", "/hr/employee/leave", Calendar),
];

const IOT_EMPLOYEE: &[Nav] = &[
    Nav::new("Dashboard", "/iot/employee/dashboard", Dashboard),
    Nav::new("Devices", "/iot/employee/devices", Cpu),
    Nav::new("Tasks", "/iot/employee/tasks", Briefcase),
    Nav::new("My Attendance", "/iot/employee/attendance", Clock),
    Nav::new("Leave", "/iot/employee/leave", Calendar),
];

const SOFTWARE_EMPLOYEE: &[Nav] = &[
    Nav::new("Dashboard", "/software/employee/dashboard", Dashboard),
    Nav::new("Tasks", "/software/employee/tasks", Code),
    Nav::new("Issues", "/software/employee/issues", Bug),
    Nav::new("My Attendance", "/software/employee/attendance", Clock),
    Nav::new("Leave", "/software/employee/leave", Calendar),
];

const FINANCIAL_EMPLOYEE: &[Nav] = &[
    Nav::new("Dashboard", "/financial/employee/dashboard", Dashboard),
    Nav::new("Invoices", "/financial/employee/invoices", FileText),
    Nav::new("Expenses", "/financial/employee/expenses", Wallet),
    Nav::new("My Attendance", "/financial/employee/attendance", Clock),
    Nav::new("Leave", "/financial/employee/leave", Calendar),
];

const BUSINESS_EMPLOYEE: &[Nav] = &[
    Nav::new("Dashboard", "/business/employee/dashboard", Dashboard),
    Nav::new("Leads", "/business/employee/leads", Handshake),
    Nav::new("Campaigns", "/business/employee/campaigns", Megaphone),
    Nav::new("My Attendance", "/business/employee/attendance", Clock),
    Nav::new("Leave", "/business/employee/leave", Calendar),
];

// ---------- interns ----------

const HR_INTERN: &[Nav] = &[
    Nav::new("Dashboard", "/hr/intern/dashboard", Dashboard),
    Nav::new("Learning", "/hr/intern/learning", GraduationCap),
    Nav::new("My Attendance", "/hr/intern/attendance", Clock),
];

const IOT_INTERN: &[Nav] = &[
    Nav::new("Dashboard", "/iot/intern/dashboard", Dashboard),
    Nav::new("Learning", "/iot/intern/learning", GraduationCap),
    Nav::new("Devices", "/iot/intern/devices", Cpu),
    Nav::new("My Attendance", "/iot/intern/attendance", Clock),
];

const SOFTWARE_INTERN: &[Nav] = &[
    Nav::new("Dashboard", "/software/intern/dashboard", Dashboard),
    Nav::new("Learning", "/software/intern/learning", GraduationCap),
    Nav::new("Tasks", "/software/intern/tasks", Code),
    Nav::new("My Attendance", "/software/intern/attendance", Clock),
];

const FINANCIAL_INTERN: &[Nav] = &[
    Nav::new("Dashboard", "/financial/intern/dashboard", Dashboard),
    Nav::new("Learning", "/financial/intern/learning", GraduationCap),
    Nav::new("My Attendance", "/financial/intern/attendance", Clock),
];

const BUSINESS_INTERN: &[Nav] = &[
    Nav::new("Dashboard", "/business/intern/dashboard", Dashboard),
    Nav::new("Learning", "/business/intern/learning", GraduationCap),
    Nav::new("Leads", "/business/intern/leads", Handshake),
    Nav::new("My Attendance", "/business/intern/attendance", Clock),
];

/// Navigation for roles that ignore department.
pub static ROLE_TABLE: Lazy<HashMap<Role, &'static [Nav]>> = Lazy::new(|| {
    HashMap::from([
        (Role::Superadmin, SUPERADMIN),
        (Role::Admin, ADMIN),
        (Role::Ceo, CEO),
    ])
});

/// Navigation for department-scoped roles, keyed by role tier then department.
pub static DEPARTMENT_TABLE: Lazy<HashMap<Role, HashMap<Department, &'static [Nav]>>> =
    Lazy::new(|| {
        HashMap::from([
            (
                Role::Manager,
                HashMap::from([
                    (Department::Hr, HR_MANAGER),
                    (Department::Iot, IOT_MANAGER),
                    (Department::Software, SOFTWARE_MANAGER),
                    (Department::Financial, FINANCIAL_MANAGER),
                    (Department::Business, BUSINESS_MANAGER),
                ]),
            ),
            (
                Role::Employee,
                HashMap::from([
                    (Department::Hr, HR_EMPLOYEE),
                    (Department::Iot, IOT_EMPLOYEE),
                    (Department::Software, SOFTWARE_EMPLOYEE),
                    (Department::Financial, FINANCIAL_EMPLOYEE),
                    (Department::Business, BUSINESS_EMPLOYEE),
                ]),
            ),
            (
                Role::Intern,
                HashMap::from([
                    (Department::Hr, HR_INTERN),
                    (Department::Iot, IOT_INTERN),
                    (Department::Software, SOFTWARE_INTERN),
                    (Department::Financial, FINANCIAL_INTERN),
                    (Department::Business, BUSINESS_INTERN),
                ]),
            ),
        ])
    });

#[cfg(test)]
pub(super) const HR_MANAGER_TABLE: &[Nav] = HR_MANAGER;
#[cfg(test)]
pub(super) const SUPERADMIN_TABLE: &[Nav] = SUPERADMIN;
