use serde::Serialize;
use strum_macros::AsRefStr;
use utoipa::ToSchema;

/// Icon identifiers understood by the sidebar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, AsRefStr, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum IconRef {
    Dashboard,
    Users,
    UserPlus,
    Calendar,
    Clock,
    Briefcase,
    FileText,
    Wallet,
    ChartBar,
    Cpu,
    Code,
    Bug,
    Handshake,
    Megaphone,
    Settings,
    Shield,
    Building,
    Inbox,
    GraduationCap,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({ "name": "Attendance", "path": "/hr/manager/attendance", "icon": "clock" }))]
pub struct NavigationEntry {
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub path: &'static str,
    pub icon: IconRef,
}

impl NavigationEntry {
    pub const fn new(name: &'static str, path: &'static str, icon: IconRef) -> Self {
        Self { name, path, icon }
    }

    /// True when `path` is this entry's page or a page nested under it.
    pub fn covers(&self, path: &str) -> bool {
        match path.strip_prefix(self.path) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}
