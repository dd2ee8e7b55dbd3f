use serde::{Deserialize, Serialize};

/// Account kinds the backend issues. The wire names are the only accepted spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Farmer,
    WarehouseAdmin,
    SystemAdmin,
}

/// A header navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub url: &'static str,
    pub is_active: bool,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Farmer => "Farmer",
            Role::WarehouseAdmin => "Warehouse Admin",
            Role::SystemAdmin => "System Admin",
        }
    }

    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Farmer => "/farmer/dashboard",
            Role::WarehouseAdmin => "/warehouse/dashboard",
            Role::SystemAdmin => "/admin/dashboard",
        }
    }

    /// Header links for this role, with the one matching `current_path` marked active.
    pub fn navigation(&self, current_path: &str) -> Vec<NavItem> {
        let links: &[(&'static str, &'static str)] = match self {
            Role::Farmer => &[
                ("Dashboard", "/farmer/dashboard"),
                ("Waiting Lists", "/farmer/waiting-lists"),
                ("Profile", "/profile"),
            ],
            Role::WarehouseAdmin => &[
                ("Dashboard", "/warehouse/dashboard"),
                ("Profile", "/profile"),
            ],
            Role::SystemAdmin => &[
                ("Dashboard", "/admin/dashboard"),
                ("Profile", "/profile"),
            ],
        };
        links
            .iter()
            .map(|&(label, url)| NavItem {
                label,
                url,
                is_active: current_path == url || current_path.starts_with(&format!("{url}/")),
            })
            .collect()
    }
}
