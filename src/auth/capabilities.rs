//! Capabilities checked against the acting user on catalog mutations.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Capability definition
#[derive(Debug, Clone)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub resource: String,
    pub action: String,
}

pub const RESOURCE_SNEAKERS: &str = "sneakers";

/// Capability string constants for compile-time safety
pub mod consts {
    pub const SNEAKERS_CREATE: &str = "sneakers:create";
    pub const SNEAKERS_UPDATE: &str = "sneakers:update";
    pub const SNEAKERS_DELETE: &str = "sneakers:delete";
}

/// Format a capability string
pub fn format_capability(resource: &str, action: &str) -> String {
    format!("{}:{}", resource, action)
}

lazy_static! {
    /// Registry of every capability the catalog checks, keyed by name.
    pub static ref CAPABILITIES: HashMap<String, Capability> = {
        let mut caps = HashMap::new();

        for (action, description) in [
            ("create", "Create sneakers"),
            ("update", "Update existing sneakers"),
            ("delete", "Soft-delete sneakers"),
        ] {
            let name = format_capability(RESOURCE_SNEAKERS, action);
            caps.insert(
                name.clone(),
                Capability {
                    name,
                    description: description.to_string(),
                    resource: RESOURCE_SNEAKERS.to_string(),
                    action: action.to_string(),
                },
            );
        }

        caps
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_all_mutation_capabilities() {
        for cap in [consts::SNEAKERS_CREATE, consts::SNEAKERS_UPDATE, consts::SNEAKERS_DELETE] {
            assert!(CAPABILITIES.contains_key(cap), "missing capability {}", cap);
        }
        assert_eq!(CAPABILITIES.len(), 3);
    }
}
