//! Unique identifiers for provisioned resources.

/// A 32-character lowercase hex suffix for globally-unique resource names
/// (Connect instance aliases share a global namespace).
pub fn unique_alias() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
