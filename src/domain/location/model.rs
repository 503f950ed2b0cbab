//! Location domain entity

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i32,
    /// Unique across all locations
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub address: Option<Option<String>>,
}

impl LocationPatch {
    pub fn apply(self, location: &mut Location) {
        if let Some(name) = self.name {
            location.name = name;
        }
        if let Some(address) = self.address {
            location.address = address;
        }
    }
}
