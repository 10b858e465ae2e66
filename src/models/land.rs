use serde::{Deserialize, Serialize};

/// A registered plot of land. The plantation growing on it is looked up by
/// name in the forest registry; land never holds it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Land {
    pub cadastral_id: u32,
    pub surface: f64,
    pub address: String,
    pub plantation_name: String,
}

impl Land {
    pub fn new(
        cadastral_id: u32,
        surface: f64,
        address: impl Into<String>,
        plantation_name: impl Into<String>,
    ) -> Self {
        Self {
            cadastral_id,
            surface,
            address: address.into(),
            plantation_name: plantation_name.into(),
        }
    }
}

impl std::fmt::Display for Land {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Land {} ({} m², {})",
            self.cadastral_id, self.surface, self.address
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn land_display() {
        let land = Land::new(1001, 50.0, "Route 8 - Km 35", "Experimental");
        assert_eq!(land.to_string(), "Land 1001 (50 m², Route 8 - Km 35)");
    }
}
