use super::plantation::Plantation;
use serde::{Deserialize, Serialize};

/// Every plantation on record, keyed by name, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForestRegistry {
    plantations: Vec<Plantation>,
}

impl ForestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plantation, replacing any existing one with the same name.
    pub fn add(&mut self, plantation: Plantation) {
        match self.position(&plantation.name) {
            Some(idx) => self.plantations[idx] = plantation,
            None => self.plantations.push(plantation),
        }
    }

    pub fn list(&self) -> &[Plantation] {
        &self.plantations
    }

    pub fn find(&self, name: &str) -> Option<&Plantation> {
        self.plantations.iter().find(|p| p.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Plantation> {
        self.plantations.iter_mut().find(|p| p.name == name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.plantations.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.plantations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plantations.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.plantations.iter().position(|p| p.name == name)
    }
}
