use std::collections::HashSet;

use super::types::ClientId;

/// Set of currently connected clients.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connected: HashSet<ClientId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the client was already registered.
    pub fn insert(&mut self, id: ClientId) -> bool {
        self.connected.insert(id)
    }

    /// Returns false if the client was not registered.
    pub fn remove(&mut self, id: &ClientId) -> bool {
        self.connected.remove(id)
    }

    pub fn contains(&self, id: &ClientId) -> bool {
        self.connected.contains(id)
    }

    pub fn count(&self) -> usize {
        self.connected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientId> {
        self.connected.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_follows_membership() {
        let mut registry = ConnectionRegistry::new();
        let a = ClientId::new();
        let b = ClientId::new();

        assert!(registry.insert(a));
        assert!(registry.insert(b));
        assert!(!registry.insert(a));
        assert_eq!(registry.count(), 2);

        assert!(registry.remove(&a));
        assert!(!registry.remove(&a));
        assert_eq!(registry.count(), 1);
        assert!(registry.contains(&b));
        assert!(!registry.contains(&a));
    }
}
