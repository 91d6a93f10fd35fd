use std::collections::HashMap;

use super::types::ClientId;

/// Symmetric partner map: if `a -> b` is present then so is `b -> a`.
#[derive(Debug, Default)]
pub struct PairingTable {
    partners: HashMap<ClientId, ClientId>,
}

impl PairingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `a <-> b`. Neither side may already be paired.
    pub fn pair(&mut self, a: ClientId, b: ClientId) {
        debug_assert_ne!(a, b, "client {} paired with itself", a);
        debug_assert!(!self.is_paired(&a) && !self.is_paired(&b));
        self.partners.insert(a, b);
        self.partners.insert(b, a);
    }

    pub fn partner_of(&self, id: &ClientId) -> Option<ClientId> {
        self.partners.get(id).copied()
    }

    pub fn is_paired(&self, id: &ClientId) -> bool {
        self.partners.contains_key(id)
    }

    /// Drops both directions of the pairing and returns the former partner.
    pub fn unpair(&mut self, id: &ClientId) -> Option<ClientId> {
        let partner = self.partners.remove(id)?;
        self.partners.remove(&partner);
        Some(partner)
    }

    /// Number of pairs (not entries).
    pub fn len(&self) -> usize {
        self.partners.len() / 2
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}
