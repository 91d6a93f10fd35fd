use std::collections::VecDeque;

use super::types::ClientId;

/// FIFO of clients waiting for a partner.
///
/// Duplicate entries are not guarded against here; the coordinator only enqueues
/// clients that are connected and unpaired.
#[derive(Debug, Default)]
pub struct WaitingQueue {
    entries: VecDeque<ClientId>,
}

impl WaitingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, id: ClientId) {
        debug_assert!(!self.contains(&id), "client {} enqueued twice", id);
        self.entries.push_back(id);
    }

    /// Takes the two oldest entries.
    ///
    /// If both entries name the same client, the second is put back at the head and
    /// the next two are tried instead.
    pub fn dequeue_pair(&mut self) -> Option<(ClientId, ClientId)> {
        while self.entries.len() >= 2 {
            let a = self.entries.pop_front()?;
            let b = self.entries.pop_front()?;
            if a == b {
                self.entries.push_front(b);
                continue;
            }
            return Some((a, b));
        }
        None
    }

    /// Returns true if the client was queued.
    pub fn remove(&mut self, id: &ClientId) -> bool {
        match self.entries.iter().position(|entry| entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: &ClientId) -> bool {
        self.entries.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &ClientId> {
        self.entries.iter()
    }
}
