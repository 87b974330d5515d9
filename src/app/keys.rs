//! Named-key bindings.
//!
//! A small registry mapping named keys to commands. Views bind the keys they
//! care about after every event, and a binding fires at most once per bind:
//! [`KeyBindings::take`] removes it. This keeps a stale view from reacting to
//! a key after it has gone away.

use std::collections::BTreeMap;

/// Keys that can carry a view-specific meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NamedKey {
    Escape,
    Enter,
}

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Close the open detail without saving.
    CloseDetail,
    /// Add the open detail to the watchlist with the drafted rating.
    ConfirmRating,
    /// Move focus to the search box and clear the query.
    FocusSearch,
}

/// Registry of active named-key bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: BTreeMap<NamedKey, KeyCommand>,
}

impl KeyBindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key`, replacing an existing binding.
    pub fn bind(&mut self, key: NamedKey, command: KeyCommand) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: NamedKey) {
        self.bindings.remove(&key);
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Fires the binding of `key`, removing it.
    pub fn take(&mut self, key: NamedKey) -> Option<KeyCommand> {
        self.bindings.remove(&key)
    }

    #[must_use]
    pub fn get(&self, key: NamedKey) -> Option<KeyCommand> {
        self.bindings.get(&key).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_fires_once() {
        let mut keys = KeyBindings::new();
        keys.bind(NamedKey::Escape, KeyCommand::CloseDetail);

        assert_eq!(keys.take(NamedKey::Escape), Some(KeyCommand::CloseDetail));
        assert_eq!(keys.take(NamedKey::Escape), None);
    }

    #[test]
    fn rebinding_replaces_command() {
        let mut keys = KeyBindings::new();
        keys.bind(NamedKey::Enter, KeyCommand::FocusSearch);
        keys.bind(NamedKey::Enter, KeyCommand::ConfirmRating);

        assert_eq!(keys.get(NamedKey::Enter), Some(KeyCommand::ConfirmRating));
        keys.unbind(NamedKey::Enter);
        assert!(keys.is_empty());
    }
}
