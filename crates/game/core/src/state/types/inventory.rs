//! Inventory storage for the character.
//!
//! Every operation returns a new [`InventoryState`]; the receiver is never
//! modified. Ids stay unique: colliding grants are renamed, never dropped.

use std::collections::HashSet;

use super::Item;

/// Ordered collection of items with unique ids.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct InventoryState {
    items: Vec<Item>,
}

impl InventoryState {
    /// Builds an inventory from `items`, renaming any colliding ids.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self::empty().merge_items(items)
    }

    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Inserts `incoming` after the existing items, in call order.
    ///
    /// An incoming id already present (including ids merged earlier in the
    /// same call) is rewritten to `{id}_{n}` using the first free `n >= 2`.
    /// All other fields are preserved.
    #[must_use]
    pub fn merge_items(&self, incoming: impl IntoIterator<Item = Item>) -> Self {
        let mut items = self.items.clone();
        let mut taken: HashSet<String> = items.iter().map(|item| item.id.clone()).collect();

        for item in incoming {
            let item = if taken.contains(&item.id) {
                let id = free_suffixed_id(&item.id, &taken);
                item.renamed(id)
            } else {
                item
            };
            taken.insert(item.id.clone());
            items.push(item);
        }

        Self { items }
    }

    /// Returns the collection without any of `ids`; unknown ids are ignored.
    #[must_use]
    pub fn remove_items<I, S>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: HashSet<String> = ids.into_iter().map(|id| id.as_ref().to_owned()).collect();
        Self {
            items: self
                .items
                .iter()
                .filter(|item| !ids.contains(&item.id))
                .cloned()
                .collect(),
        }
    }

    /// Returns the collection without the first item `id`.
    ///
    /// Other copies of a duplicated id, as found in hand-edited or legacy
    /// saves, stay in place.
    #[must_use]
    pub fn without(&self, id: &str) -> Self {
        let mut items = self.items.clone();
        if let Some(index) = items.iter().position(|item| item.id == id) {
            items.remove(index);
        }
        Self { items }
    }

    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Ids in collection order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.id.as_str())
    }

    /// Returns the first id appearing more than once, if any.
    pub fn duplicate_id(&self) -> Option<&str> {
        self.duplicate_ids().into_iter().next()
    }

    /// Every id appearing more than once, each reported once, in order of
    /// its second appearance.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.ids()
            .filter(|id| !seen.insert(*id) && reported.insert(*id))
            .collect()
    }

    /// Wraps `items` as is, duplicates included.
    #[cfg(test)]
    pub(crate) fn from_items_unchecked(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a InventoryState {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn free_suffixed_id(base: &str, taken: &HashSet<String>) -> String {
    let mut n = 2u64;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ItemKind;
    use crate::stats::{Modifiers, StatKey};

    fn item(id: &str) -> Item {
        Item::new(id, id.to_uppercase(), ItemKind::Weapon)
    }

    #[test]
    fn merge_appends_in_call_order() {
        let inventory = InventoryState::new([item("a"), item("b")]);
        let merged = inventory.merge_items([item("c"), item("d")]);

        assert_eq!(merged.ids().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
        assert_eq!(inventory.len(), 2, "receiver must be untouched");
    }

    #[test]
    fn colliding_ids_take_first_free_suffix() {
        let inventory = InventoryState::new([item("sword"), item("sword_2")]);
        let merged = inventory.merge_items([item("sword"), item("sword"), item("sword_2")]);

        assert_eq!(
            merged.ids().collect::<Vec<_>>(),
            ["sword", "sword_2", "sword_3", "sword_4", "sword_2_2"]
        );
        assert_eq!(merged.duplicate_id(), None);
    }

    #[test]
    fn renamed_items_keep_other_fields() {
        let original = Item::new("ring", "Ring", ItemKind::Accessory)
            .with_description("Shiny")
            .with_modifiers(Modifiers::new().with(StatKey::Int, 2));
        let grant = Item::new("ring", "Other Ring", ItemKind::Accessory)
            .with_description("Dull")
            .with_modifiers(Modifiers::new().with(StatKey::Agi, 1));

        let merged = InventoryState::new([original.clone()]).merge_items([grant.clone()]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.find("ring"), Some(&original));
        assert_eq!(merged.find("ring_2"), Some(&grant.renamed("ring_2")));
    }

    #[test]
    fn collisions_within_one_batch_are_resolved() {
        let merged = InventoryState::empty().merge_items([item("gem"), item("gem"), item("gem")]);
        assert_eq!(merged.ids().collect::<Vec<_>>(), ["gem", "gem_2", "gem_3"]);
    }

    #[test]
    fn remove_ignores_unknown_ids() {
        let inventory = InventoryState::new([item("a"), item("b"), item("c")]);
        let trimmed = inventory.remove_items(["b", "zzz"]);

        assert_eq!(trimmed.ids().collect::<Vec<_>>(), ["a", "c"]);
        assert!(trimmed.find("b").is_none());
        assert!(inventory.contains("b"));
    }

    #[test]
    fn without_takes_only_the_first_copy() {
        let inventory = InventoryState::from_items_unchecked(vec![
            Item::new("sword", "A", ItemKind::Weapon),
            item("b"),
            Item::new("sword", "B", ItemKind::Weapon),
            item("b"),
        ]);
        assert_eq!(inventory.duplicate_ids(), ["sword", "b"]);

        let trimmed = inventory.without("sword");
        assert_eq!(trimmed.ids().collect::<Vec<_>>(), ["b", "sword", "b"]);
        assert_eq!(trimmed.find("sword").map(|item| item.name.as_str()), Some("B"));
        assert_eq!(trimmed.duplicate_ids(), ["b"]);
    }
}
