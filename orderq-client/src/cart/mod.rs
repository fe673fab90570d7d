//! In-progress order built by staff on behalf of a table
//!
//! Cart entries live only in local state: created on add, merged when an
//! identical line is added again, destroyed on removal or successful
//! submission. Identity is structural (item uuid + selection + note); a
//! client-local entry id is the handle for mutations and keeps
//! intentionally distinct lines (post-edit splits) apart.

mod money;
mod selection;
mod submit;

pub use selection::{is_locked, Choice, Selection};
pub use submit::{build_order_lines, submit_order, OrderPlacer};

use rust_decimal::Decimal;
use shared::models::MenuItem;
use thiserror::Error;

use money::{to_decimal, to_f64};

/// Cart-local failures, blocked before any network call
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Quantity must be positive")]
    InvalidQuantity,

    #[error("No cart entry with id {0}")]
    UnknownEntry(u64),

    #[error("Cannot split {portion} units out of {available}")]
    SplitOutOfRange { portion: u32, available: u32 },

    #[error("Unknown configuration group: {0}")]
    UnknownGroup(String),

    #[error("Unknown configuration option: {0}")]
    UnknownOption(String),

    #[error("Selection is fixed: {0}")]
    FixedSelection(String),

    #[error("Item is not orderable: {0}")]
    ItemUnavailable(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Menu item not found: {0}")]
    UnknownItem(String),
}

/// One line of the in-progress order
#[derive(Debug, Clone)]
pub struct CartEntry {
    /// Client-local handle, unique within the cart
    pub id: u64,
    /// Original menu item uuid
    pub item_uuid: String,
    pub title: String,
    /// Base price plus configuration delta, fixed at add time
    pub unit_price: f64,
    pub quantity: u32,
    pub note: Option<String>,
    pub selection: Selection,
    /// Sum of selected option deltas at add time
    pub configuration_delta: f64,
    /// Always `unit_price * quantity`
    pub total: f64,
}

impl CartEntry {
    fn recompute_total(&mut self) {
        self.total = to_f64(to_decimal(self.unit_price) * Decimal::from(self.quantity));
    }

    /// Whether another add with these parameters should merge into this entry
    fn merges_with(&self, item_uuid: &str, selection: &Selection) -> bool {
        self.note.is_none() && self.item_uuid == item_uuid && self.selection == *selection
    }
}

/// Ordered collection of cart entries
#[derive(Debug, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
    next_id: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item with the given selection and note.
    ///
    /// Merges into an existing entry only when item, selection, and
    /// absence of a note all match; any note keeps the line separate.
    /// Returns the id of the affected entry.
    pub fn add(
        &mut self,
        item: &MenuItem,
        selection: Selection,
        note: Option<String>,
        quantity: u32,
    ) -> Result<u64, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if !item.is_orderable() {
            return Err(CartError::ItemUnavailable(item.title.clone()));
        }

        let note = normalize_note(note);

        if note.is_none() {
            if let Some(entry) = self
                .entries
                .iter_mut()
                .find(|e| e.merges_with(&item.uuid, &selection))
            {
                entry.quantity += quantity;
                entry.recompute_total();
                return Ok(entry.id);
            }
        }

        let id = self.push_entry(item, selection, note, quantity);
        Ok(id)
    }

    /// Increase an entry's quantity by one
    pub fn increment(&mut self, entry_id: u64) -> Result<(), CartError> {
        let entry = self.entry_mut(entry_id)?;
        entry.quantity += 1;
        entry.recompute_total();
        Ok(())
    }

    /// Decrease an entry's quantity by one, deleting it at zero
    pub fn remove_one(&mut self, entry_id: u64) -> Result<(), CartError> {
        let entry = self.entry_mut(entry_id)?;
        if entry.quantity > 1 {
            entry.quantity -= 1;
            entry.recompute_total();
        } else {
            self.entries.retain(|e| e.id != entry_id);
        }
        Ok(())
    }

    /// Delete an entry entirely, regardless of quantity
    pub fn remove_entry(&mut self, entry_id: u64) -> Result<(), CartError> {
        self.entry(entry_id)?;
        self.entries.retain(|e| e.id != entry_id);
        Ok(())
    }

    /// Edit `portion` units of an entry into a new line with its own
    /// selection, note, and price.
    ///
    /// The edited portion becomes a brand-new entry (never merged); the
    /// remainder keeps the original entry, which is replaced outright
    /// when the whole quantity is edited. Returns the new entry's id.
    pub fn split_edit(
        &mut self,
        entry_id: u64,
        portion: u32,
        item: &MenuItem,
        new_selection: Selection,
        new_note: Option<String>,
    ) -> Result<u64, CartError> {
        let (index, available) = {
            let (index, entry) = self
                .entries
                .iter()
                .enumerate()
                .find(|(_, e)| e.id == entry_id)
                .ok_or(CartError::UnknownEntry(entry_id))?;
            (index, entry.quantity)
        };
        if portion == 0 || portion > available {
            return Err(CartError::SplitOutOfRange { portion, available });
        }

        let new_note = normalize_note(new_note);
        let new_entry = self.build_entry(item, new_selection, new_note, portion);
        let new_id = new_entry.id;

        if portion == available {
            self.entries[index] = new_entry;
        } else {
            let remainder = available - portion;
            let original = &mut self.entries[index];
            original.quantity = remainder;
            original.recompute_total();
            self.entries.push(new_entry);
        }

        Ok(new_id)
    }

    /// Sum of all entry totals
    pub fn total(&self) -> f64 {
        let sum: Decimal = self.entries.iter().map(|e| to_decimal(e.total)).sum();
        to_f64(sum)
    }

    /// Sum of all entry quantities
    pub fn item_count(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Total quantity of a given menu item across all entries
    pub fn quantity_of(&self, item_uuid: &str) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.item_uuid == item_uuid)
            .map(|e| e.quantity)
            .sum()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn entry(&self, entry_id: u64) -> Result<&CartEntry, CartError> {
        self.entries
            .iter()
            .find(|e| e.id == entry_id)
            .ok_or(CartError::UnknownEntry(entry_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn entry_mut(&mut self, entry_id: u64) -> Result<&mut CartEntry, CartError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(CartError::UnknownEntry(entry_id))
    }

    fn push_entry(
        &mut self,
        item: &MenuItem,
        selection: Selection,
        note: Option<String>,
        quantity: u32,
    ) -> u64 {
        let entry = self.build_entry(item, selection, note, quantity);
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    fn build_entry(
        &mut self,
        item: &MenuItem,
        selection: Selection,
        note: Option<String>,
        quantity: u32,
    ) -> CartEntry {
        let delta = selection.price_delta(item);
        let unit_price = to_f64(to_decimal(item.price) + delta);

        self.next_id += 1;
        let mut entry = CartEntry {
            id: self.next_id,
            item_uuid: item.uuid.clone(),
            title: item.title.clone(),
            unit_price,
            quantity,
            note,
            selection,
            configuration_delta: to_f64(delta),
            total: 0.0,
        };
        entry.recompute_total();
        entry
    }
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
