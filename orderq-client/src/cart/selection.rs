//! Configuration selection state and defaults
//!
//! A selection is a structured value type keyed by group title, compared
//! structurally. Multiple-choice groups hold a set, so equality does not
//! depend on the order options were toggled in.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use shared::models::{ConfigurationOption, ItemConfiguration, MenuItem, SelectionType};

use super::money::to_decimal;
use super::CartError;

/// Chosen option(s) of one configuration group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Single-choice group: the selected option's title
    Single(String),
    /// Multiple-choice group: the selected option titles
    Multiple(BTreeSet<String>),
}

/// Per-item configuration selection, group title → choice
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    choices: BTreeMap<String, Choice>,
}

impl Selection {
    /// Empty selection (for items without configuration)
    pub fn new() -> Self {
        Self::default()
    }

    /// Default selection for a menu item.
    ///
    /// Single-choice groups take the first preselected option; with no
    /// preselection, a fixed group falls back to its first option and an
    /// open group stays unselected. Multiple-choice groups collect every
    /// preselected option; the group is recorded even when that set is
    /// empty.
    pub fn default_for(item: &MenuItem) -> Self {
        let mut choices = BTreeMap::new();

        for group in item.configurations() {
            match group.selection_type {
                SelectionType::Single => {
                    let options = &group.configuration_options;
                    let preselected = options.iter().find(|o| o.preselected);
                    let default = preselected.or_else(|| {
                        group.fixed_preselection.then(|| options.first()).flatten()
                    });
                    if let Some(option) = default {
                        choices.insert(group.title.clone(), Choice::Single(option.title.clone()));
                    }
                }
                SelectionType::Multiple => {
                    let preselected: BTreeSet<String> = group
                        .configuration_options
                        .iter()
                        .filter(|o| o.preselected)
                        .map(|o| o.title.clone())
                        .collect();
                    choices.insert(group.title.clone(), Choice::Multiple(preselected));
                }
            }
        }

        Self { choices }
    }

    /// Choice for a group, if any
    pub fn choice(&self, group_title: &str) -> Option<&Choice> {
        self.choices.get(group_title)
    }

    /// Iterate over (group title, choice) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Choice)> {
        self.choices.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Apply a user toggle for `option_title` in `group_title`.
    ///
    /// Single-choice groups switch to the option; multiple-choice groups
    /// flip its membership. Options pinned by a fixed-preselection flag
    /// (their own or their group's) reject the change.
    pub fn toggle(
        &mut self,
        item: &MenuItem,
        group_title: &str,
        option_title: &str,
    ) -> Result<(), CartError> {
        let group = item
            .configurations()
            .iter()
            .find(|g| g.title == group_title)
            .ok_or_else(|| CartError::UnknownGroup(group_title.to_string()))?;
        let option = group
            .option(option_title)
            .ok_or_else(|| CartError::UnknownOption(option_title.to_string()))?;

        if group.fixed_preselection {
            return Err(CartError::FixedSelection(group.title.clone()));
        }

        match group.selection_type {
            SelectionType::Single => {
                // Switching away from a pinned option is not allowed
                if let Some(Choice::Single(current)) = self.choices.get(group_title) {
                    if current != option_title && is_pinned(group, current) {
                        return Err(CartError::FixedSelection(current.clone()));
                    }
                }
                self.choices
                    .insert(group.title.clone(), Choice::Single(option.title.clone()));
            }
            SelectionType::Multiple => {
                let entry = self
                    .choices
                    .entry(group.title.clone())
                    .or_insert_with(|| Choice::Multiple(BTreeSet::new()));
                if let Choice::Multiple(selected) = entry {
                    if selected.contains(option_title) {
                        if option.fixed_preselection {
                            return Err(CartError::FixedSelection(option.title.clone()));
                        }
                        selected.remove(option_title);
                    } else {
                        selected.insert(option.title.clone());
                    }
                }
            }
        }

        Ok(())
    }

    /// Aggregate price delta of the selection, recomputed from scratch
    pub fn price_delta(&self, item: &MenuItem) -> Decimal {
        let mut delta = Decimal::ZERO;

        for group in item.configurations() {
            match (self.choices.get(&group.title), group.selection_type) {
                (Some(Choice::Single(title)), SelectionType::Single) => {
                    if let Some(option) = group.option(title) {
                        delta += to_decimal(option.price_change);
                    }
                }
                (Some(Choice::Multiple(titles)), SelectionType::Multiple) => {
                    for title in titles {
                        if let Some(option) = group.option(title) {
                            delta += to_decimal(option.price_change);
                        }
                    }
                }
                _ => {}
            }
        }

        delta
    }
}

/// Whether an option may be rendered as interactive at all
pub fn is_locked(group: &ItemConfiguration, option: &ConfigurationOption) -> bool {
    group.fixed_preselection || option.fixed_preselection
}

fn is_pinned(group: &ItemConfiguration, option_title: &str) -> bool {
    group
        .option(option_title)
        .map(|o| o.fixed_preselection)
        .unwrap_or(false)
}
