//! Option axes (COLOR, SIZE) and their ordered value lists.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, OptionAxisId, OptionValueId};

/// The two option axes a product varies over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AxisName {
    Color,
    Size,
}

impl AxisName {
    /// Both axes, in synthesis order (color-major, size-minor).
    pub const ALL: [AxisName; 2] = [AxisName::Color, AxisName::Size];

    pub fn as_str(&self) -> &'static str {
        match self {
            AxisName::Color => "COLOR",
            AxisName::Size => "SIZE",
        }
    }
}

impl core::fmt::Display for AxisName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison form of a label: trimmed and case-folded.
pub(crate) fn label_key(label: &str) -> String {
    label.trim().to_lowercase()
}

/// A single value of an option axis (e.g. `Red` on COLOR).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    pub id: Option<OptionValueId>,
    pub label: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl OptionValue {
    /// A value that has never been persisted.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            images: Vec::new(),
        }
    }

    /// A value carrying a server-assigned identity.
    pub fn persisted(id: OptionValueId, label: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            label: label.into(),
            images: Vec::new(),
        }
    }

    /// Blank labels are an interim editing state and never take part in synthesis.
    pub fn is_blank(&self) -> bool {
        self.label.trim().is_empty()
    }
}

/// Non-blocking notice that a label collides with another entry of the same axis.
///
/// Surfaced while editing; it only becomes an error if still present at submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateLabelWarning {
    pub axis: AxisName,
    pub label: String,
    /// Position of the entry the label collides with.
    pub conflicts_with: usize,
}

impl core::fmt::Display for DuplicateLabelWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} value \"{}\" duplicates entry #{}",
            self.axis,
            self.label.trim(),
            self.conflicts_with + 1
        )
    }
}

/// Outcome of an in-place label edit on an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelChange {
    pub axis: AxisName,
    pub index: usize,
    pub old_label: String,
    pub new_label: String,
    pub warning: Option<DuplicateLabelWarning>,
}

impl LabelChange {
    pub fn is_noop(&self) -> bool {
        self.old_label == self.new_label
    }
}

/// An option axis with its ordered value list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionAxis {
    pub id: Option<OptionAxisId>,
    pub name: AxisName,
    #[serde(default)]
    values: Vec<OptionValue>,
}

impl OptionAxis {
    pub fn new(name: AxisName) -> Self {
        Self {
            id: None,
            name,
            values: Vec::new(),
        }
    }

    /// Convenience constructor for a fresh axis with unsaved values.
    pub fn with_labels<I, S>(name: AxisName, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            name,
            values: labels.into_iter().map(OptionValue::new).collect(),
        }
    }

    pub fn with_values(name: AxisName, id: Option<OptionAxisId>, values: Vec<OptionValue>) -> Self {
        Self { id, name, values }
    }

    pub fn values(&self) -> &[OptionValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&OptionValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Append a value with no identity.
    ///
    /// Always succeeds; a collision with an existing label is reported as a warning.
    pub fn add(&mut self, label: impl Into<String>) -> Option<DuplicateLabelWarning> {
        let value = OptionValue::new(label);
        let warning = self.duplicate_of(self.values.len(), &value.label);
        self.values.push(value);
        warning
    }

    /// Remove the value at `index` unconditionally.
    pub fn remove(&mut self, index: usize) -> DomainResult<OptionValue> {
        if index >= self.values.len() {
            return Err(self.missing(index));
        }
        Ok(self.values.remove(index))
    }

    /// Update the label at `index` in place, preserving its identity.
    pub fn rename(&mut self, index: usize, new_label: impl Into<String>) -> DomainResult<LabelChange> {
        let new_label = new_label.into();
        let warning = self.duplicate_of(index, &new_label);
        let axis = self.name;
        let value = self
            .values
            .get_mut(index)
            .ok_or_else(|| DomainError::not_found(format!("{axis} value at index {index}")))?;
        let old_label = core::mem::replace(&mut value.label, new_label.clone());

        Ok(LabelChange {
            axis,
            index,
            old_label,
            new_label,
            warning,
        })
    }

    /// Check `candidate` against every entry except the one at `editing`.
    pub fn duplicate_of(&self, editing: usize, candidate: &str) -> Option<DuplicateLabelWarning> {
        let key = label_key(candidate);
        if key.is_empty() {
            return None;
        }
        self.values
            .iter()
            .enumerate()
            .find(|(i, v)| *i != editing && label_key(&v.label) == key)
            .map(|(i, _)| DuplicateLabelWarning {
                axis: self.name,
                label: candidate.to_string(),
                conflicts_with: i,
            })
    }

    /// Labels that take part in synthesis, in list order.
    ///
    /// Blank labels are skipped; of several labels equal after trimming and
    /// case-folding only the first is kept.
    pub fn synthesis_labels(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.values
            .iter()
            .filter(|v| !v.is_blank())
            .filter(|v| seen.insert(label_key(&v.label)))
            .map(|v| v.label.as_str())
            .collect()
    }

    pub fn has_synthesis_labels(&self) -> bool {
        self.values.iter().any(|v| !v.is_blank())
    }

    /// First duplicate (by trimmed, case-folded label) among non-blank values.
    pub fn first_duplicate(&self) -> Option<DuplicateLabelWarning> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_blank())
            .find_map(|(i, v)| {
                self.duplicate_of(i, &v.label)
                    .filter(|w| w.conflicts_with < i)
            })
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.values.iter().any(|v| v.label == label)
    }

    pub fn add_image(&mut self, index: usize, url: impl Into<String>) -> DomainResult<()> {
        let missing = self.missing(index);
        let value = self.values.get_mut(index).ok_or(missing)?;
        value.images.push(url.into());
        Ok(())
    }

    pub fn remove_image(&mut self, index: usize, image: usize) -> DomainResult<String> {
        let missing = self.missing(index);
        let value = self.values.get_mut(index).ok_or(missing)?;
        if image >= value.images.len() {
            return Err(DomainError::not_found(format!(
                "image #{image} of {} value \"{}\"",
                self.name, value.label
            )));
        }
        Ok(value.images.remove(image))
    }

    /// Take over ids the server assigned, matching unsaved values by exact label.
    pub(crate) fn adopt_ids(&mut self, saved: &OptionAxis) {
        if self.id.is_none() {
            self.id = saved.id;
        }
        for value in self.values.iter_mut().filter(|v| v.id.is_none()) {
            value.id = saved
                .values
                .iter()
                .find(|s| s.label == value.label)
                .and_then(|s| s.id);
        }
    }

    /// Copy of this axis without blank values, as sent to the save collaborator.
    pub(crate) fn without_blanks(&self) -> Self {
        Self {
            id: self.id,
            name: self.name,
            values: self.values.iter().filter(|v| !v.is_blank()).cloned().collect(),
        }
    }

    fn missing(&self, index: usize) -> DomainError {
        DomainError::not_found(format!("{} value at index {index}", self.name))
    }
}
