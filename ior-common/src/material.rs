use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One catalog entry describing a substance's index of refraction.
///
/// `id` is assigned by the remote collection and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: String,
    pub category: String,
    pub ior_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Wavelength in nanometres
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wavelength: Option<f64>,
    /// Temperature in degrees Celsius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A material that has not been assigned an id yet (request body of create).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDraft {
    pub name: String,
    pub category: String,
    pub ior_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wavelength: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Partial update for an existing material. Unset fields are left untouched
/// by the server and omitted on the wire.
///
/// Optional fields are tri-state: `None` keeps the stored value, `Some(None)`
/// clears it (sent as `null`), `Some(Some(v))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ior_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub wavelength: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub temperature: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub source: Option<Option<String>>,
}

/// A present key (even `null`) deserializes to `Some`; a missing key falls
/// back to `default` and stays `None`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Fields that must be non-empty whenever a material is created or updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Category,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::Name => f.write_str("name"),
            RequiredField::Category => f.write_str("category"),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl Material {
    /// IOR formatted the way the catalog displays it (three decimals).
    pub fn display_ior(&self) -> String {
        format!("{:.3}", self.ior_value)
    }

    pub fn display_wavelength(&self) -> Option<String> {
        self.wavelength.map(|nm| format!("{nm}nm"))
    }

    pub fn display_temperature(&self) -> Option<String> {
        self.temperature.map(|c| format!("{c}°C"))
    }

    /// Apply a partial update in place. `id` is never touched.
    pub fn apply_patch(&mut self, patch: &MaterialPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(ior_value) = patch.ior_value {
            self.ior_value = ior_value;
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(wavelength) = patch.wavelength {
            self.wavelength = wavelength;
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = temperature;
        }
        if let Some(source) = &patch.source {
            self.source = source.clone();
        }
    }
}

impl MaterialDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>, ior_value: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ior_value,
            description: None,
            wavelength: None,
            temperature: None,
            source: None,
        }
    }

    /// First required field that is empty, if any.
    pub fn missing_required(&self) -> Option<RequiredField> {
        if is_blank(&self.name) {
            Some(RequiredField::Name)
        } else if is_blank(&self.category) {
            Some(RequiredField::Category)
        } else {
            None
        }
    }

    pub fn with_id(self, id: impl Into<String>) -> Material {
        Material {
            id: id.into(),
            name: self.name,
            category: self.category,
            ior_value: self.ior_value,
            description: self.description,
            wavelength: self.wavelength,
            temperature: self.temperature,
            source: self.source,
        }
    }
}

impl MaterialPatch {
    pub fn ior_value(ior_value: f64) -> Self {
        Self {
            ior_value: Some(ior_value),
            ..Default::default()
        }
    }

    /// A required field this patch would set to an empty string, if any.
    /// Absent fields are fine: the stored value is kept.
    pub fn blanks_required(&self) -> Option<RequiredField> {
        if self.name.as_deref().is_some_and(is_blank) {
            Some(RequiredField::Name)
        } else if self.category.as_deref().is_some_and(is_blank) {
            Some(RequiredField::Category)
        } else {
            None
        }
    }
}
