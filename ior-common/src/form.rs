use crate::material::{Material, MaterialDraft, MaterialPatch, RequiredField};
use thiserror::Error;

const DEFAULT_IOR: &str = "1";
const DEFAULT_WAVELENGTH_NM: &str = "589";
const DEFAULT_TEMPERATURE_C: &str = "20";

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(RequiredField),
    #[error("IOR value is required")]
    MissingIor,
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
}

/// Add/edit form state. Every field is kept as the raw text the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialForm {
    pub name: String,
    pub category: String,
    pub ior_value: String,
    pub description: String,
    pub wavelength: String,
    pub temperature: String,
    pub source: String,
}

impl Default for MaterialForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            ior_value: DEFAULT_IOR.to_string(),
            description: String::new(),
            wavelength: DEFAULT_WAVELENGTH_NM.to_string(),
            temperature: DEFAULT_TEMPERATURE_C.to_string(),
            source: String::new(),
        }
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional_number(field: &'static str, value: &str) -> Result<Option<f64>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| FormError::NotANumber {
            field,
            value: trimmed.to_string(),
        })
}

impl MaterialForm {
    /// Pre-fill the form for editing an existing material.
    pub fn from_material(material: &Material) -> Self {
        Self {
            name: material.name.clone(),
            category: material.category.clone(),
            ior_value: material.ior_value.to_string(),
            description: material.description.clone().unwrap_or_default(),
            wavelength: material
                .wavelength
                .map(|v| v.to_string())
                .unwrap_or_default(),
            temperature: material
                .temperature
                .map(|v| v.to_string())
                .unwrap_or_default(),
            source: material.source.clone().unwrap_or_default(),
        }
    }

    /// Validate and convert into a create request.
    pub fn to_draft(&self) -> Result<MaterialDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Required(RequiredField::Name));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(FormError::Required(RequiredField::Category));
        }
        let ior_value = optional_number("IOR value", &self.ior_value)?.ok_or(FormError::MissingIor)?;

        Ok(MaterialDraft {
            name: name.to_string(),
            category: category.to_string(),
            ior_value,
            description: optional_text(&self.description),
            wavelength: optional_number("wavelength", &self.wavelength)?,
            temperature: optional_number("temperature", &self.temperature)?,
            source: optional_text(&self.source),
        })
    }

    /// Validate and convert into an edit request carrying every field.
    /// Emptied optional fields are sent as clears.
    pub fn to_patch(&self) -> Result<MaterialPatch, FormError> {
        let draft = self.to_draft()?;
        Ok(MaterialPatch {
            name: Some(draft.name),
            category: Some(draft.category),
            ior_value: Some(draft.ior_value),
            description: Some(draft.description),
            wavelength: Some(draft.wavelength),
            temperature: Some(draft.temperature),
            source: Some(draft.source),
        })
    }
}
