//! The form/state layer: given the species list of the active session it
//! produces exactly one numeric input per species, in session order, and it is
//! the sole authority on which species names are legal keys in rate and plot
//! requests. Values are kept as raw text until a query collects them, so the
//! user can type freely and only pays for it at dispatch time.

use super::kinetics_service_api::ServiceError;

/// value every input starts with before the user edits it
pub const DEFAULT_CONCENTRATION: &str = "1.0";

#[derive(Debug, Clone)]
pub struct SpeciesField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConcentrationForm {
    fields: Vec<SpeciesField>,
}

impl ConcentrationForm {
    pub fn empty() -> Self {
        Self::default()
    }

    /// one field per species, session order preserved
    pub fn for_species(species: &[String]) -> Self {
        let fields = species
            .iter()
            .map(|name| SpeciesField {
                name: name.clone(),
                value: DEFAULT_CONCENTRATION.to_string(),
            })
            .collect();
        Self { fields }
    }

    pub fn fields(&self) -> &[SpeciesField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// returns false when the species is not part of the active form
    pub fn set_value(&mut self, species: &str, raw: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == species) {
            Some(field) => {
                field.value = raw.trim().to_string();
                true
            }
            None => false,
        }
    }

    pub fn value_of(&self, species: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == species)
            .map(|f| f.value.as_str())
    }

    /// Parses every field into a non-negative concentration; the first field
    /// that is non-numeric or negative rejects the whole form, and nothing is
    /// sent over the network in that case.
    pub fn collect_concentrations(&self) -> Result<Vec<(String, f64)>, ServiceError> {
        let mut pairs = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            match field.value.trim().parse::<f64>() {
                Ok(c) if c.is_finite() && c >= 0.0 => pairs.push((field.name.clone(), c)),
                _ => return Err(ServiceError::InvalidInput(field.name.clone())),
            }
        }
        Ok(pairs)
    }
}
