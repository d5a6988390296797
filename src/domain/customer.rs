use crate::error::{PosnetError, Result};

/// The holder of a card.
///
/// Fields are private so a customer cannot change once a card owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    dni: String,
    first_name: String,
    last_name: String,
}

impl Customer {
    pub fn new(
        dni: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self> {
        let dni = dni.into();
        if dni.trim().is_empty() {
            return Err(PosnetError::MissingIdentityDocument);
        }

        Ok(Self {
            dni,
            first_name: first_name.into(),
            last_name: last_name.into(),
        })
    }

    pub fn dni(&self) -> &str {
        &self.dni
    }

    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
