// transition.rs
use crate::DefinitionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arista dirigida y declarada entre dos stages.
///
/// Las etiquetas `action` y `approve_action` son opcionales: permiten
/// documentar la acción que dispara la arista y la acción de decisión de
/// aprobación asociada. El motor resuelve acciones a través de las
/// etiquetas de los stages; aquí se conservan como parte del registro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
  from: String,
  to: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  action: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  approve_action: Option<String>,
}

impl Transition {
  /// Crea la arista `from -> to` sin etiquetas.
  pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
    Self { from: from.into(), to: to.into(), action: None, approve_action: None }
  }

  pub fn with_action(self, action: impl Into<String>) -> Self {
    Self { action: Some(action.into()), ..self }
  }

  pub fn with_approve_action(self, action: impl Into<String>) -> Self {
    Self { approve_action: Some(action.into()), ..self }
  }

  /// Construye una transición a partir de datos planos con claves
  /// (`from`, `to`, `action`, `approve_action`).
  pub fn parse(data: serde_json::Value) -> Result<Self, DefinitionError> {
    Ok(serde_json::from_value(data)?)
  }

  pub fn from(&self) -> &str {
    &self.from
  }

  pub fn to(&self) -> &str {
    &self.to
  }

  pub fn action(&self) -> Option<&str> {
    self.action.as_deref()
  }

  pub fn approve_action(&self) -> Option<&str> {
    self.approve_action.as_deref()
  }

  /// `true` si la arista conecta exactamente `from -> to`.
  pub fn connects(&self, from: &str, to: &str) -> bool {
    self.from == from && self.to == to
  }
}

impl fmt::Display for Transition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} -> {}", self.from, self.to)
  }
}
