// errors.rs
use thiserror::Error;

/// Errores al definir los registros del dominio (stages, transiciones).
#[derive(Debug, Error, Clone)]
pub enum DefinitionError {
  /// La etiqueta de acción colisiona con un token reservado de decisión.
  #[error("Acción reservada para decisiones de aprobación: {0}")]
  ReservedAction(String),
  #[error("Error de serialización: {0}")]
  Serialization(String),
}

impl From<serde_json::Error> for DefinitionError {
  fn from(e: serde_json::Error) -> Self {
    Self::Serialization(e.to_string())
  }
}
