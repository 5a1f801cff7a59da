// stage.rs
use crate::DefinitionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens reservados para las decisiones de aprobación. Una etiqueta de
/// acción de un stage nunca puede usar uno de estos nombres.
pub const RESERVED_ACTIONS: [&str; 2] = ["approve", "reject"];

/// Punto nombrado dentro de un workflow.
///
/// Un `Stage` puede llevar una etiqueta de acción (para transiciones
/// dirigidas por intención) y un flag de aprobación que obliga a resolver
/// una decisión explícita antes de continuar. El campo `phase` indica la
/// fase propietaria cuando el stage proviene de una `Phase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
  name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  action: Option<String>,
  #[serde(default)]
  approval: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  phase: Option<String>,
}

impl Stage {
  /// Crea un stage sin acción ni aprobación.
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: name.into(), action: None, approval: false, phase: None }
  }

  /// Asigna la etiqueta de acción. Falla si colisiona con un token
  /// reservado de decisión (`approve`/`reject`).
  pub fn with_action(self, action: impl Into<String>) -> Result<Self, DefinitionError> {
    let action = action.into();
    if RESERVED_ACTIONS.contains(&action.as_str()) {
      return Err(DefinitionError::ReservedAction(action));
    }
    Ok(Self { action: Some(action), ..self })
  }

  /// Marca el stage como puerta de aprobación.
  pub fn with_approval(self) -> Self {
    Self { approval: true, ..self }
  }

  /// Estampa la fase propietaria. Lo usa `Phase` al incorporar stages.
  pub fn in_phase(self, phase: impl Into<String>) -> Self {
    Self { phase: Some(phase.into()), ..self }
  }

  /// Construye un stage a partir de datos planos con claves (`name`,
  /// `action`, `approval`, `phase`), validando la etiqueta de acción.
  pub fn parse(data: serde_json::Value) -> Result<Self, DefinitionError> {
    let stage: Self = serde_json::from_value(data)?;
    if let Some(action) = &stage.action {
      if RESERVED_ACTIONS.contains(&action.as_str()) {
        return Err(DefinitionError::ReservedAction(action.clone()));
      }
    }
    Ok(stage)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn action(&self) -> Option<&str> {
    self.action.as_deref()
  }

  pub fn requires_approval(&self) -> bool {
    self.approval
  }

  pub fn phase(&self) -> Option<&str> {
    self.phase.as_deref()
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.phase {
      Some(phase) => write!(f, "{}/{}", phase, self.name),
      None => write!(f, "{}", self.name),
    }
  }
}
