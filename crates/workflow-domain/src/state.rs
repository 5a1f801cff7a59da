// state.rs
use crate::Transition;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Indicador grueso de progreso del ciclo de vida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
  InProgress,
  Success,
}

impl fmt::Display for LifecycleState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      LifecycleState::InProgress => "in_progress",
      LifecycleState::Success => "success",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for LifecycleState {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "in_progress" => Ok(LifecycleState::InProgress),
      "success" => Ok(LifecycleState::Success),
      _ => Err(()),
    }
  }
}

/// Estado fino de la decisión de aprobación del stage actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
  None,
  InReview,
  Approved,
  Rejected,
}

impl Default for ApprovalState {
  fn default() -> Self {
    ApprovalState::None
  }
}

impl fmt::Display for ApprovalState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ApprovalState::None => "none",
      ApprovalState::InReview => "in_review",
      ApprovalState::Approved => "approved",
      ApprovalState::Rejected => "rejected",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for ApprovalState {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "none" => Ok(ApprovalState::None),
      "in_review" => Ok(ApprovalState::InReview),
      "approved" => Ok(ApprovalState::Approved),
      "rejected" => Ok(ApprovalState::Rejected),
      _ => Err(()),
    }
  }
}

/// Registro de posición de una entidad dentro del workflow.
///
/// El motor nunca muta un `WorkflowState` devuelto: cada transición
/// construye un registro nuevo y lo devuelve completo. Los conjuntos
/// `allowed_transitions`/`allowed_actions` son exactamente las aristas y
/// acciones salientes del stage actual, salvo durante `in_review`, cuando
/// ambos quedan vacíos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
  pub stage: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phase: Option<String>,
  pub state: LifecycleState,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub action: Option<String>,
  #[serde(default)]
  pub approval_state: ApprovalState,
  #[serde(default)]
  pub allowed_transitions: Vec<Transition>,
  #[serde(default)]
  pub allowed_actions: Vec<String>,
}

impl WorkflowState {
  /// `true` mientras hay una aprobación pendiente de resolver.
  pub fn in_review(&self) -> bool {
    self.approval_state == ApprovalState::InReview
  }

  pub fn succeeded(&self) -> bool {
    self.state == LifecycleState::Success
  }
}
