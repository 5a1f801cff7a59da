// Archivo: entity.rs
// Propósito: fachada fina por entidad. Posee el slot mutable con el estado
// actual y delega lecturas y transiciones a la configuración compartida.
use crate::config::WorkflowConfiguration;
use crate::errors::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;
use workflow_domain::{ApprovalState, LifecycleState, Transition, WorkflowState};

/// Instancia independiente conducida por una configuración compartida.
///
/// La configuración es inmutable y puede compartirse entre cualquier
/// número de entidades; el slot de estado es propiedad de esta fachada y
/// las llamadas sobre una misma entidad deben serializarse por el caller.
/// Una llamada fallida devuelve el error y deja el estado tal como estaba.
#[derive(Debug, Clone)]
pub struct Entity {
    id: Uuid,
    created_at: DateTime<Utc>,
    configuration: Arc<WorkflowConfiguration>,
    state: WorkflowState,
}

impl Entity {
    /// Crea la entidad posicionada en el beginning de la configuración.
    pub fn init(configuration: Arc<WorkflowConfiguration>) -> Result<Self> {
        let state = configuration.init_stage()?;
        Ok(Self { id: Uuid::new_v4(),
                  created_at: Utc::now(),
                  configuration,
                  state })
    }

    /// Transición directa al stage `target`.
    pub fn transition_to(&mut self, target: &str) -> Result<&mut Self> {
        self.state = self.configuration.move_to(&self.state, target)?;
        Ok(self)
    }

    /// Ejecuta una acción por nombre. Los tokens reservados `approve` y
    /// `reject` se enrutan a las operaciones de decisión.
    pub fn execute(&mut self, action: &str) -> Result<&mut Self> {
        self.state = match action {
            "approve" => self.configuration.approve(&self.state)?,
            "reject" => self.configuration.reject(&self.state)?,
            _ => self.configuration.execute(&self.state, action)?,
        };
        Ok(self)
    }

    pub fn approve(&mut self) -> Result<&mut Self> {
        self.state = self.configuration.approve(&self.state)?;
        Ok(self)
    }

    pub fn reject(&mut self) -> Result<&mut Self> {
        self.state = self.configuration.reject(&self.state)?;
        Ok(self)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn configuration(&self) -> &WorkflowConfiguration {
        &self.configuration
    }

    /// Registro de posición completo (sólo lectura).
    pub fn workflow_state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn stage(&self) -> &str {
        &self.state.stage
    }

    pub fn phase(&self) -> Option<&str> {
        self.state.phase.as_deref()
    }

    pub fn state(&self) -> LifecycleState {
        self.state.state
    }

    pub fn action(&self) -> Option<&str> {
        self.state.action.as_deref()
    }

    pub fn approval_state(&self) -> ApprovalState {
        self.state.approval_state
    }

    pub fn allowed_transitions(&self) -> &[Transition] {
        &self.state.allowed_transitions
    }

    pub fn allowed_actions(&self) -> &[String] {
        &self.state.allowed_actions
    }
}
