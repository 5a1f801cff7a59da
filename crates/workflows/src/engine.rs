// Archivo: engine.rs
// Propósito: el motor de transiciones en runtime. Máquina de estados
// determinista sobre (stage, lifecycle, approval_state): cada operación es
// una función pura de (configuración, estado, entrada) a un estado nuevo o
// un error, sin I/O ni bloqueo.
use crate::config::WorkflowConfiguration;
use crate::errors::{Result, TransitionError};
use workflow_domain::{ApprovalState, LifecycleState, Stage, Transition, WorkflowState};

impl WorkflowConfiguration {
    /// Deriva el estado inicial de una entidad: posicionado en el stage
    /// beginning, lifecycle `in_progress`, aprobación `none`, y los
    /// conjuntos permitidos calculados desde sus aristas salientes.
    ///
    /// La existencia del beginning se exige aquí (no al declararlo).
    pub fn init_stage(&self) -> Result<WorkflowState> {
        let beginning = self.beginning().ok_or(TransitionError::MissingBeginning)?;
        let stage = self.graph()
                        .find_stage(beginning)
                        .ok_or_else(|| TransitionError::InvalidStage(beginning.to_string()))?;
        let (allowed_transitions, allowed_actions) = self.graph().allowed_from(stage.name());
        Ok(WorkflowState { stage: stage.name().to_string(),
                           phase: stage.phase().map(String::from),
                           state: LifecycleState::InProgress,
                           action: None,
                           approval_state: ApprovalState::None,
                           allowed_transitions,
                           allowed_actions })
    }

    /// Transición directa (no dirigida por acción) hacia `target`.
    ///
    /// Falla si `target` no nombra un stage o si no existe la arista
    /// declarada (stage actual -> target). El lifecycle pasa a `success`
    /// si y sólo si el destino es la conclusión configurada.
    pub fn move_to(&self, present_state: &WorkflowState, target: &str) -> Result<WorkflowState> {
        let stage = self.graph()
                        .find_stage(target)
                        .ok_or_else(|| TransitionError::InvalidStage(target.to_string()))?;
        if !self.graph().has_transition(&present_state.stage, target) {
            return Err(TransitionError::InvalidTransition { from: present_state.stage.clone(),
                                                            to: target.to_string() });
        }
        let state = if self.graph().is_conclusion(target) {
            LifecycleState::Success
        } else {
            LifecycleState::InProgress
        };
        Ok(self.arrive_at(stage, state, present_state.action.clone()))
    }

    /// Transición dirigida por acción: resuelve el stage cuya etiqueta de
    /// acción es `action` y avanza hacia él.
    ///
    /// Reglas:
    /// - con una aprobación pendiente (`in_review`) no se ejecuta nada;
    /// - re-invocar la acción del stage actual es un no-op idempotente
    ///   (salvo en estado `rejected`);
    /// - debe existir la arista (stage actual -> stage resuelto), salvo en
    ///   estado `rejected`, donde se permite reintentar la misma acción
    ///   sin re-comprobar la arista (el stage rechazado es su propio
    ///   destino de reintento).
    pub fn execute(&self, present_state: &WorkflowState, action: &str) -> Result<WorkflowState> {
        if present_state.in_review() {
            return Err(TransitionError::PendingApproval(action.to_string()));
        }
        let to_stage = self.graph()
                           .find_stage_by_action(action)
                           .ok_or_else(|| TransitionError::UnknownAction(action.to_string()))?;
        let current_stage = self.graph()
                                .find_stage(&present_state.stage)
                                .ok_or_else(|| TransitionError::InvalidStage(present_state.stage.clone()))?;

        if present_state.approval_state != ApprovalState::Rejected {
            if current_stage.action() == Some(action) {
                return Ok(present_state.clone());
            }
            if !self.graph().has_transition(current_stage.name(), to_stage.name()) {
                return Err(TransitionError::ActionNotAllowed(action.to_string()));
            }
        }

        let pending = to_stage.requires_approval();
        let state = if self.graph().is_conclusion(to_stage.name()) && !pending {
            LifecycleState::Success
        } else {
            LifecycleState::InProgress
        };
        Ok(self.arrive_at(to_stage, state, Some(action.to_string())))
    }

    /// Resuelve la aprobación pendiente como aprobada. Recalcula los
    /// conjuntos permitidos y concluye el lifecycle si el stage es la
    /// conclusión configurada.
    pub fn approve(&self, present_state: &WorkflowState) -> Result<WorkflowState> {
        self.resolve_approval(present_state, ApprovalState::Approved)
    }

    /// Resuelve la aprobación pendiente como rechazada. Stage y lifecycle
    /// quedan intactos y los conjuntos permitidos siguen vacíos: el caller
    /// reintenta re-ejecutando la misma acción (vuelve a `in_review`).
    pub fn reject(&self, present_state: &WorkflowState) -> Result<WorkflowState> {
        self.resolve_approval(present_state, ApprovalState::Rejected)
    }

    fn resolve_approval(&self, present_state: &WorkflowState, decision: ApprovalState) -> Result<WorkflowState> {
        let stage = self.graph()
                        .find_stage(&present_state.stage)
                        .ok_or_else(|| TransitionError::InvalidStage(present_state.stage.clone()))?;
        if !stage.requires_approval() {
            return Err(TransitionError::NoApprovalGate(present_state.stage.clone()));
        }

        let mut next = present_state.clone();
        next.approval_state = decision;
        match decision {
            ApprovalState::Approved => {
                let (allowed_transitions, allowed_actions) = self.graph().allowed_from(stage.name());
                next.allowed_transitions = allowed_transitions;
                next.allowed_actions = allowed_actions;
                if self.graph().is_conclusion(stage.name()) {
                    next.state = LifecycleState::Success;
                }
            }
            _ => {
                next.allowed_transitions = Vec::new();
                next.allowed_actions = Vec::new();
            }
        }
        Ok(next)
    }

    /// Construye el registro de estado para la llegada a `stage`. Entrar a
    /// un stage con puerta de aprobación deja la decisión `in_review` y
    /// vacía los conjuntos permitidos; en otro caso se recalculan desde
    /// las aristas salientes del stage.
    fn arrive_at(&self, stage: &Stage, state: LifecycleState, action: Option<String>) -> WorkflowState {
        let approval_state = if stage.requires_approval() {
            ApprovalState::InReview
        } else {
            ApprovalState::None
        };
        let (allowed_transitions, allowed_actions): (Vec<Transition>, Vec<String>) =
            if approval_state == ApprovalState::InReview {
                (Vec::new(), Vec::new())
            } else {
                self.graph().allowed_from(stage.name())
            };
        WorkflowState { stage: stage.name().to_string(),
                        phase: stage.phase().map(String::from),
                        state,
                        action,
                        approval_state,
                        allowed_transitions,
                        allowed_actions }
    }
}
