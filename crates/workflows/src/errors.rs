// Archivo: errors.rs
// Propósito: definir los errores de transición y el alias Result<T> usado
// por las APIs del crate. Los mensajes son parte del contrato del motor.
use thiserror::Error;

/// Violaciones de reglas del builder y del motor en runtime.
///
/// Toda violación se devuelve síncronamente al caller como valor de error;
/// el motor no reintenta ni aplica cambios parciales.
#[derive(Error, Debug)]
pub enum TransitionError {
    /// Una arista declara un stage que no existe en la configuración.
    #[error("Stage {0} does not exist")]
    UnknownStage(String),
    /// El destino de `move_to` (o el beginning en uso) no nombra un stage.
    #[error("Invalid Stage {0}")]
    InvalidStage(String),
    /// No hay arista declarada entre el stage actual y el destino.
    #[error("Invalid Transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
    /// La arista candidata crearía un ciclo en el grafo.
    #[error("Circular transition detected")]
    CircularTransition,
    /// Ningún stage lleva la etiqueta de acción pedida.
    #[error("Action {0} does not exist")]
    UnknownAction(String),
    /// Hay una aprobación pendiente; debe resolverse con approve/reject.
    #[error("Action {0} cannot be performed while waiting for approval")]
    PendingApproval(String),
    /// La acción existe pero no hay arista desde el stage actual.
    #[error("Action {0} cannot be called now")]
    ActionNotAllowed(String),
    /// approve/reject sobre un stage sin puerta de aprobación.
    #[error("Current stage {0} does not have approvals")]
    NoApprovalGate(String),
    /// La configuración no tiene beginning al inicializar o evaluar estado.
    #[error("Workflow has no beginning stage")]
    MissingBeginning,
    /// `join_phase` con una fase que no declara beginning.
    #[error("Phase {0} has no beginning stage")]
    PhaseWithoutBeginning(String),
    /// Errores al definir registros del dominio (etiquetas reservadas).
    #[error(transparent)]
    Definition(#[from] workflow_domain::DefinitionError),
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, TransitionError>;
