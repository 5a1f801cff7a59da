mod errors;
mod stage;
mod state;
mod transition;

pub use errors::DefinitionError;
pub use stage::{Stage, RESERVED_ACTIONS};
pub use state::{ApprovalState, LifecycleState, WorkflowState};
pub use transition::Transition;
