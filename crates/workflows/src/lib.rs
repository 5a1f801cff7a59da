//! Crate `workflows` — configuración y motor de transiciones de workflows
//!
//! Este crate define el builder inmutable de configuraciones de workflow
//! (`WorkflowConfiguration`, `Phase`, con el núcleo compartido `StageGraph`),
//! el motor de transiciones en runtime (`init_stage`, `move_to`, `execute`,
//! `approve`, `reject`) y una fachada fina por entidad (`Entity`).
//!
//! Diseño resumido:
//! - Copy-on-write: cada llamada `with_*`/`join_phase` devuelve una
//!   configuración nueva e independiente; los valores previos siguen siendo
//!   válidos (permite ramificar una configuración base en variantes).
//! - Validación en build time: existencia de stages al declarar aristas y
//!   detección de ciclos (DFS iterativo), de modo que el grafo completo se
//!   mantiene acíclico.
//! - Runtime puro y síncrono: cada operación es una función de
//!   (configuración, estado, entrada) a un estado nuevo o un error; una
//!   llamada fallida deja intacto el estado previo del caller.
//!
//! Contrato de concurrencia: las configuraciones son inmutables y pueden
//! compartirse en sólo-lectura entre cualquier número de entidades; el slot
//! que guarda "el estado actual de la entidad E" es del caller y las
//! llamadas sobre un mismo slot deben serializarse fuera de este crate.
//!
//! Ejemplo rápido:
//! ```rust
//! use workflows::WorkflowConfiguration;
//! use workflow_domain::Transition;
//! let config = WorkflowConfiguration::new()
//!     .with_stage_names(["draft", "published"])
//!     .with_transition(Transition::between("draft", "published"))
//!     .expect("transición válida")
//!     .begin_with("draft")
//!     .conclude_at("published");
//! let state = config.init_stage().expect("beginning configurado");
//! assert_eq!(state.stage, "draft");
//! ```
pub mod config;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod graph;
pub mod phase;

pub use config::WorkflowConfiguration;
pub use entity::Entity;
pub use errors::{Result, TransitionError};
pub use graph::StageGraph;
pub use phase::Phase;

// Re-export de los registros del dominio para uso ergonómico.
pub use workflow_domain::{ApprovalState, DefinitionError, LifecycleState, Stage, Transition, WorkflowState};
