// Archivo: config.rs
// Propósito: la configuración agregada del workflow: grafo plano de stages
// y transiciones, fases registradas y el algoritmo de unión de fases.
use crate::errors::{Result, TransitionError};
use crate::graph::StageGraph;
use crate::phase::Phase;
use serde::{Deserialize, Serialize};
use workflow_domain::{Stage, Transition};

/// Configuración inmutable de un workflow.
///
/// Se construye una vez mediante llamadas encadenadas del builder (cada
/// una devuelve una configuración nueva e independiente) y después se usa
/// para conducir cualquier número de entidades por el grafo. Las
/// operaciones de runtime (`init_stage`, `move_to`, `execute`, `approve`,
/// `reject`) viven en `engine.rs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfiguration {
    graph: StageGraph,
    phases: Vec<Phase>,
}

impl WorkflowConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn graph(&self) -> &StageGraph {
        &self.graph
    }

    pub fn stages(&self) -> &[Stage] {
        self.graph.stages()
    }

    pub fn transitions(&self) -> &[Transition] {
        self.graph.transitions()
    }

    pub fn beginning(&self) -> Option<&str> {
        self.graph.beginning()
    }

    pub fn conclusion(&self) -> Option<&str> {
        self.graph.conclusion()
    }

    /// Fases registradas, en orden de registro.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn find_phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name() == name)
    }

    pub fn with_stage_names<I, S>(&self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { graph: self.graph.with_stage_names(names), phases: self.phases.clone() }
    }

    pub fn with_stages<I>(&self, new_stages: I) -> Self
        where I: IntoIterator<Item = Stage>
    {
        Self { graph: self.graph.with_stages(new_stages), phases: self.phases.clone() }
    }

    /// Declara una transición validando existencia de stages y ciclos.
    pub fn with_transition(&self, transition: Transition) -> Result<Self> {
        Ok(Self { graph: self.graph.with_transition(transition)?, phases: self.phases.clone() })
    }

    pub fn begin_with(&self, stage: &str) -> Self {
        Self { graph: self.graph.begin_with(stage), phases: self.phases.clone() }
    }

    pub fn conclude_at(&self, stage: &str) -> Self {
        Self { graph: self.graph.conclude_at(stage), phases: self.phases.clone() }
    }

    /// Registra una fase como unidad nombrada, sin cablearla al grafo de
    /// transiciones. Si ya hay una fase con el mismo nombre no se duplica.
    pub fn with_phase(&self, phase: &Phase) -> Self {
        let mut phases = self.phases.clone();
        if !phases.iter().any(|p| p.name() == phase.name()) {
            phases.push(phase.clone());
        }
        Self { graph: self.graph.clone(), phases }
    }

    /// Une una fase a la configuración.
    ///
    /// Con el receptor vacío el resultado es la configuración propia de la
    /// fase (stages, transiciones, beginning y conclusión copiados tal
    /// cual). En otro caso:
    /// 1. Los orígenes de unión son la conclusión explícita si existe, o
    ///    todos los stages colgantes (nunca origen de una transición) si
    ///    no la hay; así una fase con varias ramas sin resolver converge
    ///    entera en la siguiente.
    /// 2. Se crea una transición por origen hacia el beginning de la fase.
    /// 3. Se unen stages y transiciones de la fase sin re-validar su
    ///    estructura interna (las fases ya se validaron al construirse).
    /// 4. La conclusión resultante es la de la fase, o ninguna si la fase
    ///    no declara una (sus colgantes quedan para una unión futura).
    ///
    /// Nota: el criterio de stages colgantes puede unir también callejones
    /// terminales intencionales de la fase previa; ver `dangling_stages`.
    pub fn join_phase(&self, phase: &Phase) -> Result<Self> {
        let join_to = phase.beginning()
                           .ok_or_else(|| TransitionError::PhaseWithoutBeginning(phase.name().to_string()))?
                           .to_string();
        let registered = self.with_phase(phase);

        if registered.graph.stages().is_empty() {
            return Ok(Self { graph: phase.graph().clone(), phases: registered.phases });
        }

        let join_froms: Vec<String> = match registered.graph.conclusion() {
            Some(last_stage) => vec![last_stage.to_string()],
            None => registered.graph.dangling_stages().iter().map(|s| s.to_string()).collect(),
        };
        let join_transitions = join_froms.into_iter().map(|from| Transition::between(from, join_to.clone()));
        let new_transitions = join_transitions.chain(phase.transitions().iter().cloned());

        let graph = registered.graph
                              .with_stages(phase.stages().iter().cloned())
                              .with_transitions(new_transitions);
        let graph = match phase.conclusion() {
            Some(conclusion) => graph.conclude_at(conclusion),
            None => graph.unconcluded(),
        };
        Ok(Self { graph, phases: registered.phases })
    }
}
