// Archivo: graph.rs
// Propósito: núcleo compartido del builder de grafos de stages. Tanto
// `Phase` como `WorkflowConfiguration` componen un `StageGraph` y delegan
// en él el comportamiento común del builder.
use crate::errors::{Result, TransitionError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use workflow_domain::{Stage, Transition};

/// Grafo dirigido de stages con sus transiciones declaradas, más el stage
/// inicial y el terminal opcional.
///
/// Todos los métodos `with_*` son copy-on-write: devuelven un grafo nuevo
/// construido a partir de los campos del receptor más el delta, sin mutar
/// almacenamiento compartido.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageGraph {
    stages: Vec<Stage>,
    transitions: Vec<Transition>,
    beginning: Option<String>,
    conclusion: Option<String>,
}

impl StageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn beginning(&self) -> Option<&str> {
        self.beginning.as_deref()
    }

    pub fn conclusion(&self) -> Option<&str> {
        self.conclusion.as_deref()
    }

    /// Añade stages por nombre (sin acción ni aprobación).
    pub fn with_stage_names<I, S>(&self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.with_stages(names.into_iter().map(Stage::named))
    }

    /// Añade definiciones de stage. No se deduplica por nombre: la
    /// validación ocurre al referenciarlos desde transiciones.
    pub fn with_stages<I>(&self, new_stages: I) -> Self
        where I: IntoIterator<Item = Stage>
    {
        let mut stages = self.stages.clone();
        stages.extend(new_stages);
        Self { stages,
               transitions: self.transitions.clone(),
               beginning: self.beginning.clone(),
               conclusion: self.conclusion.clone() }
    }

    /// Declara una transición validando existencia de ambos extremos y
    /// ausencia de ciclos sobre el conjunto de transiciones previo.
    pub fn with_transition(&self, transition: Transition) -> Result<Self> {
        for end in [transition.from(), transition.to()] {
            if !self.has_stage(end) {
                return Err(TransitionError::UnknownStage(end.to_string()));
            }
        }
        if self.creates_cycle(transition.from(), transition.to()) {
            return Err(TransitionError::CircularTransition);
        }
        Ok(self.with_transitions([transition]))
    }

    /// Añade transiciones sin re-validar. Lo usa `join_phase`, que une
    /// fases ya validadas internamente.
    pub(crate) fn with_transitions<I>(&self, new_transitions: I) -> Self
        where I: IntoIterator<Item = Transition>
    {
        let mut transitions = self.transitions.clone();
        transitions.extend(new_transitions);
        Self { stages: self.stages.clone(),
               transitions,
               beginning: self.beginning.clone(),
               conclusion: self.conclusion.clone() }
    }

    /// Registra el stage inicial. No se comprueba existencia aquí: se
    /// exige cuando la configuración se usa para inicializar estado.
    pub fn begin_with(&self, stage: &str) -> Self {
        Self { stages: self.stages.clone(),
               transitions: self.transitions.clone(),
               beginning: Some(stage.to_string()),
               conclusion: self.conclusion.clone() }
    }

    /// Registra el stage terminal. Igual que `begin_with`, sin comprobar
    /// existencia en el momento de la llamada.
    pub fn conclude_at(&self, stage: &str) -> Self {
        Self { stages: self.stages.clone(),
               transitions: self.transitions.clone(),
               beginning: self.beginning.clone(),
               conclusion: Some(stage.to_string()) }
    }

    /// Copia sin conclusión; tras un `join_phase` con fase no concluida la
    /// configuración resultante queda sin terminal.
    pub(crate) fn unconcluded(&self) -> Self {
        Self { stages: self.stages.clone(),
               transitions: self.transitions.clone(),
               beginning: self.beginning.clone(),
               conclusion: None }
    }

    pub fn has_stage(&self, name: &str) -> bool {
        self.stages.iter().any(|s| s.name() == name)
    }

    pub fn find_stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name() == name)
    }

    /// Busca el stage cuya etiqueta de acción es `action`.
    pub fn find_stage_by_action(&self, action: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.action() == Some(action))
    }

    pub fn has_transition(&self, from: &str, to: &str) -> bool {
        self.transitions.iter().any(|t| t.connects(from, to))
    }

    pub fn is_conclusion(&self, name: &str) -> bool {
        self.conclusion.as_deref() == Some(name)
    }

    /// Stages que nunca aparecen como origen de una transición. Se usan
    /// como puntos de unión implícitos al encadenar fases sin conclusión.
    ///
    /// Nota: un stage sin aristas salientes por diseño (un callejón
    /// terminal intencional) también cuenta como colgante y será cableado
    /// por un `join_phase` posterior.
    pub fn dangling_stages(&self) -> Vec<&str> {
        let sources: HashSet<&str> = self.transitions.iter().map(|t| t.from()).collect();
        self.stages
            .iter()
            .map(|s| s.name())
            .filter(|name| !sources.contains(name))
            .collect()
    }

    /// Calcula las aristas salientes de `stage` y las acciones de sus
    /// stages destino (en el orden de declaración).
    pub fn allowed_from(&self, stage: &str) -> (Vec<Transition>, Vec<String>) {
        let allowed_transitions: Vec<Transition> =
            self.transitions.iter().filter(|t| t.from() == stage).cloned().collect();
        let allowed_actions = allowed_transitions
            .iter()
            .filter_map(|t| self.find_stage(t.to()).and_then(|s| s.action().map(String::from)))
            .collect();
        (allowed_transitions, allowed_actions)
    }

    /// Detección de ciclos para la arista candidata `from -> to`, evaluada
    /// sobre el conjunto de transiciones tal como está antes de añadirla.
    /// DFS iterativo con pila y visitados explícitos para no depender de
    /// profundidad de recursión en grafos grandes.
    fn creates_cycle(&self, from: &str, to: &str) -> bool {
        if from == to {
            return true;
        }
        let mut stack = vec![to];
        let mut visited: HashSet<&str> = HashSet::new();
        while let Some(node) = stack.pop() {
            if node == from {
                return true;
            }
            if !visited.insert(node) {
                continue;
            }
            for transition in self.transitions.iter().filter(|t| t.from() == node) {
                stack.push(transition.to());
            }
        }
        false
    }
}
