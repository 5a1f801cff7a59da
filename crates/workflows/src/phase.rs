// Archivo: phase.rs
// Propósito: sub-workflow nombrado y componible. Una `Phase` se construye
// y testea de forma independiente y luego se incorpora a una configuración
// padre mediante `join_phase`.
use crate::errors::Result;
use crate::graph::StageGraph;
use serde::{Deserialize, Serialize};
use workflow_domain::{DefinitionError, Stage, Transition};

/// Sub-workflow con nombre propio: su conjunto de stages (estampados con
/// el nombre de la fase), sus transiciones, un beginning designado y una
/// conclusión opcional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    name: String,
    graph: StageGraph,
}

impl Phase {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), graph: StageGraph::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
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

    /// Añade stages por nombre, estampados con esta fase.
    pub fn with_stage_names<I, S>(&self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.with_stages(names.into_iter().map(Stage::named))
    }

    /// Añade stages estampándolos con el nombre de la fase.
    pub fn with_stages<I>(&self, new_stages: I) -> Self
        where I: IntoIterator<Item = Stage>
    {
        let stamped = new_stages.into_iter().map(|s| s.in_phase(&self.name));
        Self { name: self.name.clone(), graph: self.graph.with_stages(stamped) }
    }

    /// Declara una transición interna de la fase. Ambos extremos deben ser
    /// stages propios (misma validación de existencia y ciclos que en la
    /// configuración).
    pub fn with_transition(&self, transition: Transition) -> Result<Self> {
        Ok(Self { name: self.name.clone(), graph: self.graph.with_transition(transition)? })
    }

    pub fn begin_with(&self, stage: &str) -> Self {
        Self { name: self.name.clone(), graph: self.graph.begin_with(stage) }
    }

    pub fn conclude_at(&self, stage: &str) -> Self {
        Self { name: self.name.clone(), graph: self.graph.conclude_at(stage) }
    }

    /// Construye una fase a partir de datos planos con claves (`name`,
    /// `stages`, `transitions`, `beginning`, `conclusion`), pasando por el
    /// builder normal: los stages se validan y estampan, y cada transición
    /// se comprueba (existencia y ciclos) igual que al declararla a mano.
    pub fn parse(data: serde_json::Value) -> Result<Self> {
        #[derive(Deserialize)]
        struct PhaseData {
            name: String,
            #[serde(default)]
            stages: Vec<serde_json::Value>,
            #[serde(default)]
            transitions: Vec<serde_json::Value>,
            beginning: Option<String>,
            conclusion: Option<String>,
        }

        let data: PhaseData = serde_json::from_value(data).map_err(DefinitionError::from)?;
        let stages = data.stages
                         .into_iter()
                         .map(Stage::parse)
                         .collect::<std::result::Result<Vec<_>, _>>()?;
        let mut phase = Self::new(data.name).with_stages(stages);
        for transition in data.transitions {
            phase = phase.with_transition(Transition::parse(transition)?)?;
        }
        if let Some(beginning) = data.beginning {
            phase = phase.begin_with(&beginning);
        }
        if let Some(conclusion) = data.conclusion {
            phase = phase.conclude_at(&conclusion);
        }
        Ok(phase)
    }
}
