use serde_json::json;
use workflow_domain::{Stage, Transition};
use workflows::{Phase, TransitionError, WorkflowConfiguration};

// fase lineal n1 -> n2 -> n3 (nombres con prefijo `letter`), con acciones
// do_<stage>, beginning en el primero y conclusión en el último
fn lettered_phase(letter: &str) -> Phase {
  let names: Vec<String> = (1..=3).map(|n| format!("{letter}{n}")).collect();
  let stages: Vec<Stage> = names
    .iter()
    .map(|n| Stage::named(n).with_action(format!("do_{n}")).expect("valid action label"))
    .collect();
  Phase::new(letter.to_uppercase())
    .with_stages(stages)
    .with_transition(Transition::between(&names[0], &names[1]))
    .expect("first transition")
    .with_transition(Transition::between(&names[1], &names[2]))
    .expect("second transition")
    .begin_with(&names[0])
    .conclude_at(&names[2])
}

fn stamped(name: &str, phase: &str) -> Stage {
  Stage::named(name)
    .with_action(format!("do_{name}"))
    .expect("valid action label")
    .in_phase(phase)
}

#[test]
fn first_join_copies_the_phase_verbatim() {
  let config = WorkflowConfiguration::new().join_phase(&lettered_phase("a")).expect("join");

  assert_eq!(config.beginning(), Some("a1"));
  assert_eq!(config.conclusion(), Some("a3"));
  for name in ["a1", "a2", "a3"] {
    assert!(config.stages().contains(&stamped(name, "A")), "missing stage {name}");
  }
  assert!(config.transitions().contains(&Transition::between("a1", "a2")));
  assert!(config.transitions().contains(&Transition::between("a2", "a3")));
}

#[test]
fn second_join_wires_conclusion_to_next_beginning() {
  let config = WorkflowConfiguration::new()
    .join_phase(&lettered_phase("a"))
    .expect("join a")
    .join_phase(&lettered_phase("b"))
    .expect("join b");

  assert_eq!(config.beginning(), Some("a1"));
  assert_eq!(config.conclusion(), Some("b3"));
  assert!(config.transitions().contains(&Transition::between("a3", "b1")));
  assert!(config.transitions().contains(&Transition::between("b1", "b2")));
  assert!(config.transitions().contains(&Transition::between("b2", "b3")));
}

#[test]
fn join_uses_the_single_dangling_stage_without_conclusion() {
  let x_phase = Phase::new("X")
    .with_stage_names(["x1", "x2", "x3"])
    .with_transition(Transition::between("x1", "x2"))
    .expect("x1->x2")
    .with_transition(Transition::between("x2", "x3"))
    .expect("x2->x3")
    .begin_with("x1");

  let config = WorkflowConfiguration::new()
    .join_phase(&x_phase)
    .expect("join x")
    .join_phase(&lettered_phase("b"))
    .expect("join b");

  assert_eq!(config.beginning(), Some("x1"));
  assert_eq!(config.conclusion(), Some("b3"));
  assert!(config.transitions().contains(&Transition::between("x3", "b1")));
}

#[test]
fn join_fans_in_every_dangling_stage() {
  let x_phase = Phase::new("X")
    .with_stage_names(["x1", "ucx2", "x3", "ucx4"])
    .with_transition(Transition::between("x1", "ucx2"))
    .expect("x1->ucx2")
    .with_transition(Transition::between("x1", "x3"))
    .expect("x1->x3")
    .with_transition(Transition::between("x3", "ucx4"))
    .expect("x3->ucx4")
    .begin_with("x1");

  let config = WorkflowConfiguration::new()
    .join_phase(&x_phase)
    .expect("join x")
    .join_phase(&lettered_phase("b"))
    .expect("join b");

  // ambas ramas sin resolver convergen en el beginning de B
  assert!(config.transitions().contains(&Transition::between("ucx2", "b1")));
  assert!(config.transitions().contains(&Transition::between("ucx4", "b1")));
  assert!(!config.transitions().contains(&Transition::between("x1", "b1")));
  assert!(!config.transitions().contains(&Transition::between("x3", "b1")));
}

#[test]
fn joining_an_unconcluded_phase_clears_the_conclusion() {
  let x_phase = Phase::new("X")
    .with_stage_names(["x1", "x2"])
    .with_transition(Transition::between("x1", "x2"))
    .expect("x1->x2")
    .begin_with("x1");

  let config = WorkflowConfiguration::new()
    .join_phase(&lettered_phase("a"))
    .expect("join a")
    .join_phase(&x_phase)
    .expect("join x");

  // la fase unida no declara conclusión: la configuración queda abierta
  assert_eq!(config.conclusion(), None);
  assert!(config.transitions().contains(&Transition::between("a3", "x1")));
}

#[test]
fn join_requires_a_phase_beginning() {
  let no_beginning = Phase::new("N").with_stage_names(["n1"]);
  let err = WorkflowConfiguration::new().join_phase(&no_beginning).unwrap_err();
  assert!(matches!(err, TransitionError::PhaseWithoutBeginning(name) if name == "N"));
}

#[test]
fn phase_parse_from_keyed_data() {
  let phase = Phase::parse(json!({
    "name": "X",
    "stages": [
      { "name": "x1" },
      { "name": "x2", "action": "do_x2", "approval": true }
    ],
    "transitions": [{ "from": "x1", "to": "x2" }],
    "beginning": "x1",
    "conclusion": "x2"
  }))
  .expect("parse phase");

  assert_eq!(phase.name(), "X");
  assert_eq!(phase.beginning(), Some("x1"));
  assert_eq!(phase.conclusion(), Some("x2"));
  // los stages parseados quedan estampados con la fase
  assert!(phase.stages().iter().all(|s| s.phase() == Some("X")));
  assert!(phase.transitions().contains(&Transition::between("x1", "x2")));

  // las transiciones parseadas pasan por la misma validación del builder
  let err = Phase::parse(json!({
    "name": "X",
    "stages": [{ "name": "x1" }],
    "transitions": [{ "from": "x1", "to": "ghost" }]
  }))
  .unwrap_err();
  assert!(matches!(err, TransitionError::UnknownStage(name) if name == "ghost"));
}

#[test]
fn phases_are_registered_once() {
  let a_phase = lettered_phase("a");
  let config = WorkflowConfiguration::new()
    .with_phase(&a_phase)
    .with_phase(&a_phase)
    .join_phase(&lettered_phase("b"))
    .expect("join b");

  assert_eq!(config.phases().len(), 2);
  assert!(config.find_phase("A").is_some());
  assert!(config.find_phase("B").is_some());
  assert!(config.find_phase("Z").is_none());
  // with_phase registra sin cablear: no hay aristas de A en el grafo
  assert!(!config.transitions().iter().any(|t| t.from().starts_with('a')));
}
