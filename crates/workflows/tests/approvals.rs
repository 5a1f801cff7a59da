use std::sync::Arc;
use workflow_domain::{ApprovalState, LifecycleState, Stage, Transition};
use workflows::{Entity, WorkflowConfiguration};

// flujo de cotizaciones: el stage aprobable es también la conclusión
fn quotes_config() -> WorkflowConfiguration {
  let stages = vec![
    Stage::named("quote_requested"),
    Stage::named("supplier_quotes_updated")
      .with_action("update_supplier_quote")
      .expect("valid action label")
      .with_approval(),
  ];
  WorkflowConfiguration::new()
    .with_stages(stages)
    .with_transition(Transition::between("quote_requested", "supplier_quotes_updated"))
    .expect("declared edge")
    .begin_with("quote_requested")
    .conclude_at("supplier_quotes_updated")
}

// flujo con puerta de aprobación intermedia: start -> review -> done
fn review_config() -> WorkflowConfiguration {
  let stages = vec![
    Stage::named("start"),
    Stage::named("review").with_action("submit_review").expect("valid action label").with_approval(),
    Stage::named("done").with_action("finish").expect("valid action label"),
  ];
  WorkflowConfiguration::new()
    .with_stages(stages)
    .with_transition(Transition::between("start", "review"))
    .expect("start->review")
    .with_transition(Transition::between("review", "done"))
    .expect("review->done")
    .begin_with("start")
    .conclude_at("done")
}

#[test]
fn entering_a_gated_stage_goes_in_review_and_empties_allowed_sets() {
  let config = quotes_config();
  let state = config.init_stage().expect("init");
  let state = config.execute(&state, "update_supplier_quote").expect("reach gated stage");

  assert_eq!(state.stage, "supplier_quotes_updated");
  assert_eq!(state.approval_state, ApprovalState::InReview);
  // aunque el stage es la conclusión, con aprobación pendiente no hay éxito
  assert_eq!(state.state, LifecycleState::InProgress);
  assert!(state.allowed_transitions.is_empty());
  assert!(state.allowed_actions.is_empty());
}

#[test]
fn nothing_executes_while_waiting_for_approval() {
  let config = quotes_config();
  let state = config.init_stage().expect("init");
  let state = config.execute(&state, "update_supplier_quote").expect("reach gated stage");

  let err = config.execute(&state, "update_supplier_quote").unwrap_err();
  assert_eq!(err.to_string(),
             "Action update_supplier_quote cannot be performed while waiting for approval");
}

#[test]
fn reject_then_retry_returns_to_in_review() {
  let config = quotes_config();
  let state = config.init_stage().expect("init");
  let state = config.execute(&state, "update_supplier_quote").expect("reach gated stage");

  let rejected = config.reject(&state).expect("reject pending decision");
  assert_eq!(rejected.approval_state, ApprovalState::Rejected);
  assert_eq!(rejected.stage, "supplier_quotes_updated");
  assert_eq!(rejected.state, LifecycleState::InProgress);
  assert!(rejected.allowed_transitions.is_empty());

  // reintento: misma acción, sin error de arista, vuelve a revisión
  let retried = config.execute(&rejected, "update_supplier_quote").expect("retry after rejection");
  assert_eq!(retried.approval_state, ApprovalState::InReview);
  assert_eq!(retried.stage, "supplier_quotes_updated");
}

#[test]
fn approve_at_the_conclusion_succeeds_the_lifecycle() {
  let config = quotes_config();
  let state = config.init_stage().expect("init");
  let state = config.execute(&state, "update_supplier_quote").expect("reach gated stage");

  let approved = config.approve(&state).expect("approve pending decision");
  assert_eq!(approved.approval_state, ApprovalState::Approved);
  assert_eq!(approved.state, LifecycleState::Success);
}

#[test]
fn approve_recomputes_the_allowed_sets() {
  let config = review_config();
  let state = config.init_stage().expect("init");
  let state = config.execute(&state, "submit_review").expect("reach review");
  assert!(state.allowed_actions.is_empty());

  let approved = config.approve(&state).expect("approve");
  assert_eq!(approved.state, LifecycleState::InProgress);
  assert_eq!(approved.allowed_transitions, vec![Transition::between("review", "done")]);
  assert_eq!(approved.allowed_actions, vec!["finish".to_string()]);

  // re-invocar la acción del stage aprobado es un no-op
  let repeated = config.execute(&approved, "submit_review").expect("no-op");
  assert_eq!(repeated, approved);

  let finished = config.execute(&approved, "finish").expect("review -> done");
  assert_eq!(finished.stage, "done");
  assert_eq!(finished.state, LifecycleState::Success);
  assert_eq!(finished.approval_state, ApprovalState::None);
}

#[test]
fn decisions_require_an_approval_gate() {
  let config = review_config();
  let state = config.init_stage().expect("init");

  let err = config.approve(&state).unwrap_err();
  assert_eq!(err.to_string(), "Current stage start does not have approvals");
  assert!(config.reject(&state).is_err());
}

#[test]
fn move_to_into_a_gated_stage_goes_in_review() {
  let config = review_config();
  let state = config.init_stage().expect("init");
  let state = config.move_to(&state, "review").expect("start -> review");
  assert_eq!(state.approval_state, ApprovalState::InReview);
  assert!(state.allowed_transitions.is_empty());
}

#[test]
fn entity_routes_reserved_tokens_to_decisions() {
  let config = Arc::new(quotes_config());
  let mut entity = Entity::init(config).expect("init entity");
  entity.execute("update_supplier_quote").expect("reach gated stage");
  assert_eq!(entity.approval_state(), ApprovalState::InReview);

  entity.execute("reject").expect("reject via reserved token");
  assert_eq!(entity.approval_state(), ApprovalState::Rejected);

  entity.execute("update_supplier_quote").expect("retry");
  entity.execute("approve").expect("approve via reserved token");
  assert_eq!(entity.approval_state(), ApprovalState::Approved);
  assert_eq!(entity.state(), LifecycleState::Success);
}
