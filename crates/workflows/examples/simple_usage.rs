use workflow_domain::{Stage, Transition};
use workflows::errors::TransitionError;
use workflows::{Phase, WorkflowConfiguration};

fn main() -> Result<(), TransitionError> {
    // Fase de redacción: draft -> reviewed, concluye en reviewed
    let writing = Phase::new("WRITING")
        .with_stages([Stage::named("draft"),
                      Stage::named("reviewed").with_action("review_article")?])
        .with_transition(Transition::between("draft", "reviewed"))?
        .begin_with("draft")
        .conclude_at("reviewed");

    // Fase de publicación, construida y testeable por separado
    let publishing = Phase::new("PUBLISHING")
        .with_stages([Stage::named("scheduled").with_action("schedule_article")?,
                      Stage::named("published").with_action("publish_article")?])
        .with_transition(Transition::between("scheduled", "published"))?
        .begin_with("scheduled")
        .conclude_at("published");

    // Unión de fases: reviewed -> scheduled queda cableado automáticamente
    let config = WorkflowConfiguration::new().join_phase(&writing)?.join_phase(&publishing)?;
    println!("workflow: begin={:?} conclude={:?}", config.beginning(), config.conclusion());

    let mut state = config.init_stage()?;
    println!("init: stage={} allowed_actions={:?}", state.stage, state.allowed_actions);

    for action in ["review_article", "schedule_article", "publish_article"] {
        state = config.execute(&state, action)?;
        println!("execute {}: stage={} phase={:?} state={}",
                 action, state.stage, state.phase, state.state);
    }

    // move_to directo también funciona sobre aristas declaradas
    let direct = config.init_stage()?;
    let direct = config.move_to(&direct, "reviewed")?;
    println!("move_to reviewed: allowed_transitions={:?}", direct.allowed_transitions);

    Ok(())
}
