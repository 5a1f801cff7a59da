use std::error::Error;
use std::sync::Arc;
use workflow_domain::{Stage, Transition};
use workflows::{Entity, WorkflowConfiguration};

/// Demo del motor de workflows: construye una configuración ramificada,
/// conduce una entidad hasta la conclusión y después recorre un ciclo de
/// aprobación (in_review -> rejected -> in_review -> approved).
fn main() -> Result<(), Box<dyn Error>> {
    // Grafo ramificado a..g con begin a y conclusión g
    let mut branching = WorkflowConfiguration::new()
        .with_stage_names(["a", "b", "c", "d", "e", "f", "g"]);
    for (from, to) in [("a", "b"), ("a", "c"), ("c", "d"), ("b", "e"), ("d", "f"), ("e", "f"), ("f", "g")] {
        branching = branching.with_transition(Transition::between(from, to))?;
    }
    let branching = Arc::new(branching.begin_with("a").conclude_at("g"));

    let mut entity = Entity::init(branching.clone())?;
    println!("entity {} created at {}", entity.id(), entity.created_at());
    println!("init: stage={} allowed={:?}", entity.stage(), entity.allowed_transitions());

    for stage in ["c", "d", "f", "g"] {
        entity.transition_to(stage)?;
        println!("move_to {}: state={}", stage, entity.state());
    }

    // Una transición no declarada falla y deja el estado intacto
    let mut other = Entity::init(branching)?;
    if let Err(e) = other.transition_to("e") {
        println!("expected error: {}", e);
    }
    println!("other entity still at {}", other.stage());

    // Ciclo de aprobación sobre cotizaciones de proveedor
    let quotes = Arc::new(WorkflowConfiguration::new()
        .with_stages([Stage::named("quote_requested"),
                      Stage::named("supplier_quotes_updated")
                          .with_action("update_supplier_quote")?
                          .with_approval()])
        .with_transition(Transition::between("quote_requested", "supplier_quotes_updated"))?
        .begin_with("quote_requested")
        .conclude_at("supplier_quotes_updated"));

    let mut quote = Entity::init(quotes)?;
    quote.execute("update_supplier_quote")?;
    println!("after execute: approval={}", quote.approval_state());
    quote.reject()?;
    println!("after reject: approval={}", quote.approval_state());
    quote.execute("update_supplier_quote")?;
    println!("after retry: approval={}", quote.approval_state());
    quote.approve()?;
    println!("after approve: approval={} state={}", quote.approval_state(), quote.state());

    Ok(())
}
