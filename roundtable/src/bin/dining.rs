//! Console front-end for the dining table simulation.
//!
//! Runs the classic five-philosopher dinner and renders the event stream.
//! All coordination lives in the `roundtable` library; this binary only
//! prints.

use roundtable::{Philosopher, SimulationEngine, SimulationParameters, SimulationResult, TableEvent};

#[tokio::main]
async fn main() -> SimulationResult<()> {
    tracing_subscriber::fmt::init();

    println!();
    println!("Dining Philosophers");
    println!("===================");
    println!("The table is empty");

    let mut engine = SimulationEngine::new(SimulationParameters::default());
    let mut events = engine.subscribe();

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                TableEvent::Seated { philosopher } => {
                    println!("{philosopher} is seated at the table.");
                }
                TableEvent::ForkAcquired { philosopher, fork } => {
                    println!("\t{philosopher} takes fork {fork}.");
                }
                TableEvent::Eating { philosopher } => {
                    println!("\t{philosopher} has both forks and is eating.");
                }
                TableEvent::ForkReleased { philosopher, fork } => {
                    println!("\t{philosopher} puts down fork {fork}.");
                }
                TableEvent::Thinking { philosopher } => {
                    println!("\t{philosopher} is thinking.");
                }
                TableEvent::Finished { philosopher } => {
                    println!("{philosopher} is satisfied and left the table.");
                }
            }
        }
    });

    let ledger = engine.run(Philosopher::ring(5)).await?;

    // Dropping the engine closes the event channel so the printer drains.
    drop(engine);
    let _ = printer.await;

    let order: Vec<String> = ledger.snapshot().iter().map(ToString::to_string).collect();
    println!("===================");
    println!("The table is empty");
    println!("Order finished: {}.", order.join(", "));

    Ok(())
}
