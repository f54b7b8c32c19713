
/// Cycle engine: halt, op-ids, state dump.
pub mod engine;


/// Latch entries and stage views.
pub mod latches;
