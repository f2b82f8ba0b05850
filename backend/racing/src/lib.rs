//! Formula 1 reference data for the persona agent: the grid, the calendar,
//! weekend formats, and how simulated session results are produced.

pub mod circuits;
pub mod results;
pub mod teams;
pub mod weekend;

pub use circuits::{circuit, circuits, require_circuit, Circuit, Difficulty, DEFAULT_CIRCUIT};
pub use results::{
    format_lap_time, PerformanceTier, RandomResultPolicy, ResultPolicy, ScriptedResultPolicy,
};
pub use teams::{team, teammate_for, teams, Team};
pub use weekend::{message_type_for, schedule, Day, ScheduledSession};
