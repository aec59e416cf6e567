// Services layer for business logic
// Services own the DTO <-> row mapping and call the repositories directly

pub mod event;
pub mod income;
pub mod outcome;

pub use event::EventService;
pub use income::IncomeService;
pub use outcome::OutcomeService;
