pub mod application;
pub mod contest;
pub mod ids;

pub use application::{ApplicationEdit, ApplicationStatus, ContestApplication, NewApplication};
pub use contest::{Contest, ContestEdit, ContestStatus, NewContest};
