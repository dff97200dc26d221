pub mod role_assignment;
pub mod vote_engine;
