mod state;

pub use state::StateController;
