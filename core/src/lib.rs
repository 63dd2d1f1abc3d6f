//! # SW Lifecycle Core
//!
//! Core traits for tracking a service worker's lifecycle.
//!
//! The lifecycle is modelled as a reducer: every notification coming from the
//! worker-registration subsystem becomes an action, and a pure function folds
//! that action into the current state.
//!
//! ## Core Concepts
//!
//! - **State**: The record describing where the worker currently is
//! - **Action**: Every input a reducer accepts (one per lifecycle callback)
//! - **Reducer**: Pure function `(State, Action, Environment) → State`
//! - **Environment**: Injected dependencies
//!
//! ## Example
//!
//! ```
//! use sw_lifecycle_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Seen {
//!     count: usize,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum Ping {
//!     Ping,
//! }
//!
//! struct SeenReducer;
//!
//! impl Reducer for SeenReducer {
//!     type State = Seen;
//!     type Action = Ping;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Seen, _action: Ping, _env: &()) {
//!         state.count += 1;
//!     }
//! }
//!
//! let mut state = Seen::default();
//! SeenReducer.reduce(&mut state, Ping::Ping, &());
//! assert_eq!(state.count, 1);
//! ```

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → State`.
/// They are deterministic and testable without any runtime.
pub mod reducer {
    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into the state, in place
        ///
        /// Must be total: every action is accepted in every state. Logging is
        /// allowed; anything else observable is not.
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment);
    }
}

#[cfg(test)]
mod tests {
    use super::reducer::Reducer;

    #[derive(Debug, Clone, Copy)]
    enum Step {
        Up,
        Down,
    }

    /// Counts steps, floored at zero.
    struct Stairs;

    impl Reducer for Stairs {
        type State = u32;
        type Action = Step;
        type Environment = u32;

        fn reduce(&self, state: &mut u32, action: Step, stride: &u32) {
            match action {
                Step::Up => *state += stride,
                Step::Down => *state = state.saturating_sub(*stride),
            }
        }
    }

    #[test]
    fn reducer_folds_actions_in_order() {
        let mut state = 0;
        for step in [Step::Up, Step::Up, Step::Down] {
            Stairs.reduce(&mut state, step, &2);
        }
        assert_eq!(state, 2);
    }

    #[test]
    fn reducer_is_total() {
        let mut state = 0;
        Stairs.reduce(&mut state, Step::Down, &5);
        assert_eq!(state, 0);
    }
}
