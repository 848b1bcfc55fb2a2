//! State-machine cursor.
//!
//! Operators describe themselves as a `Setup` closure that, when called,
//! acquires fresh upstream cursors and returns a `Step` closure bound to
//! them. `Step` yields `Some(value)` per element and `None` once done.
//!
//! ```text
//!   Setup --advance--> setup() then step() --Some--> HasValue
//!                                          --None--> Exhausted
//!   HasValue --advance--> step()           --Some--> HasValue
//!                                          --None--> Exhausted
//!   Exhausted --advance--> false (nothing invoked)
//!   any --restart--> Setup
//! ```
//!
//! A machine built with `single_pass` sits downstream of a one-shot
//! iterator; re-running its setup cannot reproduce the elements already
//! handed out, so `restart()` fails with `RestartUnsupported` instead.

use std::rc::Rc;

use lazyq_core::{Error, Result};

use crate::enumerator::Enumerator;

/// Produces the next element, or `None` when the operator is done.
pub type Step<T> = Box<dyn FnMut() -> Option<T>>;

/// One-time initializer run on the first `advance()` after creation or restart.
pub type Setup<T> = Rc<dyn Fn() -> Step<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Setup,
    HasValue,
    Exhausted,
}

pub struct StateMachine<T> {
    setup: Setup<T>,
    step: Option<Step<T>>,
    state: State,
    staged: Option<T>,
    restartable: bool,
}

impl<T> StateMachine<T> {
    pub fn new(setup: Setup<T>) -> Self {
        Self {
            setup,
            step: None,
            state: State::Setup,
            staged: None,
            restartable: true,
        }
    }

    /// A machine whose upstream is a one-shot iterator. `restart()` fails.
    pub fn single_pass(setup: Setup<T>) -> Self {
        Self {
            restartable: false,
            ..Self::new(setup)
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    fn pull(&mut self) -> bool {
        let next = match self.step.as_mut() {
            Some(step) => step(),
            None => None,
        };
        match next {
            Some(value) => {
                self.staged = Some(value);
                self.state = State::HasValue;
                true
            }
            None => {
                // Dropping the step releases the upstream cursors it owns.
                self.step = None;
                self.state = State::Exhausted;
                #[cfg(feature = "tracing")]
                tracing::trace!("state machine exhausted");
                false
            }
        }
    }
}

impl<T> Enumerator for StateMachine<T> {
    type Item = T;

    #[inline]
    fn advance(&mut self) -> bool {
        match self.state {
            State::Exhausted => false,
            State::HasValue => self.pull(),
            State::Setup => {
                self.step = Some((self.setup)());
                self.pull()
            }
        }
    }

    #[inline]
    fn current(&self) -> Option<&T> {
        self.staged.as_ref()
    }

    fn restart(&mut self) -> Result<()> {
        if !self.restartable {
            return Err(Error::RestartUnsupported);
        }
        self.step = None;
        self.staged = None;
        self.state = State::Setup;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_machine(
        limit: u32,
        setups: Rc<Cell<u32>>,
        steps: Rc<Cell<u32>>,
    ) -> StateMachine<u32> {
        let setup: Setup<u32> = Rc::new(move || -> Step<u32> {
            setups.set(setups.get() + 1);
            let steps = Rc::clone(&steps);
            let mut n = 0;
            Box::new(move || {
                steps.set(steps.get() + 1);
                if n < limit {
                    n += 1;
                    Some(n)
                } else {
                    None
                }
            })
        });
        StateMachine::new(setup)
    }

    #[test]
    fn test_setup_runs_lazily_once() {
        let setups = Rc::new(Cell::new(0));
        let steps = Rc::new(Cell::new(0));
        let mut sm = counting_machine(2, Rc::clone(&setups), Rc::clone(&steps));

        assert_eq!(sm.state(), State::Setup);
        assert_eq!(setups.get(), 0);
        assert_eq!(sm.current(), None);

        assert!(sm.advance());
        assert_eq!(sm.state(), State::HasValue);
        assert_eq!(sm.current(), Some(&1));
        assert!(sm.advance());
        assert_eq!(setups.get(), 1);
        assert_eq!(steps.get(), 2);
    }

    #[test]
    fn test_exhausted_is_idempotent_and_frozen() {
        let setups = Rc::new(Cell::new(0));
        let steps = Rc::new(Cell::new(0));
        let mut sm = counting_machine(1, setups, Rc::clone(&steps));

        assert!(sm.advance());
        assert!(!sm.advance());
        assert_eq!(sm.state(), State::Exhausted);
        let steps_at_exhaustion = steps.get();

        assert!(!sm.advance());
        assert!(!sm.advance());
        assert_eq!(steps.get(), steps_at_exhaustion);
        assert_eq!(sm.current(), Some(&1));
    }

    #[test]
    fn test_restart_reinvokes_setup() {
        let setups = Rc::new(Cell::new(0));
        let steps = Rc::new(Cell::new(0));
        let mut sm = counting_machine(3, Rc::clone(&setups), steps);

        while sm.advance() {}
        sm.restart().expect("restart");
        assert_eq!(sm.state(), State::Setup);
        assert_eq!(sm.current(), None);

        let mut again = Vec::new();
        while sm.advance() {
            again.extend(sm.current().copied());
        }
        assert_eq!(again, vec![1, 2, 3]);
        assert_eq!(setups.get(), 2);
    }

    #[test]
    fn test_single_pass_machine_refuses_restart() {
        let setups = Rc::new(Cell::new(0));
        let steps = Rc::new(Cell::new(0));
        let counter = Rc::clone(&setups);
        let setup: Setup<u32> = Rc::new(move || -> Step<u32> {
            counter.set(counter.get() + 1);
            let steps = Rc::clone(&steps);
            Box::new(move || {
                steps.set(steps.get() + 1);
                (steps.get() <= 2).then_some(steps.get())
            })
        });
        let mut sm = StateMachine::single_pass(setup);

        while sm.advance() {}
        assert_eq!(sm.restart(), Err(Error::RestartUnsupported));
        assert_eq!(sm.state(), State::Exhausted);
        assert_eq!(sm.current(), Some(&2));
        assert!(!sm.advance());
        assert_eq!(setups.get(), 1);
    }
}
