//! Composable workflow steps.
//!
//! Content-type workflows are ordered pipelines of small steps sharing one
//! command and threading a state value through. Each step either transforms
//! the state or fails the whole pipeline; no step runs after the first error.
//! Services assemble their pipelines from the validators and property
//! mutators in the submodules, in a fixed order per operation.

pub mod authors;
pub mod properties;
pub mod validators;

use crate::error::ScholiaResult;

/// One step of a workflow pipeline.
///
/// `C` is the immutable command driving the workflow; `S` is the state
/// accumulated across steps (typically the IDs minted so far).
pub trait Action<C, S> {
    fn execute(&self, command: &C, state: S) -> ScholiaResult<S>;
}

impl<C, S, F> Action<C, S> for F
where
    F: Fn(&C, S) -> ScholiaResult<S>,
{
    fn execute(&self, command: &C, state: S) -> ScholiaResult<S> {
        self(command, state)
    }
}

/// Fold the command and initial state through every step in order,
/// short-circuiting on the first error.
pub fn run_pipeline<C, S>(
    steps: &[Box<dyn Action<C, S> + '_>],
    command: &C,
    state: S,
) -> ScholiaResult<S> {
    steps
        .iter()
        .try_fold(state, |state, step| step.execute(command, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkflowError;

    #[test]
    fn steps_run_in_order_and_thread_state() {
        let steps: Vec<Box<dyn Action<i32, Vec<i32>>>> = vec![
            Box::new(|command: &i32, mut state: Vec<i32>| {
                state.push(*command);
                Ok(state)
            }),
            Box::new(|command: &i32, mut state: Vec<i32>| {
                state.push(command * 2);
                Ok(state)
            }),
        ];
        let out = run_pipeline(&steps, &3, Vec::new()).unwrap();
        assert_eq!(out, vec![3, 6]);
    }

    #[test]
    fn first_error_stops_the_pipeline() {
        let steps: Vec<Box<dyn Action<(), u32>>> = vec![
            Box::new(|_: &(), state: u32| Ok(state + 1)),
            Box::new(|_: &(), _: u32| {
                Err(WorkflowError::MissingRequiredValue { field: "title" }.into())
            }),
            Box::new(|_: &(), state: u32| Ok(state + 100)),
        ];
        let err = run_pipeline(&steps, &(), 0).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ScholiaError::Workflow(WorkflowError::MissingRequiredValue {
                field: "title"
            })
        ));
    }
}
