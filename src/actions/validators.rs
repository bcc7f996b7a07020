//! Field validators shared by the content-type pipelines.
//!
//! Validators are generic over the command type: each one carries an
//! extractor closure that pulls the relevant field out of the command, so the
//! same validator type serves every workflow. They never touch the store and
//! never mutate state.

use crate::actions::Action;
use crate::error::{GraphError, ScholiaResult, WorkflowError};
use crate::thing::validate_label;

type Extract<C, T> = Box<dyn Fn(&C) -> T + Send + Sync>;

fn invalid(field: &'static str, err: GraphError) -> WorkflowError {
    let reason = match err {
        GraphError::InvalidLabel { reason } => reason,
        other => other.to_string(),
    };
    WorkflowError::InvalidField { field, reason }
}

/// Validates a single label-like field: non-blank, within the length cap.
/// An absent optional field passes.
pub struct LabelValidator<C> {
    field: &'static str,
    extract: Extract<C, Option<String>>,
}

impl<C> LabelValidator<C> {
    pub fn new(
        field: &'static str,
        extract: impl Fn(&C) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            field,
            extract: Box::new(extract),
        }
    }
}

impl<C, S> Action<C, S> for LabelValidator<C> {
    fn execute(&self, command: &C, state: S) -> ScholiaResult<S> {
        if let Some(value) = (self.extract)(command) {
            validate_label(&value).map_err(|e| invalid(self.field, e))?;
        }
        Ok(state)
    }
}

/// Validates a free-text description field. Descriptions share the label
/// length cap but may be absent.
pub struct DescriptionValidator<C> {
    field: &'static str,
    extract: Extract<C, Option<String>>,
}

impl<C> DescriptionValidator<C> {
    pub fn new(
        field: &'static str,
        extract: impl Fn(&C) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            field,
            extract: Box::new(extract),
        }
    }
}

impl<C, S> Action<C, S> for DescriptionValidator<C> {
    fn execute(&self, command: &C, state: S) -> ScholiaResult<S> {
        if let Some(value) = (self.extract)(command) {
            validate_label(&value).map_err(|e| invalid(self.field, e))?;
        }
        Ok(state)
    }
}

/// Validates every element of a label collection (references, keywords).
pub struct LabelCollectionValidator<C> {
    field: &'static str,
    extract: Extract<C, Vec<String>>,
}

impl<C> LabelCollectionValidator<C> {
    pub fn new(
        field: &'static str,
        extract: impl Fn(&C) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            field,
            extract: Box::new(extract),
        }
    }
}

impl<C, S> Action<C, S> for LabelCollectionValidator<C> {
    fn execute(&self, command: &C, state: S) -> ScholiaResult<S> {
        for value in (self.extract)(command) {
            validate_label(&value).map_err(|e| invalid(self.field, e))?;
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScholiaError;
    use crate::thing::MAX_LABEL_LENGTH;

    struct Command {
        title: String,
        description: Option<String>,
        references: Vec<String>,
    }

    fn command() -> Command {
        Command {
            title: "a study of studies".into(),
            description: None,
            references: vec!["doi:10.1000/1".into()],
        }
    }

    #[test]
    fn blank_title_is_rejected_with_the_field_name() {
        let validator = LabelValidator::new("title", |c: &Command| Some(c.title.clone()));
        let mut cmd = command();
        cmd.title = "   ".into();
        let err = validator.execute(&cmd, ()).unwrap_err();
        match err {
            ScholiaError::Workflow(WorkflowError::InvalidField { field, .. }) => {
                assert_eq!(field, "title");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn absent_description_passes() {
        let validator =
            DescriptionValidator::new("description", |c: &Command| c.description.clone());
        validator.execute(&command(), ()).unwrap();
    }

    #[test]
    fn oversized_description_is_rejected() {
        let validator =
            DescriptionValidator::new("description", |c: &Command| c.description.clone());
        let mut cmd = command();
        cmd.description = Some("x".repeat(MAX_LABEL_LENGTH + 1));
        assert!(validator.execute(&cmd, ()).is_err());
    }

    #[test]
    fn collection_validates_each_element() {
        let validator =
            LabelCollectionValidator::new("references", |c: &Command| c.references.clone());
        validator.execute(&command(), ()).unwrap();

        let mut cmd = command();
        cmd.references.push(String::new());
        assert!(validator.execute(&cmd, ()).is_err());
    }
}
