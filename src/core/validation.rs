use crate::core::selection::Selection;

pub type ValidationError = String;
pub type Validator = Box<dyn Fn(&Selection) -> Result<(), ValidationError> + Send + Sync>;

pub const DEFAULT_SELECTION_MESSAGE: &str = "You have to select at least one item.";

/// Run a list of validators against `selection`, returning the first error.
pub fn run_validators(validators: &[Validator], selection: &Selection) -> Result<(), ValidationError> {
    for validator in validators {
        validator(selection)?;
    }
    Ok(())
}

pub fn at_least_one(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |selection: &Selection| {
        if selection.iter().any(|id| !id.as_str().is_empty()) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}
