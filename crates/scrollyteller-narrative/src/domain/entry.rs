//! Narration entries.

use std::sync::{Arc, Weak};

use scrollyteller_core::element::StepElement;
use scrollyteller_core::error::StoryError;
use serde_json::Value;

use super::trigger::{TriggerDecomposition, TriggerState, decompose_trigger};

/// Field holding the trigger string in a narration row.
pub const TRIGGER_FIELD: &str = "trigger";

/// One narration block, in step order.
#[derive(Debug, Clone)]
pub struct NarrationEntry {
    /// Zero-based position, matching the step element order.
    pub index: usize,
    /// The raw trigger string.
    pub trigger: String,
    /// Decomposed trigger state, present when decomposition is enabled.
    pub state: Option<TriggerState>,
    /// Tokens dropped while decomposing the trigger.
    pub dropped_tokens: usize,
    /// The full narration row as resolved.
    pub row: Value,
    element: Option<Weak<dyn StepElement>>,
}

impl NarrationEntry {
    /// Builds the entry at `index` from a resolved row.
    ///
    /// The trigger may be a string or a number; a missing or null trigger is
    /// treated as empty.
    ///
    /// # Errors
    ///
    /// Returns `StoryError::InvalidNarrationShape` if `row` is not an object
    /// or its trigger is neither a string nor a number.
    pub fn from_row(index: usize, row: Value, decompose: bool) -> Result<Self, StoryError> {
        let Value::Object(fields) = &row else {
            return Err(StoryError::InvalidNarrationShape(format!(
                "narration row {index} is not an object"
            )));
        };

        let trigger = match fields.get(TRIGGER_FIELD) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(trigger)) => trigger.clone(),
            Some(Value::Number(trigger)) => trigger.to_string(),
            Some(_) => {
                return Err(StoryError::InvalidNarrationShape(format!(
                    "narration row {index} has a non-text trigger"
                )));
            }
        };

        let (state, dropped_tokens) = if decompose {
            let TriggerDecomposition { state, dropped } = decompose_trigger(&trigger);
            (Some(state), dropped)
        } else {
            (None, 0)
        };

        Ok(Self {
            index,
            trigger,
            state,
            dropped_tokens,
            row,
            element: None,
        })
    }

    /// Relates this entry to its step element without taking ownership.
    pub fn bind_element(&mut self, element: &Arc<dyn StepElement>) {
        self.element = Some(Arc::downgrade(element));
    }

    /// Returns the step element if it is bound and still alive.
    #[must_use]
    pub fn element(&self) -> Option<Arc<dyn StepElement>> {
        self.element.as_ref().and_then(Weak::upgrade)
    }

    /// Looks up a decomposed state value.
    #[must_use]
    pub fn state_value(&self, key: &str) -> Option<&str> {
        self.state.as_ref()?.get(key).map(String::as_str)
    }
}
