/// Digit-only text field, as used for the collection and token id inputs.
///
/// Edits that would leave anything other than ASCII digits in the field are
/// rejected and the previous value is kept. An empty field is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumericInput(String);

impl NumericInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepts(value: &str) -> bool {
        value.chars().all(|c| c.is_ascii_digit())
    }

    /// Applies an edit. Returns `false` when the edit was rejected.
    pub fn set(&mut self, value: &str) -> bool {
        if !Self::accepts(value) {
            return false;
        }
        self.0 = value.to_string();
        true
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
