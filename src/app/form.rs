use crate::constants::{COLLECTION_FIELD_MAX_LEN, PROMPT_MAX_LEN};
use crate::error::{Field, FieldError, MintResult};
use crate::generation::{GenerationRequest, Style};
use crate::transactions::validate_collection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Prompt,
    NegativePrompt,
    Style,
}

impl FormField {
    const ORDER: [FormField; 3] = [FormField::Prompt, FormField::NegativePrompt, FormField::Style];

    fn step(self, forward: bool) -> FormField {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let len = Self::ORDER.len();
        let next = if forward { (index + 1) % len } else { (index + len - 1) % len };
        Self::ORDER[next]
    }
}

/// Raw text of the prompt form plus its inline errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptForm {
    pub prompt: String,
    pub negative_prompt: String,
    pub style: Option<Style>,
    pub focus: FormField,
    errors: Vec<FieldError>,
}

impl Default for PromptForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptForm {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            negative_prompt: String::new(),
            style: None,
            focus: FormField::Prompt,
            errors: Vec::new(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let target = match self.focus {
            FormField::Prompt => &mut self.prompt,
            FormField::NegativePrompt => &mut self.negative_prompt,
            FormField::Style => return,
        };
        if target.chars().count() < PROMPT_MAX_LEN {
            target.push(c);
        }
        self.clear_error_for(self.focused_field());
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Prompt => {
                self.prompt.pop();
            }
            FormField::NegativePrompt => {
                self.negative_prompt.pop();
            }
            FormField::Style => self.style = None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.step(true);
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.step(false);
    }

    pub fn cycle_style(&mut self, forward: bool) {
        self.style = Style::cycle(self.style, forward);
        self.clear_error_for(Field::Style);
    }

    /// Build a request, recording field errors inline on failure.
    pub fn to_request(&mut self) -> MintResult<GenerationRequest> {
        let style = self.style.map(|s| s.value());
        match GenerationRequest::validate(&self.prompt, &self.negative_prompt, style) {
            Ok(request) => {
                self.errors.clear();
                Ok(request)
            }
            Err(e) => {
                self.errors = e.field_errors().to_vec();
                Err(e)
            }
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    fn focused_field(&self) -> Field {
        match self.focus {
            FormField::Prompt => Field::Prompt,
            FormField::NegativePrompt => Field::NegativePrompt,
            FormField::Style => Field::Style,
        }
    }

    fn clear_error_for(&mut self, field: Field) {
        self.errors.retain(|e| e.field != field);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionField {
    Name,
    Symbol,
}

/// The "create collection" dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionForm {
    pub name: String,
    pub symbol: String,
    pub focus: CollectionField,
    errors: Vec<FieldError>,
}

impl CollectionForm {
    pub fn new(default_name: &str, default_symbol: &str) -> Self {
        Self {
            name: default_name.to_string(),
            symbol: default_symbol.to_string(),
            focus: CollectionField::Name,
            errors: Vec::new(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let (target, field) = match self.focus {
            CollectionField::Name => (&mut self.name, Field::CollectionName),
            CollectionField::Symbol => (&mut self.symbol, Field::CollectionSymbol),
        };
        if target.chars().count() < COLLECTION_FIELD_MAX_LEN {
            target.push(c);
        }
        self.errors.retain(|e| e.field != field);
    }

    pub fn backspace(&mut self) {
        match self.focus {
            CollectionField::Name => self.name.pop(),
            CollectionField::Symbol => self.symbol.pop(),
        };
    }

    pub fn toggle_field(&mut self) {
        self.focus = match self.focus {
            CollectionField::Name => CollectionField::Symbol,
            CollectionField::Symbol => CollectionField::Name,
        };
    }

    /// Trimmed `(name, symbol)`, or the field errors recorded inline.
    pub fn validate(&mut self) -> MintResult<(String, String)> {
        match validate_collection(&self.name, &self.symbol) {
            Ok(()) => {
                self.errors.clear();
                Ok((self.name.trim().to_string(), self.symbol.trim().to_string()))
            }
            Err(e) => {
                self.errors = e.field_errors().to_vec();
                Err(e)
            }
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}
