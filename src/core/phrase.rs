/// Phrase generation: from a template catalog and a spin to a caption.
///
/// The pipeline runs in a fixed order. Build the placeholder context
/// from the spin, select one catalog entry by weight, flatten it into a
/// single string, substitute placeholders, then hand the result to the
/// normalizer. Everything is a pure function of the inputs and the
/// rng's draws, so a seeded rng reproduces a caption exactly.
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::context::build_context;
use crate::core::english::{English, Normalizer};
use crate::core::select::weighted_choice;
use crate::core::template::{template_weights, Template, TemplateError};
use crate::schema::machine::MachineStyle;
use crate::schema::symbol::SpunReels;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhraseError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("invalid weights: {0}")]
    InvalidWeights(String),
    #[error("no value for placeholder {0:?}")]
    MissingPlaceholder(String),
    #[error("invalid spin shape: {0}")]
    InvalidSpinShape(String),
}

/// Caption generator over a validated template catalog.
#[derive(Debug)]
pub struct PhraseGenerator {
    templates: Vec<Template>,
    normalizer: Box<dyn Normalizer>,
}

impl PhraseGenerator {
    /// Build a generator over the given catalog, smoothing captions
    /// with the [`English`] normalizer. Every template is validated up
    /// front; a malformed catalog never reaches generation.
    pub fn new(templates: Vec<Template>) -> Result<Self, PhraseError> {
        Self::with_normalizer(templates, Box::new(English))
    }

    /// Same as [`new`](Self::new) with a caller-supplied normalizer.
    pub fn with_normalizer(
        templates: Vec<Template>,
        normalizer: Box<dyn Normalizer>,
    ) -> Result<Self, PhraseError> {
        for template in &templates {
            template.validate()?;
        }
        Ok(Self {
            templates,
            normalizer,
        })
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Generate one caption for a spin.
    ///
    /// `today` feeds the `{month}` and `{weekday}` placeholders; the
    /// clock read is left to the caller so the engine stays
    /// deterministic under a fixed seed.
    pub fn generate(
        &self,
        machine: &MachineStyle,
        reels: &SpunReels,
        today: NaiveDate,
        rng: &mut StdRng,
    ) -> Result<String, PhraseError> {
        let context = build_context(machine, reels, today, rng)?;

        // The catalog is a non-root choice among alternatives, so each
        // entry's selection weight is additive. Root (multiplicative)
        // semantics apply only inside the chosen entry, below.
        let weights = template_weights(&self.templates, false);
        let chosen = weighted_choice(&self.templates, &weights, rng)?;

        let flat = instantiate(chosen, true, rng)?;
        let substituted = substitute(&flat, &context)?;
        Ok(self.normalizer.normalize(substituted))
    }
}

/// Flatten a template into a single string of text and placeholder
/// tokens.
///
/// A root branch is a sequence: every child is instantiated (non-root)
/// and the results concatenate in order. A non-root branch is a choice:
/// one child is drawn by weight and instantiated. Leaves return their
/// text as is. Nothing below the root is ever treated as root again.
fn instantiate(
    template: &Template,
    root: bool,
    rng: &mut StdRng,
) -> Result<String, PhraseError> {
    match template {
        Template::Leaf(text) => Ok(text.clone()),
        Template::Branch(children) => {
            if root {
                let mut flat = String::new();
                for child in children {
                    flat.push_str(&instantiate(child, false, rng)?);
                }
                Ok(flat)
            } else {
                let weights = template_weights(children, false);
                let chosen = weighted_choice(children, &weights, rng)?;
                instantiate(chosen, false, rng)
            }
        }
    }
}

/// Replace every `{name}` token in `text` with its context value.
/// `{{` and `}}` render as literal braces. A token with no matching
/// key fails; a caption is never published with a hole in it.
fn substitute(
    text: &str,
    context: &FxHashMap<String, String>,
) -> Result<String, PhraseError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => {
                            return Err(TemplateError::NestedBrace(text.to_string()).into());
                        }
                        Some(inner) => name.push(inner),
                        None => {
                            return Err(TemplateError::UnclosedToken(text.to_string()).into());
                        }
                    }
                }
                match context.get(&name) {
                    Some(value) => out.push_str(value),
                    None => return Err(PhraseError::MissingPlaceholder(name)),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(TemplateError::UnmatchedBrace(text.to_string()).into());
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
