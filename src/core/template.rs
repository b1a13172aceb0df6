/// Status template model: the recursive grammar behind every caption.
///
/// A template is either a leaf (a text fragment, possibly holding
/// `{name}` placeholder tokens) or a branch wrapping an ordered list of
/// child templates. The same tree shape is read two ways: a branch at
/// the top of a chosen template is a sequence of independently varying
/// slots, while a branch anywhere below is a choice among alternatives.
/// The weight calculator mirrors that split.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("branch template has no children")]
    EmptyBranch,
    #[error("unclosed placeholder token in leaf {0:?}")]
    UnclosedToken(String),
    #[error("empty placeholder token in leaf {0:?}")]
    EmptyToken(String),
    #[error("unmatched closing brace in leaf {0:?}")]
    UnmatchedBrace(String),
    #[error("nested brace inside placeholder token in leaf {0:?}")]
    NestedBrace(String),
}

/// A status template: a leaf fragment or a branch of child templates.
///
/// Serialized untagged, so a catalog file writes a leaf as a plain
/// string and a branch as a list, nesting freely:
///
/// ```ron
/// ["The ", ["{machine}", "classic"], " machine landed on ", "{random_payline}", "."]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Template {
    Leaf(String),
    Branch(Vec<Template>),
}

impl Template {
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    pub fn branch(children: Vec<Template>) -> Self {
        Self::Branch(children)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Selection weight of this template.
    ///
    /// A leaf weighs 1. A branch weighs the product of its children's
    /// weights when `root` is true (a sequence of independent slots
    /// expands once per combination) and their sum otherwise (picking
    /// one alternative, each counted by its own expansion count).
    /// Children are always weighed non-root; only the immediate call
    /// may apply root semantics.
    pub fn weight(&self, root: bool) -> u64 {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(children) => {
                let weights = children.iter().map(|child| child.weight(false));
                if root {
                    weights.product()
                } else {
                    weights.sum()
                }
            }
        }
    }

    /// Validate the whole tree: no empty branches, and every leaf's
    /// placeholder tokens well formed. Catalogs are checked once at
    /// construction so generation never trips over a malformed token.
    pub fn validate(&self) -> Result<(), TemplateError> {
        match self {
            Self::Leaf(text) => scan_tokens(text).map(|_| ()),
            Self::Branch(children) => {
                if children.is_empty() {
                    return Err(TemplateError::EmptyBranch);
                }
                for child in children {
                    child.validate()?;
                }
                Ok(())
            }
        }
    }

    /// Collect every placeholder name referenced by any leaf of the tree.
    pub fn placeholders(&self) -> Result<BTreeSet<String>, TemplateError> {
        let mut names = BTreeSet::new();
        self.collect_placeholders(&mut names)?;
        Ok(names)
    }

    fn collect_placeholders(&self, names: &mut BTreeSet<String>) -> Result<(), TemplateError> {
        match self {
            Self::Leaf(text) => {
                names.extend(scan_tokens(text)?);
                Ok(())
            }
            Self::Branch(children) => {
                for child in children {
                    child.collect_placeholders(names)?;
                }
                Ok(())
            }
        }
    }
}

/// Weights for a list of sibling templates, in order.
pub fn template_weights(templates: &[Template], root: bool) -> Vec<u64> {
    templates.iter().map(|t| t.weight(root)).collect()
}

/// Scan a leaf's text for placeholder tokens, returning their names.
///
/// Syntax: `{name}` is a token, `{{` and `}}` are literal braces.
/// Unclosed, empty, nested, or unmatched braces are errors.
fn scan_tokens(text: &str) -> Result<Vec<String>, TemplateError> {
    let mut names = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => {
                            return Err(TemplateError::NestedBrace(text.to_string()));
                        }
                        Some(inner) => name.push(inner),
                        None => {
                            return Err(TemplateError::UnclosedToken(text.to_string()));
                        }
                    }
                }
                if name.is_empty() {
                    return Err(TemplateError::EmptyToken(text.to_string()));
                }
                names.push(name);
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                } else {
                    return Err(TemplateError::UnmatchedBrace(text.to_string()));
                }
            }
            _ => {}
        }
    }

    Ok(names)
}
