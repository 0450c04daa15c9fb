//! Grammar rule engine
//!
//! Matches grammar construction rules against the morphological token sequence.
//! Conditions look at part of speech, conjugation form, lemma and surface, never at raw
//! character strings: 「行か」(未然形) and 「行き」(連用形) share a lemma but play different
//! grammatical roles, and only the analyzed attributes tell them apart.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::GrammarError;
use crate::models::{Condition, GrammarMatch, GrammarRule, Token};

/// Ordered, immutable grammar rule set
///
/// Rule order is significant: matches are reported start-position-major, rule-order-minor.
/// The engine is never mutated after construction and can be shared across threads.
#[derive(Debug, Clone)]
pub struct GrammarRuleEngine {
  rules: Vec<GrammarRule>,
}

impl GrammarRuleEngine {
  /// Builds an engine from already parsed rules
  ///
  /// # Errors
  /// `GrammarError::InvalidRule` when a rule has an empty pattern
  pub fn new(rules: Vec<GrammarRule>) -> Result<Self, GrammarError> {
    if let Some(rule) = rules.iter().find(|r| r.pattern.is_empty()) {
      return Err(GrammarError::InvalidRule {
        id: rule.id.clone(),
        reason: "pattern が空です".to_string(),
      });
    }

    Ok(Self { rules })
  }

  /// Loads the rule file (a JSON array of rules)
  ///
  /// # Errors
  /// - `GrammarError::NotFound` when the file does not exist
  /// - `GrammarError::Parse` / `GrammarError::InvalidRule` when the content is invalid
  /// - `GrammarError::Io` for other read failures
  pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GrammarError> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
      io::ErrorKind::NotFound => GrammarError::NotFound {
        path: path.to_path_buf(),
      },
      _ => GrammarError::Io {
        path: path.to_path_buf(),
        source: Arc::new(e),
      },
    })?;

    let rules: Vec<GrammarRule> =
      serde_json::from_str(&content).map_err(|e| GrammarError::Parse {
        path: Some(path.to_path_buf()),
        source: Arc::new(e),
      })?;

    let engine = Self::new(rules)?;
    info!(path = %path.display(), rule_count = engine.len(), "Grammar rules loaded");

    Ok(engine)
  }

  /// Parses rules from a JSON string
  ///
  /// # Errors
  /// `GrammarError::Parse` / `GrammarError::InvalidRule`
  pub fn from_json_str(json: &str) -> Result<Self, GrammarError> {
    let rules: Vec<GrammarRule> = serde_json::from_str(json).map_err(|e| GrammarError::Parse {
      path: None,
      source: Arc::new(e),
    })?;

    Self::new(rules)
  }

  /// Rules in load order
  pub fn rules(&self) -> &[GrammarRule] {
    &self.rules
  }

  /// Number of rules
  pub fn len(&self) -> usize {
    self.rules.len()
  }

  /// Whether the rule set is empty
  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// Finds every rule occurrence in the token sequence
  ///
  /// For each start position, every rule is tried anchored exactly at that position.
  /// All successful matches are returned: overlapping and nested matches, and several rules
  /// matching the same run, are all reported with no priority or deduplication.
  ///
  /// Worst case O(tokens × rules × pattern length).
  pub fn match_tokens(&self, tokens: &[Token]) -> Vec<GrammarMatch> {
    let mut matches = Vec::new();

    for start in 0..tokens.len() {
      for rule in &self.rules {
        if let Some(matched_indices) = match_at(tokens, start, &rule.pattern) {
          matches.push(GrammarMatch {
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            level: rule.level.clone(),
            meaning: rule.meaning.clone(),
            structure: matched_indices.iter().map(|&i| tokens[i].surface.clone()).collect(),
            matched_indices,
          });
        }
      }
    }

    if !matches.is_empty() {
      debug!(match_count = matches.len(), "Grammar patterns matched");
    }

    matches
  }
}

/// Walks the pattern from `start`; the first mismatch or running out of tokens aborts
fn match_at(tokens: &[Token], start: usize, pattern: &[Condition]) -> Option<Vec<usize>> {
  let window = tokens.get(start..start + pattern.len())?;

  pattern
    .iter()
    .zip(window)
    .all(|(condition, token)| condition.matches(token))
    .then(|| (start..start + pattern.len()).collect())
}
