//! Mention resolution: finding agent names in free text.
//!
//! An agent named `N` is mentioned wherever one of these spellings appears as
//! a whole word (case-sensitive):
//!
//! - `N` itself
//! - `N` with every `_` replaced by a space (`Story_writer` → `Story writer`)
//! - `N` with every `_` escaped as `\_`, as markdown renderers emit it
//!
//! "Whole word" means the characters immediately before and after the match
//! are not word characters. The text is padded with a space on each side so
//! mentions at either end still have a neighbour.

use std::collections::BTreeMap;

use parley_agent::Agent;
use regex::Regex;

use crate::error::Result;

/// Mention counts keyed by agent name. Agents that were not mentioned are
/// absent rather than present with a zero count.
pub type MentionCounts = BTreeMap<String, usize>;

/// Precompiled mention patterns for a roster.
#[derive(Debug, Clone)]
pub struct MentionMatcher {
    patterns: Vec<(String, Regex)>,
}

impl MentionMatcher {
    /// Compile one pattern per agent.
    ///
    /// Agents with an empty name can never be mentioned and are skipped.
    pub fn new<A: Agent>(agents: &[A]) -> Result<Self> {
        let patterns = agents
            .iter()
            .map(|agent| agent.name())
            .filter(|name| !name.is_empty())
            .map(|name| -> Result<(String, Regex)> {
                Ok((name.to_string(), Regex::new(&mention_pattern(name))?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Count how often each agent is mentioned in `text`.
    ///
    /// Counts are computed per agent independently, so text matching two
    /// agents' patterns counts towards both.
    pub fn count(&self, text: &str) -> MentionCounts {
        let padded = format!(" {} ", text);

        let mut mentions = MentionCounts::new();
        for (name, pattern) in &self.patterns {
            let count = count_whole_word_matches(pattern, &padded);
            if count > 0 {
                mentions.insert(name.clone(), count);
            }
        }
        mentions
    }
}

/// Count how often each agent in `agents` is mentioned in `text`.
///
/// One-shot form of [`MentionMatcher`]; build a matcher instead when scanning
/// several texts against the same roster.
pub fn mentioned_agents<A: Agent>(text: &str, agents: &[A]) -> Result<MentionCounts> {
    Ok(MentionMatcher::new(agents)?.count(text))
}

/// Build the alternation of the accepted spellings of `name`, each escaped.
fn mention_pattern(name: &str) -> String {
    let spellings = [
        name.to_string(),
        name.replace('_', " "),
        name.replace('_', r"\_"),
    ];

    let mut alternatives: Vec<String> = Vec::with_capacity(spellings.len());
    for spelling in &spellings {
        let escaped = regex::escape(spelling);
        if !alternatives.contains(&escaped) {
            alternatives.push(escaped);
        }
    }

    format!("(?:{})", alternatives.join("|"))
}

/// Unicode alphanumeric or underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn count_whole_word_matches(pattern: &Regex, haystack: &str) -> usize {
    let mut count = 0;
    let mut pos = 0;

    while let Some(m) = pattern.find_at(haystack, pos) {
        let before = haystack[..m.start()].chars().next_back();
        let after = haystack[m.end()..].chars().next();
        let bounded = matches!(before, Some(c) if !is_word_char(c))
            && matches!(after, Some(c) if !is_word_char(c));

        if bounded && m.end() > m.start() {
            count += 1;
            pos = m.end();
        } else {
            // A later mention may start inside a rejected candidate.
            pos = m.start()
                + haystack[m.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
        }

        if pos >= haystack.len() {
            break;
        }
    }

    count
}
