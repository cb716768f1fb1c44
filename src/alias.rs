//! Command-alias compilation and matching
//!
//! User-authored patterns like `c * *` are compiled into anchored
//! recognizers; matching an input line against the compiled set yields one
//! or more expanded command lines with the captured wildcard values
//! substituted for `$1`, `$2`, ... placeholders in the template.
//!
//! Compilation validates every pattern and reports all problems at once.
//! The compiled matcher is immutable; edits to the alias set require
//! compiling a fresh instance.

use std::collections::BTreeMap;

use regex::Regex;
use thiserror::Error;

/// The wildcard symbol of the pattern mini-language
const WILDCARD: char = '*';

/// Why a pattern was rejected during compilation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatternErrorKind {
    #[error("Pattern cannot be empty")]
    Empty,
    #[error("Pattern must start with at least one character (not a wildcard)")]
    LeadingWildcard,
}

/// A rejected pattern together with its diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{pattern}\": {kind}")]
pub struct PatternError {
    pub pattern: String,
    pub kind: PatternErrorKind,
}

/// Result of matching an input line against the compiled alias set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasMatch {
    /// Expanded command lines, in order; one pattern can expand to several
    pub output: Vec<String>,
    /// Captured wildcard values, left to right
    pub params: Vec<String>,
    /// The source pattern that matched
    pub pattern: String,
}

/// One compiled pattern -> template rule, immutable after construction
#[derive(Debug, Clone)]
struct AliasRule {
    regex: Regex,
    template: String,
    wildcard_count: usize,
    source: String,
}

/// Compiled, ordered set of alias rules
///
/// Rules are tried in specificity order: fewer wildcards first, then
/// longer source pattern first. First full match wins.
#[derive(Debug, Clone, Default)]
pub struct AliasMatcher {
    rules: Vec<AliasRule>,
}

impl AliasMatcher {
    /// Compile a pattern -> template mapping into an ordered matcher.
    ///
    /// Every pattern is validated independently and all errors are
    /// collected; any error fails the whole compilation and no partial
    /// matcher is produced. The ordered map keeps compilation
    /// deterministic: compiling the same set twice yields matchers with
    /// identical rule order.
    pub fn compile(aliases: &BTreeMap<String, String>) -> Result<Self, Vec<PatternError>> {
        let mut errors = Vec::new();

        for pattern in aliases.keys() {
            let trimmed = pattern.trim();
            if trimmed.is_empty() {
                errors.push(PatternError {
                    pattern: pattern.clone(),
                    kind: PatternErrorKind::Empty,
                });
                continue;
            }
            if trimmed.split_whitespace().next() == Some("*") {
                errors.push(PatternError {
                    pattern: pattern.clone(),
                    kind: PatternErrorKind::LeadingWildcard,
                });
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let mut rules = Vec::with_capacity(aliases.len());
        for (pattern, template) in aliases {
            let source = pattern_regex(pattern);
            // Literal fragments are escaped and the only added syntax is
            // `(.+?)` / `\s+` / anchors, so the pattern is valid by
            // construction.
            let regex = Regex::new(&source).expect("escaped alias pattern is a valid regex");
            rules.push(AliasRule {
                regex,
                template: template.trim().to_string(),
                wildcard_count: wildcard_count(pattern),
                source: pattern.clone(),
            });
        }

        // Fewer wildcards first, then longer source pattern first. The
        // raw-length tie-break is a compatibility rule, not semantic
        // specificity; stable sort keeps map order for full ties.
        rules.sort_by(|a, b| {
            a.wildcard_count
                .cmp(&b.wildcard_count)
                .then(b.source.len().cmp(&a.source.len()))
        });

        Ok(AliasMatcher { rules })
    }

    /// Match an input line against the compiled set.
    ///
    /// The input is trimmed and must match a rule in full. Returns `None`
    /// when no rule matches; matching never errors.
    pub fn find_match(&self, input: &str) -> Option<AliasMatch> {
        let trimmed = input.trim();

        for rule in &self.rules {
            let Some(caps) = rule.regex.captures(trimmed) else {
                continue;
            };

            let params: Vec<String> = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect();

            let rendered = substitute_params(&rule.template, &params);
            let normalized = rendered.replace("\r\n", "\n").replace('\r', "\n");
            let output: Vec<String> = normalized
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();

            return Some(AliasMatch {
                output,
                params,
                pattern: rule.source.clone(),
            });
        }

        None
    }

    /// Source patterns in match order
    pub fn patterns(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.source.as_str()).collect()
    }

    /// Number of compiled rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn wildcard_count(pattern: &str) -> usize {
    pattern.matches(WILDCARD).count()
}

/// Build the anchored regex source for one pattern.
///
/// Tokens are separated by one-or-more whitespace in the input. A bare `*`
/// token is a single lazy capture; a token mixing `*` with literals gets a
/// lazy capture per `*` with the literal fragments escaped; a literal
/// token is escaped whole.
fn pattern_regex(pattern: &str) -> String {
    let parts: Vec<String> = pattern.trim().split_whitespace().map(token_regex).collect();
    format!("^{}$", parts.join(r"\s+"))
}

fn token_regex(token: &str) -> String {
    if token == "*" {
        "(.+?)".to_string()
    } else if token.contains(WILDCARD) {
        token
            .split(WILDCARD)
            .map(|literal| regex::escape(literal))
            .collect::<Vec<_>>()
            .join("(.+?)")
    } else {
        regex::escape(token)
    }
}

/// Substitute `$1`..`$N` placeholders with captured values.
///
/// Single left-to-right pass; the longest digit run after `$` names the
/// slot, and a slot past the capture count is left as literal text.
fn substitute_params(template: &str, params: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let digit_len = after
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digit_len == 0 {
            out.push('$');
            rest = after;
            continue;
        }

        let (digits, tail) = after.split_at(digit_len);
        match digits.parse::<usize>() {
            Ok(k) if k >= 1 && k <= params.len() => out.push_str(&params[k - 1]),
            _ => {
                out.push('$');
                out.push_str(digits);
            }
        }
        rest = tail;
    }

    out.push_str(rest);
    out
}
