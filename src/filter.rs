//! Regex include/exclude filtering over buffered lines
//!
//! Each mode owns a list of regex fragments; the non-blank fragments are
//! joined into a single alternation. A malformed alternation disables
//! filtering for that mode instead of surfacing an error: a broken filter
//! must never block the user from seeing scrollback.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::line::Line;

/// Which filter applies to the scrollback view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    Off,
    /// Keep only lines matching the include alternation
    Include,
    /// Drop lines matching the exclude alternation
    Exclude,
}

/// Compiled filter producing a derived view over buffered lines
#[derive(Debug, Clone)]
pub struct LineFilter {
    mode: FilterMode,
    include: Option<Regex>,
    exclude: Option<Regex>,
}

impl LineFilter {
    /// Build a filter from per-mode fragment lists.
    ///
    /// Fragments that are blank after trimming are skipped; a fragment
    /// list that compiles to nothing (or fails to compile) leaves that
    /// mode unfiltered.
    pub fn new(mode: FilterMode, include_fragments: &[String], exclude_fragments: &[String]) -> Self {
        LineFilter {
            mode,
            include: build_alternation(include_fragments),
            exclude: build_alternation(exclude_fragments),
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Whether `line` survives the filter.
    ///
    /// The match runs against the trimmed concatenated text so `^` and `$`
    /// anchors in fragments behave predictably.
    pub fn keeps(&self, line: &Line) -> bool {
        match self.mode {
            FilterMode::Off => true,
            FilterMode::Include => {
                let text = line.text();
                self.include
                    .as_ref()
                    .map_or(true, |re| re.is_match(text.trim()))
            }
            FilterMode::Exclude => {
                let text = line.text();
                self.exclude
                    .as_ref()
                    .map_or(true, |re| !re.is_match(text.trim()))
            }
        }
    }

    /// Derived, read-only view of the lines that survive the filter
    pub fn filter<'a, I>(&self, lines: I) -> Vec<&'a Line>
    where
        I: IntoIterator<Item = &'a Line>,
    {
        lines.into_iter().filter(|line| self.keeps(line)).collect()
    }
}

/// Join non-blank fragments into one alternation regex.
///
/// Returns `None` when nothing is left to match or the joined pattern is
/// invalid; the invalid case is logged and treated as "no active filter".
fn build_alternation(fragments: &[String]) -> Option<Regex> {
    let pattern = fragments
        .iter()
        .filter(|fragment| !fragment.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("|");

    if pattern.is_empty() {
        return None;
    }

    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::warn!("Ignoring invalid line filter {:?}: {}", pattern, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<Line> {
        texts.iter().map(|t| Line::from_text(*t)).collect()
    }

    fn texts<'a>(filtered: &[&'a Line]) -> Vec<String> {
        filtered.iter().map(|l| l.text()).collect()
    }

    #[test]
    fn test_off_passes_everything() {
        let all = lines(&["one", "two", "three"]);
        let filter = LineFilter::new(FilterMode::Off, &["one".into()], &["two".into()]);
        assert_eq!(filter.filter(&all).len(), 3);
    }

    #[test]
    fn test_include_keeps_matching_lines() {
        let all = lines(&["You attack the orc", "The orc dies", "You rest"]);
        let filter = LineFilter::new(FilterMode::Include, &["orc".into()], &[]);
        assert_eq!(
            texts(&filter.filter(&all)),
            vec!["You attack the orc", "The orc dies"]
        );
    }

    #[test]
    fn test_exclude_drops_matching_lines() {
        let all = lines(&["Gamedriver: tick", "You rest", "Gamedriver: reboot soon"]);
        let filter = LineFilter::new(FilterMode::Exclude, &[], &["^Gamedriver:".into()]);
        assert_eq!(texts(&filter.filter(&all)), vec!["You rest"]);
    }

    #[test]
    fn test_fragments_joined_as_alternation() {
        let all = lines(&["north exit", "south exit", "a shiny coin"]);
        let filter = LineFilter::new(
            FilterMode::Include,
            &["north".into(), "coin".into()],
            &[],
        );
        assert_eq!(
            texts(&filter.filter(&all)),
            vec!["north exit", "a shiny coin"]
        );
    }

    #[test]
    fn test_blank_fragments_skipped() {
        let all = lines(&["keep me", "drop me"]);
        // Trailing blank slots come straight from the editor UI
        let filter = LineFilter::new(
            FilterMode::Include,
            &["keep".into(), "".into(), "   ".into()],
            &[],
        );
        assert_eq!(texts(&filter.filter(&all)), vec!["keep me"]);
    }

    #[test]
    fn test_no_fragments_means_no_filter() {
        let all = lines(&["one", "two"]);
        let include = LineFilter::new(FilterMode::Include, &[], &[]);
        assert_eq!(include.filter(&all).len(), 2);

        let exclude = LineFilter::new(FilterMode::Exclude, &[], &["".into()]);
        assert_eq!(exclude.filter(&all).len(), 2);
    }

    #[test]
    fn test_invalid_regex_degrades_to_no_filter() {
        let all = lines(&["alpha", "beta"]);

        let include = LineFilter::new(FilterMode::Include, &["[unclosed".into()], &[]);
        assert_eq!(include.filter(&all).len(), 2);

        let exclude = LineFilter::new(FilterMode::Exclude, &[], &["(bad".into()]);
        assert_eq!(exclude.filter(&all).len(), 2);
    }

    #[test]
    fn test_match_runs_on_trimmed_text() {
        let all = lines(&["  anchored  "]);
        let filter = LineFilter::new(FilterMode::Include, &["^anchored$".into()], &[]);
        assert_eq!(filter.filter(&all).len(), 1);
    }

    #[test]
    fn test_keeps_inspects_concatenated_chunks() {
        use crate::color::{Color, NamedColor};
        use crate::line::Chunk;

        let line = Line::from_chunks(vec![
            Chunk::plain("Game"),
            Chunk::colored("driver: tick", Color::Named(NamedColor::Red)),
        ]);
        let filter = LineFilter::new(FilterMode::Exclude, &[], &["^Gamedriver:".into()]);
        assert!(!filter.keeps(&line));
    }
}
