use std::time::{Duration, Instant};

/// Known position names offered by the autocomplete, in display order.
pub const POSITION_OPTIONS: [&str; 16] = [
    "Corporate Training",
    "Executive",
    "Intern",
    "Content Writer",
    "Graphic Designer",
    "Video Editor",
    "Manager",
    "Admin and HR",
    "Human Resource",
    "Corporate Relations Manager",
    "Corporate Relations Executive",
    "Sales Manager",
    "Sales Executive",
    "Business Development Engineer",
    "Software Engineer Intern",
    "Software Engineer",
];

/// How long the dropdown stays open after the field loses focus, so a click on
/// a suggestion can still land.
pub const BLUR_GRACE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy)]
pub struct PositionMatcher {
    vocabulary: &'static [&'static str],
}

impl Default for PositionMatcher {
    fn default() -> Self {
        Self::new(&POSITION_OPTIONS)
    }
}

impl PositionMatcher {
    pub fn new(vocabulary: &'static [&'static str]) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &'static [&'static str] {
        self.vocabulary
    }

    /// Case-insensitive substring matches in vocabulary order. A blank query
    /// matches everything; otherwise surrounding spaces are part of the match.
    pub fn suggest(&self, query: &str) -> Vec<&'static str> {
        if query.trim().is_empty() {
            return self.vocabulary.to_vec();
        }
        let needle = query.to_lowercase();
        self.vocabulary
            .iter()
            .copied()
            .filter(|option| option.to_lowercase().contains(&needle))
            .collect()
    }
}

/// State of the position input and its suggestion dropdown.
#[derive(Debug, Clone)]
pub struct PositionField {
    matcher: PositionMatcher,
    value: String,
    suggestions: Vec<&'static str>,
    open: bool,
    closes_at: Option<Instant>,
}

impl PositionField {
    pub fn new(matcher: PositionMatcher, value: impl Into<String>) -> Self {
        Self {
            matcher,
            value: value.into(),
            suggestions: Vec::new(),
            open: false,
            closes_at: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn suggestions(&self) -> &[&'static str] {
        &self.suggestions
    }

    pub fn is_open(&self, now: Instant) -> bool {
        self.open && self.closes_at.map_or(true, |deadline| now < deadline)
    }

    pub fn focus(&mut self) {
        self.closes_at = None;
        if self.value.trim().is_empty() {
            self.suggestions = self.matcher.vocabulary().to_vec();
            self.open = true;
        } else {
            self.refresh_suggestions();
        }
    }

    /// Updates the text. A close already scheduled by `blur` still happens.
    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
        if self.value.trim().is_empty() {
            self.suggestions.clear();
            self.open = false;
        } else {
            self.refresh_suggestions();
        }
    }

    /// Takes a suggestion. Returns false when the dropdown had already closed
    /// or the option is not on offer, leaving the field untouched.
    pub fn select(&mut self, option: &str, now: Instant) -> bool {
        if !self.is_open(now) {
            return false;
        }
        let Some(chosen) = self.suggestions.iter().copied().find(|s| *s == option) else {
            return false;
        };
        self.value = chosen.to_string();
        self.close();
        true
    }

    pub fn blur(&mut self, now: Instant) {
        if self.open {
            self.closes_at = Some(now + BLUR_GRACE);
        }
    }

    fn refresh_suggestions(&mut self) {
        self.suggestions = self.matcher.suggest(&self.value);
        self.open = !self.suggestions.is_empty();
    }

    fn close(&mut self) {
        self.open = false;
        self.closes_at = None;
        self.suggestions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eng_matches_in_vocabulary_order() {
        let matches = PositionMatcher::default().suggest("Eng");
        assert_eq!(
            matches,
            vec![
                "Business Development Engineer",
                "Software Engineer Intern",
                "Software Engineer",
            ]
        );
    }

    #[test]
    fn matching_ignores_case() {
        let matcher = PositionMatcher::default();
        assert_eq!(matcher.suggest("sales"), vec!["Sales Manager", "Sales Executive"]);
        assert_eq!(matcher.suggest("HR"), vec!["Admin and HR"]);
        assert!(matcher.suggest("astronaut").is_empty());
    }

    #[test]
    fn focus_on_blank_field_opens_full_list() {
        let mut field = PositionField::new(PositionMatcher::default(), "");
        field.focus();
        assert!(field.is_open(Instant::now()));
        assert_eq!(field.suggestions().len(), POSITION_OPTIONS.len());
    }

    #[test]
    fn typing_filters_and_closes_when_nothing_matches() {
        let now = Instant::now();
        let mut field = PositionField::new(PositionMatcher::default(), "");
        field.input("exec");
        assert!(field.is_open(now));
        assert_eq!(
            field.suggestions(),
            ["Executive", "Corporate Relations Executive", "Sales Executive"]
        );

        field.input("zzz");
        assert!(!field.is_open(now));
        assert!(field.suggestions().is_empty());

        field.input("   ");
        assert!(!field.is_open(now));
    }

    #[test]
    fn selecting_sets_exact_text_and_closes() {
        let now = Instant::now();
        let mut field = PositionField::new(PositionMatcher::default(), "");
        field.input("video");
        assert!(field.select("Video Editor", now));
        assert_eq!(field.value(), "Video Editor");
        assert!(!field.is_open(now));
        assert!(field.suggestions().is_empty());
    }

    #[test]
    fn selection_within_blur_grace_still_registers() {
        let start = Instant::now();
        let mut field = PositionField::new(PositionMatcher::default(), "");
        field.focus();
        field.blur(start);

        let click = start + Duration::from_millis(100);
        assert!(field.is_open(click));
        assert!(field.select("Intern", click));
        assert_eq!(field.value(), "Intern");
    }

    #[test]
    fn selection_after_blur_grace_is_ignored() {
        let start = Instant::now();
        let mut field = PositionField::new(PositionMatcher::default(), "Man");
        field.focus();
        field.blur(start);

        let late = start + BLUR_GRACE;
        assert!(!field.is_open(late));
        assert!(!field.select("Manager", late));
        assert_eq!(field.value(), "Man");
    }

    #[test]
    fn surrounding_spaces_take_part_in_matching() {
        let matcher = PositionMatcher::default();
        assert!(matcher.suggest("Manager ").is_empty());
        assert!(matcher.suggest("Intern ").is_empty());
        assert_eq!(matcher.suggest(" Manager"), vec!["Corporate Relations Manager", "Sales Manager"]);

        let mut field = PositionField::new(matcher, "");
        field.input("Manager ");
        assert!(!field.is_open(Instant::now()));
        assert!(field.suggestions().is_empty());
    }

    #[test]
    fn typing_after_blur_keeps_the_pending_close() {
        let start = Instant::now();
        let mut field = PositionField::new(PositionMatcher::default(), "");
        field.focus();
        field.blur(start);

        let typed = start + Duration::from_millis(50);
        field.input("sales");
        assert!(field.is_open(typed));
        assert!(!field.is_open(start + BLUR_GRACE));
        assert!(!field.select("Sales Manager", start + BLUR_GRACE));
        assert_eq!(field.value(), "sales");
    }
}
