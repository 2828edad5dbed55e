//! Keyword-based query topic classification.
//!
//! Cheap heuristic used for logging and analytics on incoming questions;
//! retrieval itself never depends on the classified topic.

use once_cell::sync::Lazy;

/// Topic keyword table, checked in order; first match wins.
static TOPIC_KEYWORDS: Lazy<Vec<(&'static str, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        ("leave", vec!["leave", "vacation", "holiday", "sick", "time off"]),
        ("remote work", vec!["remote", "work from home", "wfh"]),
        ("benefits", vec!["benefit", "insurance", "health", "retirement"]),
        ("compensation", vec!["salary", "pay", "compensation"]),
        ("onboarding", vec!["onboard", "training", "new employee"]),
        ("dress code", vec!["dress", "attire", "clothing"]),
        ("policy", vec!["policy", "rule", "guideline", "procedure"]),
    ]
});

/// Classify a query into a coarse policy topic.
pub fn classify_topic(query: &str) -> &'static str {
    let query_lower = query.to_lowercase();
    for (topic, keywords) in TOPIC_KEYWORDS.iter() {
        if keywords.iter().any(|kw| query_lower.contains(kw)) {
            return topic;
        }
    }
    "general"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_topics() {
        assert_eq!(classify_topic("How many vacation days do I get?"), "leave");
        assert_eq!(classify_topic("Can I work from home on Fridays?"), "remote work");
        assert_eq!(classify_topic("When does health insurance start?"), "benefits");
        assert_eq!(classify_topic("What is the dress code?"), "dress code");
    }

    #[test]
    fn test_first_match_wins() {
        // Mentions both leave and policy; leave is checked first.
        assert_eq!(classify_topic("what is the leave policy"), "leave");
    }

    #[test]
    fn test_unmatched_is_general() {
        assert_eq!(classify_topic("tell me about the cafeteria menu"), "general");
    }
}
