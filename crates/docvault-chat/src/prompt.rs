//! Prompt assembly for grounded answers.

use crate::types::Passage;

/// How many of the top-ranked passages are quoted into the prompt.
pub const PROMPT_PASSAGE_LIMIT: usize = 3;

/// Build the grounded prompt from the query, retrieved passages, and the
/// document version summary.
pub fn build_prompt(query: &str, passages: &[Passage], version_context: &str) -> String {
    let context_str = passages
        .iter()
        .take(PROMPT_PASSAGE_LIMIT)
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a document assistant. Answer the user's question based ONLY on the \
provided document context. The system has automatically selected the most recent \
versions of relevant documents for you.\n\n\
Document Versions Used:\n{version_context}\n\n\
Document Context (from latest versions):\n{context_str}\n\n\
User Question: {query}\n\n\
Important:\n\
- Base your answer ONLY on the provided context from the latest document versions\n\
- If multiple policies exist, prioritize information from the most recent documents\n\
- If the information is not in the context, politely say you don't have that specific information\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceRef;
    use chrono::Utc;
    use docvault_core::DocumentId;

    fn passage(text: &str) -> Passage {
        Passage::new(
            text,
            SourceRef {
                document: DocumentId::File("policy.pdf".into()),
                modified_at: Utc::now(),
                is_most_recent: true,
            },
        )
    }

    #[test]
    fn test_prompt_contains_query_context_and_versions() {
        let prompt = build_prompt(
            "how many leave days",
            &[passage("Leave is 15 days per year.")],
            "- policy.pdf (most recent)",
        );
        assert!(prompt.contains("how many leave days"));
        assert!(prompt.contains("Leave is 15 days per year."));
        assert!(prompt.contains("- policy.pdf (most recent)"));
    }

    #[test]
    fn test_prompt_quotes_at_most_three_passages() {
        let passages: Vec<Passage> = (0..5)
            .map(|i| passage(&format!("passage number {}", i)))
            .collect();
        let prompt = build_prompt("q", &passages, "none");
        assert!(prompt.contains("passage number 0"));
        assert!(prompt.contains("passage number 2"));
        assert!(!prompt.contains("passage number 3"));
        assert!(!prompt.contains("passage number 4"));
    }
}
