//! Built-in seed corpus.
//!
//! Indexed when the source folder is empty and the seed corpus is enabled,
//! so a fresh deployment answers something sensible before any documents
//! are dropped in.

use chrono::Utc;
use docvault_core::DocumentId;
use docvault_index::DocumentRecord;
use docvault_ingest::fingerprint;

pub const SEED_DOCUMENT_NAME: &str = "starter-policies";

const SEED_PASSAGES: [&str; 10] = [
    "HR Policy: Employees are entitled to 15 days of paid leave per year.",
    "Leave Policy: Sick leave requires a doctor's note for absences longer than 3 days.",
    "Administrative Guidelines: All expense reports must be submitted by the end of the month.",
    "Employee Handbook: The company dress code is business casual unless otherwise specified.",
    "Remote Work Policy: Remote work is allowed for up to 2 days per week with manager approval.",
    "Benefits: Health insurance coverage begins on the first day of the month following employment start date.",
    "Performance Reviews: Annual performance reviews are conducted in December each year.",
    "Code of Conduct: All employees must adhere to the company's code of conduct and ethical guidelines.",
    "Training: New employees must complete mandatory training within the first 30 days of employment.",
    "Travel Policy: Business travel requires pre-approval from department head and HR.",
];

/// The seed corpus as a single document record.
pub fn seed_records() -> Vec<DocumentRecord> {
    let full_text = SEED_PASSAGES.join("\n\n");
    let now = Utc::now();
    vec![DocumentRecord {
        id: DocumentId::Seed(SEED_DOCUMENT_NAME.to_string()),
        title: "Starter policies".to_string(),
        fingerprint: fingerprint(&full_text),
        page_count: 0,
        byte_size: full_text.len() as u64,
        full_text,
        modified_at: now,
        created_at: now,
    }]
}
