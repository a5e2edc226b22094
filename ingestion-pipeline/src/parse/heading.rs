/// Section header strings seen across the clinical source material. Kept as
/// one testable constant so the heading heuristic can be tuned in isolation.
pub const KNOWN_SECTION_HEADERS: [&str; 27] = [
    "Purpose",
    "Overview",
    "Instructions",
    "Instructions for Clinicians",
    "Instructions for Clients",
    "Clinical Notes",
    "Clinician Notes",
    "Therapist Notes",
    "Risk, Limitations & Legal Considerations",
    "Risk, Limitations and Legal Considerations",
    "Risk, Limitations & Legal",
    "Scope & Use Statement",
    "Scope and Use Statement",
    "Signature Blocks",
    "Versioning & Update Notes",
    "Versioning and Update Notes",
    "Interpretation Guidelines",
    "Clinical Action & Decision Notes",
    "Clinical Action and Decision Notes",
    "Contraindications/Risks/Escalation",
    "Contraindications and Risks",
    "Privacy Notes",
    "Scoring",
    "Administration",
    "Clinical Action",
    "Contraindications",
    "Cautions",
];

/// Decides whether a line of extracted text reads as a section heading.
///
/// A line qualifies when its trimmed length is within `[4, 120]`, it has at
/// most 10 words, and it is either fully uppercase, colon-terminated, or an
/// exact case-insensitive match against [`KNOWN_SECTION_HEADERS`]. The
/// length and word bounds keep long sentences written in caps for emphasis
/// from being mistaken for headings.
pub fn is_heading_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    let length = trimmed.chars().count();
    if !(4..=120).contains(&length) {
        return false;
    }
    if trimmed.split_whitespace().count() > 10 {
        return false;
    }

    let is_all_caps = trimmed.to_uppercase() == trimmed
        && trimmed.chars().any(|c| c.is_ascii_uppercase());
    let ends_with_colon = trimmed.ends_with(':');
    let is_known = KNOWN_SECTION_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(trimmed));

    is_all_caps || ends_with_colon || is_known
}
