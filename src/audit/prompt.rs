//! Prompt construction for compliance analysis requests
//!
//! Two prompt shapes: the primary analysis request, and a structurally
//! different escalation request used when the model refuses to analyze the
//! supplied transcript.

/// Number of leading transcript characters quoted back to the model
const PREVIEW_CHARS: usize = 200;

/// Fixed 4-section report template the model must fill in by section name.
/// The section headings are load-bearing: the report parser keys on them.
pub const REPORT_TEMPLATE: &str = r#"Generate a detailed compliance report with the following 4 sections exactly as named. For any rule that is not a PASS, you MUST quote the specific words from the transcript that caused the issue.

### SECTION 1: VIDEO CONTENT SUMMARY
- **Topic:** [Based *only* on the provided transcript, identify the primary subject matter.]
- **Key Entities:** [Thoroughly analyze the transcript and list ALL specific entities mentioned: brand names, companies, products, sports teams, player names, places, venues, websites, apps. Only state "None" if the transcript contains no identifiable entities at all.]
- **Sentiment:** [Describe the sentiment (e.g., Instructional, Persuasive, Descriptive, Commentary).]

### SECTION 2: VERDICT & RISK SCORE
- **Overall Verdict:** [Your verdict: "Recommended", "Caution Advised", or "Not Recommended".]
- **Compliance Risk Score:** [Your score from 1 (High Risk) to 10 (Low Risk). If high-risk topics like 'gambling' are found, this score cannot be higher than 6.]

### SECTION 3: RULE-BY-RULE ANALYSIS
[For every rule, provide a Status (✅ PASS / ⚠️ CAUTION / ❌ FAIL) and evidence-based Reasoning. Quote the transcript for any non-PASS status.]

### SECTION 4: STRATEGIC ADVISORY
[Provide Pre-Publication Actions, Content Risk Assessment (including manual checks for visual/audio rules), and Post-Publication Strategy.]"#;

/// Verification excerpt: the first 200 characters of the transcript with
/// newlines flattened, used to anchor the model on the real content.
pub fn transcript_preview(transcript: &str) -> String {
    let mut preview: String = transcript.chars().take(PREVIEW_CHARS).collect();
    preview = preview.replace('\n', " ");
    preview.push_str("...");
    preview
}

/// System instruction for the primary analysis request
pub fn primary_system_instruction(platform: &str) -> String {
    format!(
        "You are analyzing a real transcript for {} compliance. \
         You must analyze the provided content and not claim it is missing.",
        platform
    )
}

/// The primary analysis request body
pub fn build_primary_prompt(transcript: &str, rules: &str, platform: &str) -> String {
    format!(
        "You are Aegis AI, an expert compliance officer. I am providing you with a real video \
transcript that contains actual spoken words.\n\n\
TRANSCRIPT VERIFICATION: The transcript begins with: \"{preview}\"\n\n\
You MUST analyze the full transcript provided below based on the rules for {platform}. Your \
response must be grounded in the evidence from this specific transcript.\n\n\
FULL TRANSCRIPT TO ANALYZE:\n\
---\n\
{transcript}\n\
---\n\n\
PLATFORM RULES:\n\
---\n\
{rules}\n\
---\n\n\
INSTRUCTIONS:\n\
{template}",
        preview = transcript_preview(transcript),
        platform = platform,
        transcript = transcript,
        rules = rules,
        template = REPORT_TEMPLATE,
    )
}

/// System instruction for the escalation request
pub const ESCALATION_SYSTEM_INSTRUCTION: &str =
    "You must analyze the transcript supplied in the user message. It is real spoken content; \
     do not claim it is missing or unavailable.";

/// The escalation request body.
///
/// Deliberately topic-neutral: it re-asserts that the transcript is real and
/// re-supplies it in full, without telling the model what the content is
/// about.
pub fn build_escalation_prompt(transcript: &str, rules: &str, platform: &str) -> String {
    format!(
        "Your previous response was erroneous: it claimed the transcript could not be analyzed. \
The transcript below is real spoken content. Analyze it directly; do not state that \
information is missing.\n\n\
TRANSCRIPT:\n\
---\n\
{transcript}\n\
---\n\n\
RULES:\n\
---\n\
{rules}\n\
---\n\n\
Now generate the 4-section compliance report for {platform}, grounded in the transcript \
above.\n\n\
{template}",
        transcript = transcript,
        rules = rules,
        platform = platform,
        template = REPORT_TEMPLATE,
    )
}
