// Resume prompt templates.
// All prompts for the analysis module are defined here.

pub const ANALYSIS_PROMPT: &str = "\
Please analyze this resume and provide comprehensive feedback. Include:

1. **Overall Assessment**: Rate the resume from 1-10 and provide a brief summary
2. **Strengths**: Identify 3-5 key strengths
3. **Areas for Improvement**: Suggest 3-5 specific improvements
4. **Content Analysis**:
   - Contact information completeness
   - Professional summary quality
   - Work experience descriptions
   - Education and certifications
   - Skills presentation
5. **Formatting Feedback**: Comment on layout, readability, and professional appearance
6. **Action Items**: Provide 3 specific, actionable steps to improve the resume
7. **ATS Optimization**: Suggest keywords and formatting for Applicant Tracking Systems

Please be constructive and specific in your feedback. Format the response in a clear, structured manner.";

pub const IMPROVEMENT_PROMPT: &str = "\
You are an expert resume writer. Rewrite the attached resume so that it addresses \
every point in the feedback below.

FEEDBACK:
{feedback}

RULES:
- Keep every fact from the original resume: employers, titles, dates, degrees, contact details.
- Do NOT invent experience, metrics, or credentials that are not in the original.
- Strengthen bullet points with action verbs and quantify impact where the original supports it.
- Keep the structure ATS-friendly: plain section headings, no tables, no columns.

Return ONLY the full text of the improved resume, ready to copy. \
Do not add commentary before or after it.";

/// Fills the improvement template with the caller's feedback.
pub fn improvement_prompt(feedback: &str) -> String {
    IMPROVEMENT_PROMPT.replace("{feedback}", feedback)
}
