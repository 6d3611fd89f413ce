// All prompt templates for generated artifacts.
// Placeholders: {job_description}, {resume_text}, {question}, {answer},
// {plain_text_rules}, {human_tone_rule}. Filled by generation::artifacts.

/// Resume rewrite tailored to the job description.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"You are an expert professional resume writer. Rewrite the following resume to tailor it for the job description provided.

CRITICAL INSTRUCTIONS:
{human_tone_rule}
{plain_text_rules}
3. Target a 90%+ ATS match rate by naturally integrating keywords from the job description.
4. Output ONLY the resume content. No intro, no outro.

Job Description:
{job_description}

Original Resume:
{resume_text}"#;

/// Persuasive cover letter.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are an expert career coach. Write a persuasive cover letter based on the candidate's resume and the job description.

CRITICAL INSTRUCTIONS:
{human_tone_rule}
{plain_text_rules}
3. Avoid generic AI phrases like "I am writing to express my interest". Be creative and direct.
4. Do not include placeholders like [Your Name] when the information is available in the resume.

Job Description:
{job_description}

Resume:
{resume_text}"#;

/// ATS match score, missing keywords and improvement suggestions.
pub const ATS_ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) scanner. Analyze the following resume against the job description.

CRITICAL INSTRUCTIONS:
{plain_text_rules}

Job Description:
{job_description}

Resume:
{resume_text}

Output Format:

Match Score: [Score]/100

Missing Keywords:
- [Keyword 1]
- [Keyword 2]

Improvement Suggestions:
- [Suggestion 1]
- [Suggestion 2]"#;

/// 10 technical / industry-specific interview questions.
pub const TECHNICAL_QUESTIONS_PROMPT_TEMPLATE: &str = r#"You are an expert interviewer specializing in technical and industry-standard evaluations. Based on the candidate's resume and the job description, generate 10 probable industry-specific and technical interview questions.

CRITICAL INSTRUCTIONS:
{plain_text_rules}
3. For EACH question, provide:
   - The Question
   - Why it is being asked
   - An Outline for the Answer (a skeleton of what the candidate should mention)

Job Description:
{job_description}

Resume:
{resume_text}"#;

/// 5-7 recruiter phone-screen questions.
pub const SCREENING_QUESTIONS_PROMPT_TEMPLATE: &str = r#"You are an expert recruiter. Based on the job description and the candidate's resume, generate 5-7 industry-standard screening questions that a recruiter would likely ask during an initial phone screen (for example salary expectations, relocation, core skills).

CRITICAL INSTRUCTIONS:
{plain_text_rules}
3. For EACH question, provide:
   - The Question
   - A brief tip on why they are asking
   - An Outline for the Answer (suggested content based on the resume)

Job Description:
{job_description}

Resume:
{resume_text}"#;

/// 5 final-round behavioral / culture-fit questions.
pub const FINAL_ROUND_QUESTIONS_PROMPT_TEMPLATE: &str = r#"You are a Hiring Manager preparing for a final-round interview. Based on the candidate's resume and the job description, generate 5 high-impact final interview questions. Focus on long-term fit, behavioral scenarios, and executive presence.

CRITICAL INSTRUCTIONS:
{plain_text_rules}
3. For EACH question, provide:
   - The Question
   - The underlying trait being tested
   - An Outline for the Answer (recommended structure for a winning response)

Job Description:
{job_description}

Resume:
{resume_text}"#;

/// Salary, growth pathway and expected outcome.
pub const CAREER_INSIGHTS_PROMPT_TEMPLATE: &str = r#"You are a career consultant. Based on the candidate's resume and the job description, provide the following insights:
1. Salary Negotiation: an estimated range based on industry standing, plus specific negotiation tips for this role.
2. Career Growth: a potential growth pathway for someone in this position.
3. Outcome of the Job: what the candidate can expect to achieve in skill development and career impact.

CRITICAL INSTRUCTIONS:
{plain_text_rules}

Job Description:
{job_description}

Resume:
{resume_text}"#;

/// Coaching feedback on one interview answer.
pub const INTERVIEW_FEEDBACK_PROMPT_TEMPLATE: &str = r#"You are an expert interview coach. Evaluate the following answer to an interview question.

Job Description:
{job_description}

Question:
{question}

Candidate's Answer:
{answer}

Output Format:
Feedback: [Detailed feedback on the strengths and weaknesses of the answer]
Suggestion: [How to improve the answer, using the STAR method if applicable]
Improved Answer: [A sample of how a strong candidate would answer this]

CRITICAL INSTRUCTIONS:
{plain_text_rules}"#;
