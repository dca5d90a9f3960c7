//! LLM prompt engineering for blog drafting

/// Most focus keywords passed to the model
const MAX_FOCUS_KEYWORDS: usize = 10;

const DEFAULT_TONE: &str = "professional and approachable";
const DEFAULT_AUDIENCE: &str = "homeowners, property managers and small business owners";

/// Builds prompts for the LLM to draft a blog post
pub struct PromptBuilder {
    topic: String,
    target_words: usize,
    tone: Option<String>,
    audience: Option<String>,
    focus_keywords: Vec<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(topic: String, target_words: usize) -> Self {
        Self {
            topic,
            target_words,
            tone: None,
            audience: None,
            focus_keywords: Vec::new(),
        }
    }

    /// Set the writing tone
    pub fn with_tone(mut self, tone: Option<String>) -> Self {
        self.tone = tone;
        self
    }

    /// Set the intended audience
    pub fn with_audience(mut self, audience: Option<String>) -> Self {
        self.audience = audience;
        self
    }

    /// Add keywords the post should work in
    pub fn with_focus_keywords(mut self, keywords: Vec<String>) -> Self {
        self.focus_keywords = keywords;
        self
    }

    /// System instruction establishing the writer persona and reply contract
    pub fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    /// Build the user prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("Write a blog post for a construction company website.\n\n");

        prompt.push_str(&format!("Topic: {}\n", self.topic.trim()));
        prompt.push_str(&format!(
            "Tone: {}\n",
            self.tone.as_deref().unwrap_or(DEFAULT_TONE)
        ));
        prompt.push_str(&format!(
            "Audience: {}\n",
            self.audience.as_deref().unwrap_or(DEFAULT_AUDIENCE)
        ));
        prompt.push_str(&format!("Target length: about {} words\n", self.target_words));

        let keywords: Vec<&str> = self
            .focus_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .take(MAX_FOCUS_KEYWORDS)
            .collect();
        if !keywords.is_empty() {
            prompt.push_str(&format!(
                "Work these keywords in naturally: {}\n",
                keywords.join(", ")
            ));
        }
        prompt.push('\n');

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const SYSTEM_PROMPT: &str = r#"You are an experienced content writer for construction and trades businesses.
You write practical, accurate blog posts that help readers plan, budget and maintain building projects.

Rules:
- Write the post body in Markdown, starting with a single H1 heading
- Use H2 sections, short paragraphs and bullet lists where they help
- Stay factual; do not invent statistics, prices or regulations
- Close with a short call to action inviting readers to request a quote
- Reply with one JSON object only, with no commentary before or after it"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON object only, no additional text):
{
  "title": "post title, under 60 characters",
  "content": "full post in Markdown",
  "excerpt": "one or two sentences, under 160 characters",
  "seo_description": "meta description, under 160 characters",
  "keywords": ["5 to 8 lower-case keywords"],
  "estimated_read_time": 5
}

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;
