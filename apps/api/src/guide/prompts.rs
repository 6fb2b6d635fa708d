// Prompt template for guide generation.

/// Guide prompt template.
/// Replace: {topic}, {objectives}, {tone}, {format}
pub const GUIDE_PROMPT_TEMPLATE: &str = r#"You are RecoveryPen AI, a trauma-informed assistant. Create a comprehensive, group-ready recovery guide on:

Topic: {topic}

Objectives:
{objectives}

Tone: {tone}
Format: {format}

The guide should include:
- Clear headings and sections
- Practical strategies
- Realistic examples
- Bullet points and group discussion prompts
- Closing summary

Begin now.
"#;

pub const DEFAULT_TONE: &str = "Empowering";
pub const DEFAULT_FORMAT: &str = "group";
