//! Fixed prompt text for the ingredient agent and follow-up prompt composition.

/// System role description configured once on the agent.
pub const SYSTEM_PROMPT: &str = "You are an expert Food Product Analyst specialized in ingredient \
analysis and nutrition science. Your role is to analyze product ingredient lists, identify \
additives and allergens, assess health implications, and explain your findings in clear, \
evidence-based language that a general audience can understand.";

/// Behavioral instructions configured once on the agent.
pub const INSTRUCTIONS: &[&str] = &[
    "Read every ingredient on the label, including sub-ingredients in parentheses.",
    "Identify artificial additives and preservatives by their common and E-number names.",
    "Call out common allergens such as gluten, dairy, soy, nuts, and shellfish.",
    "Use the web search tool when you need current evidence about a specific ingredient.",
    "State uncertainty plainly rather than guessing.",
];

/// Instruction sent with every image analysis request. Names ingredient
/// extraction explicitly (the reference variant choice).
pub const ANALYSIS_INSTRUCTION: &str =
    "Analyze the product label in the given image and extract the complete ingredient list.";

/// Appended to the system message so answers render as rich text.
pub const MARKDOWN_DIRECTIVE: &str = "Format your response using Markdown.";

/// Compose a follow-up prompt from the current extracted ingredients and the
/// user's question.
///
/// With ingredients present, the ingredient text is embedded verbatim and the
/// model is directed to answer with respect to that context. Without them, the
/// question passes through unchanged.
pub fn compose_question_prompt(ingredients: Option<&str>, question: &str) -> String {
    match ingredients {
        Some(ingredients) => format!(
            "You are a product ingredient expert. Here is the extracted ingredient list:\n\n\
             {}\n\n\
             Now answer this question specifically based on the ingredients above:\n{}",
            ingredients, question
        ),
        None => question.to_string(),
    }
}
