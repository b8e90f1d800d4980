use crate::domain::AppError;
use crate::domain::prompt::{adventure_blurb_prompt, guide_system_instruction};
use crate::ports::AiGatewayFactory;

/// Answer a traveller's question in the voice of the company's guide.
pub fn ask_guide(factory: &dyn AiGatewayFactory, question: &str) -> Result<String, AppError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::InvalidRequest("ask a question first".to_string()));
    }
    let gateway = factory.create()?;
    let instruction = guide_system_instruction()?;
    let answer = gateway.generate_text(question, Some(instruction.as_str()))?;
    Ok(answer.trim().to_string())
}

/// A few inspirational sentences for one interest.
pub fn adventure_blurb(factory: &dyn AiGatewayFactory, interest: &str) -> Result<String, AppError> {
    if interest.trim().is_empty() {
        return Err(AppError::InvalidRequest("name an interest first".to_string()));
    }
    let gateway = factory.create()?;
    let prompt = adventure_blurb_prompt(interest)?;
    Ok(gateway.generate_text(&prompt, None)?.trim().to_string())
}
