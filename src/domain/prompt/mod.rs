pub mod builders;
pub mod responses;
pub mod schema;
pub mod template;

pub use builders::{
    StructuredPrompt, adventure_blurb_prompt, alternatives_prompt, combined_image_prompt,
    dream_image_prompt, dream_itinerary_prompt, guide_system_instruction, image_prompts_prompt,
    map_prompt, packing_list_prompt, ranking_prompt, recommendation_prompt,
};
pub use responses::{
    AlternativesResponse, ImagePromptDescriptor, ImagePromptsResponse, MAX_ALTERNATIVES,
    MAX_MAP_POINTS, MapResponse, RankingResponse,
};
pub use schema::{ResponseSchema, SchemaType};
pub use template::{PromptError, render_prompt};
