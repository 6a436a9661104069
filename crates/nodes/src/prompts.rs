//! Prompt builders for the four pipeline stages.
//!
//! Kept as pure functions so prompt content can be unit-tested without a
//! provider. Each builder receives exactly the state fields its stage is
//! allowed to read.

use pipeline::Topic;

/// Prompt for the title stage: title options about the topic.
pub fn title_prompt(topic: &Topic) -> String {
    format!(
        "Generate compelling blog title options about {topic} that are:\n\
         - SEO-friendly\n\
         - Attention-grabbing\n\
         - Between 6-12 words"
    )
}

/// Prompt for the content stage: a full post under the generated title.
pub fn content_prompt(title: &str) -> String {
    format!(
        "Write a comprehensive blog post titled \"{title}\" with:\n\
         1. Engaging introduction with hook\n\
         2. 3-5 subheadings with detailed content\n\
         3. Practical examples/statistics\n\
         4. Clear transitions between sections\n\
         5. Actionable conclusion\n\
         Style: Professional yet conversational (Flesch-Kincaid 60-70). \
         Use markdown formatting"
    )
}

/// Prompt for the review stage: critique of the current draft.
pub fn review_prompt(draft: &str) -> String {
    format!(
        "Critically review this blog content:\n\
         - Clarity & Structure\n\
         - Grammar & Style\n\
         - SEO optimization\n\
         - Reader engagement\n\
         Provide specific improvement suggestions. Content:\n{draft}"
    )
}

/// Prompt for the revision stage: rework the draft against the critique.
pub fn revision_prompt(draft: &str, feedback: &str) -> String {
    format!(
        "Revise the blog content based on the given feedback:\n\
         Content: {draft}\n\
         Feedback: {feedback}\n\
         Revise the content to improve clarity, grammar, SEO, and engagement. \
         Use markdown formatting."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prompt_names_the_topic_and_word_range() {
        let topic = Topic::new("Generative AI in Healthcare").unwrap();
        let prompt = title_prompt(&topic);
        assert!(prompt.contains("Generative AI in Healthcare"));
        assert!(prompt.contains("6-12 words"));
        assert!(prompt.contains("SEO-friendly"));
    }

    #[test]
    fn content_prompt_quotes_the_title() {
        let prompt = content_prompt("My Great Title");
        assert!(prompt.contains("\"My Great Title\""));
        assert!(prompt.contains("3-5 subheadings"));
        assert!(prompt.contains("markdown"));
    }

    #[test]
    fn review_prompt_embeds_the_draft() {
        let prompt = review_prompt("the draft body");
        assert!(prompt.ends_with("the draft body"));
        assert!(prompt.contains("SEO optimization"));
        assert!(prompt.contains("improvement suggestions"));
    }

    #[test]
    fn revision_prompt_embeds_draft_and_feedback() {
        let prompt = revision_prompt("the draft body", "the critique");
        assert!(prompt.contains("Content: the draft body"));
        assert!(prompt.contains("Feedback: the critique"));
        assert!(prompt.contains("markdown"));
    }
}
