//! Prompt templates for each study feature.
//!
//! Every function is pure: typed parameters in, instruction text out. Caller
//! supplied text is interpolated verbatim, so whatever a student sends ends up
//! inside the instruction block (a known prompt-injection surface).

use std::fmt;

/// Kind of practice question to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    OpenEnded,
}

impl QuestionType {
    /// Parse a requested type. Unrecognized values fall back to multiple choice;
    /// requests are not rejected for an unknown type.
    pub fn from_requested(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "true_false" => QuestionType::TrueFalse,
            "open_ended" => QuestionType::OpenEnded,
            _ => QuestionType::MultipleChoice,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
            QuestionType::OpenEnded => "open_ended",
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => {
                "Write a multiple-choice question with 4 options (A, B, C, D). Exactly one option must be correct."
            }
            QuestionType::TrueFalse => {
                "Write a true/false question and give a detailed justification for the answer."
            }
            QuestionType::OpenEnded => {
                "Write an open-ended question that calls for a developed written answer, and list the criteria used to grade it."
            }
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form prompt for `/generate`, optionally prefixed with context.
pub fn free_form(content: &str, context: Option<&str>) -> String {
    match context.filter(|c| !c.is_empty()) {
        Some(context) => format!("Context: {context}\n\nQuestion: {content}"),
        None => content.to_string(),
    }
}

pub fn explanation(concept: &str, level: &str, subject: Option<&str>) -> String {
    let subject_line = subject
        .filter(|s| !s.is_empty())
        .map(|s| format!("Subject area: {s}\n"))
        .unwrap_or_default();

    format!(
        r#"You are an experienced, patient teacher. Explain the concept "{concept}" to a student at the {level} level.
{subject_line}
Structure your answer as follows:

## {concept}

### Simple definition
[A clear, direct definition]

### Detailed explanation
[An in-depth explanation suited to the {level} level]

### Practical examples
[2-3 concrete examples that are easy to follow]

### Everyday applications
[How this concept shows up in real life, if applicable]

### Memorization tips
[Mnemonics or associations that help it stick]

Use language appropriate for the {level} level. Be clear and engaging."#
    )
}

pub fn question(subject: &str, topic: &str, difficulty: &str, question_type: &str) -> String {
    let kind = QuestionType::from_requested(question_type);
    let options_section = match kind {
        QuestionType::MultipleChoice => "## Options\n[List the 4 options A, B, C, D]\n\n",
        _ => "",
    };

    format!(
        r#"You are a subject-matter expert writing assessment questions.

**Question settings:**
- Subject: {subject}
- Topic: {topic}
- Difficulty: {difficulty}
- Type: {question_type}

**Instructions:**
{instructions}

**Answer format:**

## Question
[The question statement]

{options_section}## Correct answer
[State the correct answer]

## Explanation
[Explain the answer in detail, the concepts involved, and why the other answers are wrong]

The question must be clear, well written and appropriate for the {difficulty} level."#,
        instructions = kind.instructions(),
    )
}

pub fn study_plan(subject: &str, duration_weeks: i64, daily_hours: i64, current_level: &str) -> String {
    let total_hours = duration_weeks.saturating_mul(7).saturating_mul(daily_hours);

    format!(
        r#"You are an experienced education consultant. Build a complete, personalized study plan.

**Student profile:**
- Subject: {subject}
- Available time: {duration_weeks} weeks ({daily_hours} hours per day)
- Current level: {current_level}
- Total hours: {total_hours}

**Plan structure:**

## Learning objectives
[Clear, measurable goals for the period]

## Weekly schedule

### Week 1: [Week title]
- **Topics:** [List of topics]
- **Goals:** [What should be achieved]
- **Daily split:** [How to divide the {daily_hours}h each day]
- **Practice:** [Exercises and projects]

[Repeat for all {duration_weeks} weeks]

## Recommended study methods
[Techniques that suit this subject]

## Assessment milestones
[How and when to check progress]

## Suggested resources
[Books, sites, videos, tools]

## Productivity tips
[Ways to stay focused and motivated]

## Watch-outs
[The hardest concepts, which deserve extra attention]

The plan must be realistic, progressive and suited to the {current_level} level."#
    )
}

pub fn summary(content: &str) -> String {
    format!(
        r#"You are an expert in study and memorization techniques. Write a structured summary, optimized for review, of the following content:

---
{content}
---

**Summary structure:**

## Main idea
[The central concept in one sentence]

## Key points
[The most important points, at most 7 items]

## Core concepts
[Definitions worth memorizing]

## Connections
[How the ideas relate to each other]

## Memorable examples
[Examples that make the material stick]

## Likely exam questions
[3-5 questions likely to appear on a test]

## Memorization tips
[Mnemonics, associations or other techniques]

Use clear formatting with bullets so the summary is quick to review."#
    )
}

pub fn homework_help(question: &str, subject: Option<&str>) -> String {
    let subject_context = subject
        .filter(|s| !s.is_empty())
        .map(|s| format!(" in {s}"))
        .unwrap_or_default();

    format!(
        r#"You are a patient tutor. The student needs help{subject_context} with the following question:

"{question}"

**Ground rules:**
- Do NOT give the final answer
- Walk the student through the reasoning
- Ask questions that make them think
- Explain the concepts they need
- Offer hints and direction
- Encourage independent reasoning

**Answer structure:**

## Let's think it through
[Restate the problem clearly]

## First question
[A question that starts the reasoning]

## Concepts you need
[The concepts the student must know]

## Path to the solution
[Hints about the next steps, without solving]

## Extra hint
[One specific hint for this question]

Be encouraging and keep the student engaged in the learning process."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_parses_known_values() {
        assert_eq!(QuestionType::from_requested("multiple_choice"), QuestionType::MultipleChoice);
        assert_eq!(QuestionType::from_requested("true_false"), QuestionType::TrueFalse);
        assert_eq!(QuestionType::from_requested("Open_Ended"), QuestionType::OpenEnded);
    }

    #[test]
    fn unknown_question_type_falls_back_to_multiple_choice() {
        assert_eq!(QuestionType::from_requested("essay"), QuestionType::MultipleChoice);
        assert_eq!(QuestionType::from_requested(""), QuestionType::MultipleChoice);
    }

    #[test]
    fn multiple_choice_prompt_has_options_section() {
        let prompt = question("Math", "Quadratics", "medium", "multiple_choice");
        assert!(prompt.contains(QuestionType::MultipleChoice.instructions()));
        assert!(prompt.contains("## Options"));
    }

    #[test]
    fn unknown_type_uses_multiple_choice_instructions_but_echoes_request() {
        let prompt = question("History", "WW2", "hard", "riddle");
        assert!(prompt.contains(QuestionType::MultipleChoice.instructions()));
        assert!(prompt.contains("- Type: riddle"));
    }

    #[test]
    fn true_false_prompt_has_no_options_section() {
        let prompt = question("Biology", "Cells", "easy", "true_false");
        assert!(prompt.contains(QuestionType::TrueFalse.instructions()));
        assert!(!prompt.contains("## Options"));
        assert!(!prompt.contains(QuestionType::MultipleChoice.instructions()));
    }

    #[test]
    fn explanation_includes_subject_only_when_given() {
        let with = explanation("Photosynthesis", "beginner", Some("Biology"));
        assert!(with.contains("\"Photosynthesis\""));
        assert!(with.contains("Subject area: Biology"));
        assert!(with.contains("beginner level"));

        let without = explanation("Photosynthesis", "beginner", None);
        assert!(!without.contains("Subject area"));
    }

    #[test]
    fn study_plan_computes_total_hours() {
        let prompt = study_plan("Python", 8, 2, "beginner");
        assert!(prompt.contains("- Total hours: 112"));
        assert!(prompt.contains("8 weeks (2 hours per day)"));
    }

    #[test]
    fn summary_delimits_content() {
        let prompt = summary("Mitochondria produce ATP.");
        assert!(prompt.contains("---\nMitochondria produce ATP.\n---"));
    }

    #[test]
    fn free_form_prefixes_context() {
        assert_eq!(free_form("Hello", None), "Hello");
        assert_eq!(free_form("Hello", Some("")), "Hello");
        assert_eq!(
            free_form("What is 2+2?", Some("Arithmetic")),
            "Context: Arithmetic\n\nQuestion: What is 2+2?"
        );
    }

    #[test]
    fn homework_help_never_asks_for_direct_answer() {
        let prompt = homework_help("Solve x^2 = 4", Some("Math"));
        assert!(prompt.contains("help in Math"));
        assert!(prompt.contains("Do NOT give the final answer"));
        assert!(prompt.contains("\"Solve x^2 = 4\""));
    }
}
